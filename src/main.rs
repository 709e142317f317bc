//! # Gridduel Command-Line Driver
//!
//! Sets up a game and feeds it commands, either typed on stdin or chosen at random,
//! printing every notification as one line of JSON.

use clap::Parser;
use gridduel::{
    BattleAction, Command, CommandQueue, DuelError, DuelResult, EventSink, GameConfig,
    GameEvent, GamePhase, GameState, TextCommand, TurnController, HELP,
};
use log::{error, info};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use std::io::{self, BufRead, Write};

/// Command line arguments for the Gridduel driver.
#[derive(Parser, Debug)]
#[command(name = "gridduel")]
#[command(about = "Two-player turn-based grid duel")]
#[command(version)]
struct Args {
    /// Random seed for board generation and the starting player
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Board edge length (overrides the configuration file)
    #[arg(long)]
    grid_size: Option<i32>,

    /// Cells a player may travel per move (overrides the configuration file)
    #[arg(long)]
    max_steps: Option<u32>,

    /// Let both players choose random legal commands
    #[arg(long)]
    autoplay: bool,

    /// Maximum commands issued in autoplay mode
    #[arg(long, default_value_t = 500)]
    max_turns: u32,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Prints each notification as a JSON line on stdout.
struct JsonLines;

impl EventSink for JsonLines {
    fn notify(&mut self, event: &GameEvent) {
        match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => error!("Could not encode {} event: {}", event.kind(), e),
        }
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = initialize_logging(&args.log_level) {
        eprintln!("{}", e);
        std::process::exit(2);
    }

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> DuelResult<()> {
    let level = match log_level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        other => {
            return Err(DuelError::Config(format!("unknown log level '{}'", other)));
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .target(env_logger::Target::Stderr)
        .init();
    Ok(())
}

fn run(args: &Args) -> DuelResult<()> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::new(),
    };
    if let Some(size) = args.grid_size {
        config.grid_size = size;
    }
    if let Some(steps) = args.max_steps {
        config.max_steps = steps;
    }
    config.validate()?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Starting Gridduel v{} with seed {}", gridduel::VERSION, seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let state = GameState::generate(&config, &mut rng)?;
    let mut controller = TurnController::new(state);
    let mut sink = JsonLines;
    controller.assign_initial_turn(&mut rng)?.dispatch(&mut sink);

    if args.autoplay {
        autoplay(&mut controller, &mut rng, &mut sink, args.max_turns)
    } else {
        interactive(&mut controller, &mut sink)
    }
}

/// Reads text commands from stdin until the game ends or input closes.
fn interactive(controller: &mut TurnController, sink: &mut JsonLines) -> DuelResult<()> {
    let stdin = io::stdin();
    let mut queue = CommandQueue::new();
    eprintln!("{}", HELP);

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let input = match TextCommand::parse(&line) {
            Ok(input) => input,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        match input {
            TextCommand::Quit => break,
            TextCommand::Help => eprintln!("{}", HELP),
            TextCommand::State => {
                println!("{}", serde_json::to_string(&controller.state().snapshot()?)?);
            }
            _ => match input.to_command(controller.state()) {
                Ok(Some(command)) => queue.push(command),
                Ok(None) => {}
                Err(e) => eprintln!("{}", e),
            },
        }

        for outcome in queue.drain(controller, sink)? {
            if let Some(reason) = outcome.rejection() {
                eprintln!("ignored: {}", reason);
            }
        }
        io::stdout().flush()?;

        if controller.state().is_game_over() {
            break;
        }
    }

    Ok(())
}

/// Plays both sides with random legal commands.
fn autoplay<R: Rng>(
    controller: &mut TurnController,
    rng: &mut R,
    sink: &mut JsonLines,
    max_turns: u32,
) -> DuelResult<()> {
    let mut queue = CommandQueue::new();

    for _ in 0..max_turns {
        let command = match controller.state().phase {
            GamePhase::GameOver { .. } => break,
            GamePhase::Idle => {
                return Err(DuelError::InvalidState("no turn was assigned".to_string()))
            }
            GamePhase::BattleTurn => {
                let action = if rng.gen_bool(0.5) {
                    BattleAction::Attack
                } else {
                    BattleAction::Defend
                };
                Command::Battle(action)
            }
            GamePhase::PlayerTurn => {
                match controller.highlighted_cells().iter().copied().choose(rng) {
                    Some(target) => Command::Move(target),
                    None => {
                        info!(
                            "{} is boxed in and cannot move",
                            controller.state().active_player().name
                        );
                        break;
                    }
                }
            }
        };

        queue.push(command);
        queue.drain(controller, sink)?;
    }

    match controller.state().winner() {
        Some(winner) => info!("{} wins", winner.name),
        None => info!("No winner after {} commands", max_turns),
    }
    Ok(())
}
