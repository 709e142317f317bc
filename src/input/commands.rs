//! # Command Definitions
//!
//! Parsing of the line-based text commands accepted by the command-line driver.

use crate::{BattleAction, Command, DuelError, DuelResult, GameState, Position};

/// A parsed line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCommand {
    /// `move X Y`
    Move(Position),
    /// `cell N`: row-major cell index
    Cell(usize),
    /// `attack` or `defend`
    Battle(BattleAction),
    /// `state`: print a snapshot
    State,
    /// `help`
    Help,
    /// `quit`
    Quit,
}

impl TextCommand {
    /// Parses one input line.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridduel::{BattleAction, Position, TextCommand};
    ///
    /// assert_eq!(TextCommand::parse("move 3 4").unwrap(), TextCommand::Move(Position::new(3, 4)));
    /// assert_eq!(TextCommand::parse("  Attack ").unwrap(), TextCommand::Battle(BattleAction::Attack));
    /// assert!(TextCommand::parse("dance").is_err());
    /// ```
    pub fn parse(line: &str) -> DuelResult<TextCommand> {
        let mut words = line.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| DuelError::Validation("empty command".to_string()))?
            .to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match (verb.as_str(), args.as_slice()) {
            ("move" | "m", [x, y]) => TextCommand::Move(Position::new(number(x)?, number(y)?)),
            ("cell" | "c", [index]) => TextCommand::Cell(number(index)?),
            ("attack" | "a", []) => TextCommand::Battle(BattleAction::Attack),
            ("defend" | "d", []) => TextCommand::Battle(BattleAction::Defend),
            ("state" | "s", []) => TextCommand::State,
            ("help" | "h" | "?", []) => TextCommand::Help,
            ("quit" | "q" | "exit", []) => TextCommand::Quit,
            _ => {
                return Err(DuelError::Validation(format!(
                    "unrecognised command '{}'",
                    line.trim()
                )))
            }
        };
        Ok(command)
    }

    /// Converts the input into an engine command.
    ///
    /// Returns `Ok(None)` for inputs handled by the driver itself.
    pub fn to_command(self, state: &GameState) -> DuelResult<Option<Command>> {
        match self {
            TextCommand::Move(target) => Ok(Some(Command::Move(target))),
            TextCommand::Cell(index) => {
                let target = Position::from_index(index, state.size).ok_or_else(|| {
                    DuelError::Validation(format!(
                        "cell {} is outside the {}x{} board",
                        index, state.size, state.size
                    ))
                })?;
                Ok(Some(Command::Move(target)))
            }
            TextCommand::Battle(action) => Ok(Some(Command::Battle(action))),
            TextCommand::State | TextCommand::Help | TextCommand::Quit => Ok(None),
        }
    }
}

/// Help text listing every command.
pub const HELP: &str = "commands: move X Y | cell N | attack | defend | state | help | quit";

fn number<T: std::str::FromStr>(word: &str) -> DuelResult<T> {
    word.parse()
        .map_err(|_| DuelError::Validation(format!("'{}' is not a number", word)))
}
