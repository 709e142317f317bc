//! # Gridduel
//!
//! Rules engine for a two-player, turn-based combat game played on a square grid.
//!
//! ## Architecture Overview
//!
//! The engine owns every game rule and nothing else. Rendering and input devices
//! live outside the crate: they read [`GameSnapshot`] values, forward the player's
//! intent as [`Command`] values, and react to the [`GameEvent`] notifications that
//! each accepted command produces.
//!
//! - **Grid index**: occupancy queries over obstacle, weapon and player positions
//! - **Placement**: bounded rejection sampling of the starting layout
//! - **Movement**: plus-shaped reachability and weapon detection along a path
//! - **Combat**: damage, death and winner resolution
//! - **Turns**: the state machine tying the above together
//!
//! ## Example
//!
//! ```
//! use gridduel::{initialise, GameConfig, Outcome};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut game = initialise(GameConfig::new(), &mut rng).unwrap();
//!
//! let target = *game.highlighted_cells().iter().next().unwrap();
//! let outcome = game.submit_move(target).unwrap();
//! assert!(matches!(outcome, Outcome::Accepted(_)));
//! ```

pub mod game;
pub mod generation;
pub mod input;
pub mod utils;

pub use game::*;
pub use generation::*;
pub use input::*;
pub use utils::*;

pub use game::{
    // From combat
    BattleAction,
    CombatEffect,
    // From events
    EventLog,
    EventSink,
    GameEvent,
    // From entities
    LocationUpdate,
    Player,
    PlayerId,
    PlayerSnapshot,
    Weapon,
    WeaponId,
    WeaponSnapshot,
    // From state
    CellOccupant,
    GamePhase,
    GameSnapshot,
    GameState,
    // From turns
    Outcome,
    Rejection,
    TurnController,
};

pub use generation::{GameConfig, Generator, PlacementGenerator, PlayerProfile, WeaponSpec};

/// Core error type for the Gridduel engine.
#[derive(thiserror::Error, Debug)]
pub enum DuelError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration is unusable
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A value supplied to an entity does not describe a valid location
    #[error("Validation error: {0}")]
    Validation(String),

    /// Rejection sampling ran out of attempts
    #[error("Could not place {category} after {attempts} attempts")]
    PlacementExhausted {
        /// Which kind of entity was being placed
        category: String,
        /// Attempts spent on the entity that failed
        attempts: u32,
    },

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Gridduel codebase.
pub type DuelResult<T> = Result<T, DuelError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default board edge length in cells
    pub const DEFAULT_GRID_SIZE: i32 = 10;

    /// Default number of cells a player may travel in one move
    pub const DEFAULT_MAX_STEPS: u32 = 3;

    /// Health every player starts with
    pub const MAX_HEALTH: i32 = 100;

    /// Attempts allowed per entity before placement gives up
    pub const DEFAULT_MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

    /// Name of the weapon both players start with
    pub const DEFAULT_WEAPON_TYPE: &str = "Dagger";
}

/// Generates a complete game and hands the first turn to a random player.
///
/// This is the single entry point external layers need: the returned controller
/// has every obstacle, weapon and player placed and highlights computed for the
/// starting player.
pub fn initialise<R: rand::Rng + ?Sized>(
    config: GameConfig,
    rng: &mut R,
) -> DuelResult<TurnController> {
    let state = GameState::generate(&config, rng)?;
    let mut controller = TurnController::new(state);
    controller.assign_initial_turn(rng)?;
    log::info!(
        "Game initialised on a {0}x{0} grid, {1} to move",
        config.grid_size,
        controller.state().active_player().name
    );
    Ok(controller)
}
