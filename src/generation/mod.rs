//! # Generation Module
//!
//! Game configuration and the procedural setup of a new duel.
//!
//! This module turns a [`GameConfig`] into the starting layout: weapons are created
//! from the catalog and obstacles, players and weapons are placed by bounded
//! rejection sampling.

pub mod placement;
pub mod weapons;

pub use placement::*;
pub use weapons::*;

use crate::config::{
    DEFAULT_GRID_SIZE, DEFAULT_MAX_PLACEMENT_ATTEMPTS, DEFAULT_MAX_STEPS, DEFAULT_WEAPON_TYPE,
};
use crate::{DuelError, DuelResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A catalog entry describing one kind of weapon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponSpec {
    pub name: String,
    pub damage: u32,
    /// Icon reference passed through to renderers
    #[serde(default)]
    pub icon: String,
}

impl WeaponSpec {
    /// Creates a catalog entry.
    pub fn new(name: impl Into<String>, damage: u32, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            damage,
            icon: icon.into(),
        }
    }
}

/// Display name and color of a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    /// `"r, g, b"` triple
    pub color: String,
}

impl PlayerProfile {
    /// Creates a profile.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Configuration for a new game.
///
/// Supplied once at initialization; nothing in a running game reads it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board edge length
    pub grid_size: i32,
    /// Maximum cells travelled per move
    pub max_steps: u32,
    /// Catalog name of the weapon both players start with
    pub default_weapon: String,
    /// Every weapon kind in the game, including the default
    pub weapon_catalog: Vec<WeaponSpec>,
    /// Profiles for the first and second player
    pub players: [PlayerProfile; 2],
    /// Sampling attempts per entity before placement fails
    pub max_placement_attempts: u32,
}

impl GameConfig {
    /// Creates the standard configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridduel::GameConfig;
    ///
    /// let config = GameConfig::new();
    /// assert_eq!(config.grid_size, 10);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            max_steps: DEFAULT_MAX_STEPS,
            default_weapon: DEFAULT_WEAPON_TYPE.to_string(),
            weapon_catalog: vec![
                WeaponSpec::new(DEFAULT_WEAPON_TYPE, 10, "dagger"),
                WeaponSpec::new("Sword", 20, "sword"),
                WeaponSpec::new("Spear", 16, "spear"),
                WeaponSpec::new("Mace", 24, "mace"),
                WeaponSpec::new("Axe", 30, "axe"),
            ],
            players: default_profiles(),
            max_placement_attempts: DEFAULT_MAX_PLACEMENT_ATTEMPTS,
        }
    }

    /// Creates a configuration for testing with a small board and short catalog.
    pub fn for_testing() -> Self {
        Self {
            grid_size: 8,
            max_steps: 3,
            default_weapon: DEFAULT_WEAPON_TYPE.to_string(),
            weapon_catalog: vec![
                WeaponSpec::new(DEFAULT_WEAPON_TYPE, 10, "dagger"),
                WeaponSpec::new("Sword", 20, "sword"),
                WeaponSpec::new("Axe", 30, "axe"),
            ],
            players: default_profiles(),
            max_placement_attempts: 1_000,
        }
    }

    /// Parses a configuration from JSON; missing fields take default values.
    pub fn from_json(json: &str) -> DuelResult<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> DuelResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Catalog entries that are placed on the board, in catalog order.
    pub fn board_weapons(&self) -> impl Iterator<Item = &WeaponSpec> {
        self.weapon_catalog
            .iter()
            .filter(move |spec| spec.name != self.default_weapon)
    }

    /// The catalog entry both players start with.
    pub fn default_weapon_spec(&self) -> Option<&WeaponSpec> {
        self.weapon_catalog
            .iter()
            .find(|spec| spec.name == self.default_weapon)
    }

    /// Checks that the configuration describes a playable game.
    pub fn validate(&self) -> DuelResult<()> {
        if self.grid_size < 2 {
            return Err(DuelError::Config(format!(
                "grid size must be at least 2, got {}",
                self.grid_size
            )));
        }
        if self.max_steps == 0 {
            return Err(DuelError::Config("max steps must be at least 1".to_string()));
        }
        if self.max_placement_attempts == 0 {
            return Err(DuelError::Config(
                "max placement attempts must be at least 1".to_string(),
            ));
        }
        if self.default_weapon_spec().is_none() {
            return Err(DuelError::Config(format!(
                "default weapon '{}' is not in the catalog",
                self.default_weapon
            )));
        }

        let mut names = HashSet::new();
        for spec in &self.weapon_catalog {
            if spec.damage == 0 {
                return Err(DuelError::Config(format!(
                    "weapon '{}' must deal positive damage",
                    spec.name
                )));
            }
            if spec.damage % 2 != 0 {
                return Err(DuelError::Config(format!(
                    "weapon '{}' deals {} damage; fleeing halves it, so it must be even",
                    spec.name, spec.damage
                )));
            }
            if !names.insert(spec.name.as_str()) {
                return Err(DuelError::Config(format!(
                    "weapon '{}' appears twice in the catalog",
                    spec.name
                )));
            }
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_profiles() -> [PlayerProfile; 2] {
    [
        PlayerProfile::new("Blue", "127, 135, 255"),
        PlayerProfile::new("Pink", "255, 127, 193"),
    ]
}

/// Trait for procedural generators.
///
/// Generators draw every random decision from the supplied RNG so a seeded RNG
/// reproduces the same game.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate<R: Rng + ?Sized>(&self, config: &GameConfig, rng: &mut R) -> DuelResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GameConfig) -> DuelResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        GameConfig::new().validate().unwrap();
        GameConfig::for_testing().validate().unwrap();
        assert_eq!(GameConfig::default(), GameConfig::new());
    }

    #[test]
    fn test_board_weapons_skip_default() {
        let config = GameConfig::new();
        let names: Vec<_> = config.board_weapons().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["Sword", "Spear", "Mace", "Axe"]);
    }

    #[test]
    fn test_missing_default_weapon_rejected() {
        let mut config = GameConfig::new();
        config.default_weapon = "Fists".to_string();
        assert!(matches!(config.validate(), Err(DuelError::Config(_))));
    }

    #[test]
    fn test_zero_damage_rejected() {
        let mut config = GameConfig::new();
        config.weapon_catalog.push(WeaponSpec::new("Feather", 0, ""));
        assert!(matches!(config.validate(), Err(DuelError::Config(_))));
    }

    #[test]
    fn test_odd_damage_rejected() {
        let mut config = GameConfig::new();
        config.weapon_catalog.push(WeaponSpec::new("Club", 15, "club"));
        match config.validate() {
            Err(DuelError::Config(message)) => assert!(message.contains("Club")),
            other => panic!("expected a config error, got {:?}", other),
        }

        let json = r#"{ "weapon_catalog": [ { "name": "Dagger", "damage": 11 } ] }"#;
        assert!(matches!(GameConfig::from_json(json), Err(DuelError::Config(_))));
    }

    #[test]
    fn test_duplicate_weapon_rejected() {
        let mut config = GameConfig::new();
        config.weapon_catalog.push(WeaponSpec::new("Sword", 22, ""));
        assert!(matches!(config.validate(), Err(DuelError::Config(_))));
    }

    #[test]
    fn test_tiny_board_rejected() {
        let mut config = GameConfig::new();
        config.grid_size = 1;
        assert!(config.validate().is_err());
        config.grid_size = 6;
        config.max_steps = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "grid_size": 12, "max_steps": 4 }"#).unwrap();
        assert_eq!(config.grid_size, 12);
        assert_eq!(config.max_steps, 4);
        assert_eq!(config.weapon_catalog, GameConfig::new().weapon_catalog);
    }

    #[test]
    fn test_invalid_json_config_rejected() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(DuelError::Serde(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "grid_size": 0 }"#),
            Err(DuelError::Config(_))
        ));
    }

    #[test]
    fn test_config_file_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("duel.json");
        std::fs::write(&path, r#"{ "grid_size": 9 }"#).unwrap();

        let config = GameConfig::from_file(&path).unwrap();
        assert_eq!(config.grid_size, 9);

        assert!(matches!(
            GameConfig::from_file(dir.path().join("missing.json")),
            Err(DuelError::Io(_))
        ));
    }
}
