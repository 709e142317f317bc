//! # Entities
//!
//! Players and weapons: the only pieces on the board that change during play.

use crate::config::MAX_HEALTH;
use crate::{DuelError, DuelResult, Position};
use serde::{Deserialize, Serialize};

/// Identifies one of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    First,
    Second,
}

impl PlayerId {
    /// Both ids in player-index order.
    pub const ALL: [PlayerId; 2] = [PlayerId::First, PlayerId::Second];

    /// Returns the 0-based index of the player.
    pub fn index(self) -> usize {
        match self {
            PlayerId::First => 0,
            PlayerId::Second => 1,
        }
    }

    /// Converts a 0-based index back into an id.
    pub fn from_index(index: usize) -> Option<PlayerId> {
        match index {
            0 => Some(PlayerId::First),
            1 => Some(PlayerId::Second),
            _ => None,
        }
    }

    /// Returns the other player's id.
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::First => PlayerId::Second,
            PlayerId::Second => PlayerId::First,
        }
    }
}

/// Unique identifier for weapons, assigned sequentially at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeaponId(pub u32);

impl std::fmt::Display for WeaponId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A weapon, either lying on the board or held by a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub id: WeaponId,
    pub name: String,
    /// Damage dealt on a full-strength hit
    pub damage: u32,
    /// Icon reference handed through to renderers untouched
    pub icon: String,
    /// Board location; `None` while the weapon is held
    pub location: Option<Position>,
}

impl Weapon {
    /// Creates an unplaced weapon.
    pub fn new(id: WeaponId, name: impl Into<String>, damage: u32, icon: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            damage,
            icon: icon.into(),
            location: None,
        }
    }

    /// Checks whether the weapon is lying on the board.
    pub fn is_placed(&self) -> bool {
        self.location.is_some()
    }

    /// Builds the view handed to external layers.
    pub fn snapshot(&self) -> WeaponSnapshot {
        WeaponSnapshot {
            name: self.name.clone(),
            damage: self.damage,
        }
    }
}

/// A partial location update.
///
/// Components left as `None` keep their current value. An update with neither
/// component is rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub x: Option<i32>,
    pub y: Option<i32>,
}

impl LocationUpdate {
    /// Update that replaces both components.
    pub fn to(position: Position) -> Self {
        Self {
            x: Some(position.x),
            y: Some(position.y),
        }
    }
}

impl From<Position> for LocationUpdate {
    fn from(position: Position) -> Self {
        Self::to(position)
    }
}

/// One of the two duelling players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Display color as an `"r, g, b"` triple
    pub color: String,
    pub health: i32,
    pub location: Position,
    /// The weapon currently held
    pub weapon: WeaponId,
}

impl Player {
    /// Creates a player at full health.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridduel::{Player, PlayerId, Position, WeaponId};
    ///
    /// let player = Player::new(PlayerId::First, "Blue", "127, 135, 255", Position::new(2, 2), WeaponId(4));
    /// assert_eq!(player.health, 100);
    /// assert!(player.is_alive());
    /// ```
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        color: impl Into<String>,
        location: Position,
        weapon: WeaponId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            health: MAX_HEALTH,
            location,
            weapon,
        }
    }

    /// Checks whether the player still has health left.
    pub fn is_alive(&self) -> bool {
        self.health >= 1
    }

    /// Applies a location update on a board of the given size.
    ///
    /// Fails without touching the player when the update carries no component or
    /// would leave the board.
    pub fn relocate(&mut self, update: LocationUpdate, size: i32) -> DuelResult<()> {
        if update.x.is_none() && update.y.is_none() {
            return Err(DuelError::Validation(format!(
                "location update for {} has neither x nor y",
                self.name
            )));
        }

        let target = Position::new(
            update.x.unwrap_or(self.location.x),
            update.y.unwrap_or(self.location.y),
        );
        if !target.in_bounds(size) {
            return Err(DuelError::Validation(format!(
                "location {} for {} is outside the {}x{} board",
                target, self.name, size, size
            )));
        }

        self.location = target;
        Ok(())
    }

    /// Builds the view handed to external layers.
    pub fn snapshot(&self, weapon: &Weapon) -> PlayerSnapshot {
        PlayerSnapshot {
            id: self.id,
            name: self.name.clone(),
            color: self.color.clone(),
            health: self.health,
            location: self.location,
            weapon: weapon.snapshot(),
        }
    }
}

/// Read-only view of a weapon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponSnapshot {
    pub name: String,
    pub damage: u32,
}

/// Read-only view of a player as delivered in notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub color: String,
    pub health: i32,
    pub location: Position,
    pub weapon: WeaponSnapshot,
}
