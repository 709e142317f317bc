//! # Game State Module
//!
//! The single value holding everything about one game in progress.
//!
//! `GameState` is plain data: the board, both players, every weapon and the current
//! phase. Rules that move the game forward live in [`crate::TurnController`]; this
//! module only offers lookups, snapshots and an invariant check.

use crate::config::MAX_HEALTH;
use crate::generation::{instantiate_weapons, GameConfig, Generator, PlacementGenerator};
use crate::{
    DuelError, DuelResult, Player, PlayerId, PlayerSnapshot, Position, Weapon, WeaponId,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Where the game is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Board generated, no turn assigned yet
    Idle,
    /// The active player must move
    PlayerTurn,
    /// The players are adjacent; the active player must attack or defend
    BattleTurn,
    /// A player died
    GameOver { winner: PlayerId },
}

/// What a renderer should draw in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellOccupant {
    Empty,
    Obstacle,
    Player(PlayerId),
    Weapon(WeaponId),
}

/// Central game state for one duel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Board edge length
    pub size: i32,
    /// Maximum cells travelled per move
    pub max_steps: u32,
    pub obstacles: BTreeSet<Position>,
    /// Every weapon in the game, held or on the board, in creation order
    pub weapons: Vec<Weapon>,
    pub players: [Player; 2],
    /// Player whose input is expected next
    pub active: PlayerId,
    /// Cells the active player may move to
    pub highlights: BTreeSet<Position>,
    pub phase: GamePhase,
}

/// Serializable read-only view of a game for external layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub size: i32,
    pub obstacles: Vec<Position>,
    pub weapons: Vec<Weapon>,
    pub players: Vec<PlayerSnapshot>,
    pub active: PlayerId,
    pub highlights: Vec<Position>,
    pub battle: bool,
    pub winner: Option<PlayerSnapshot>,
}

impl GameState {
    /// Generates a fully placed game in the `Idle` phase.
    ///
    /// Weapons are created from the catalog, then obstacles, players and board
    /// weapons are placed in that order.
    pub fn generate<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> DuelResult<Self> {
        config.validate()?;

        let (mut weapons, defaults) = instantiate_weapons(config)?;
        let layout = PlacementGenerator::new().generate(config, rng)?;

        for (weapon, location) in weapons.iter_mut().zip(layout.weapons.iter()) {
            weapon.location = Some(*location);
        }

        let players = [PlayerId::First, PlayerId::Second].map(|id| {
            let profile = &config.players[id.index()];
            Player::new(
                id,
                profile.name.clone(),
                profile.color.clone(),
                layout.players[id.index()],
                defaults[id.index()],
            )
        });

        let state = Self {
            size: config.grid_size,
            max_steps: config.max_steps,
            obstacles: layout.obstacles,
            weapons,
            players,
            active: PlayerId::First,
            highlights: BTreeSet::new(),
            phase: GamePhase::Idle,
        };
        state.check_invariants()?;

        log::debug!(
            "Generated board: {} obstacles, {} weapons on the board",
            state.obstacles.len(),
            state.weapons.iter().filter(|w| w.is_placed()).count()
        );

        Ok(state)
    }

    /// Builds an empty board with two players holding 10-damage weapons.
    ///
    /// Intended for tests and examples that need full control over the layout.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridduel::{GamePhase, GameState, Position};
    ///
    /// let state = GameState::for_testing(8, Position::new(1, 1), Position::new(8, 8));
    /// assert_eq!(state.phase, GamePhase::Idle);
    /// assert!(state.obstacles.is_empty());
    /// ```
    pub fn for_testing(size: i32, first: Position, second: Position) -> Self {
        let weapons = vec![
            Weapon::new(WeaponId(0), "Dagger", 10, "dagger"),
            Weapon::new(WeaponId(1), "Dagger", 10, "dagger"),
        ];
        let players = [
            Player::new(PlayerId::First, "Blue", "127, 135, 255", first, WeaponId(0)),
            Player::new(PlayerId::Second, "Pink", "255, 127, 193", second, WeaponId(1)),
        ];

        Self {
            size,
            max_steps: crate::config::DEFAULT_MAX_STEPS,
            obstacles: BTreeSet::new(),
            weapons,
            players,
            active: PlayerId::First,
            highlights: BTreeSet::new(),
            phase: GamePhase::Idle,
        }
    }

    /// Gets a player by id.
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// Gets a player mutably by id.
    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// The player whose input is expected next.
    pub fn active_player(&self) -> &Player {
        self.player(self.active)
    }

    /// Gets a weapon by id.
    pub fn weapon(&self, id: WeaponId) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.id == id)
    }

    /// Gets a weapon mutably by id.
    pub fn weapon_mut(&mut self, id: WeaponId) -> Option<&mut Weapon> {
        self.weapons.iter_mut().find(|w| w.id == id)
    }

    /// The weapon lying on the given cell, if any.
    pub fn weapon_at(&self, position: Position) -> Option<&Weapon> {
        self.weapons
            .iter()
            .find(|w| w.location == Some(position))
    }

    /// The weapon a player is holding.
    pub fn held_weapon(&self, id: PlayerId) -> DuelResult<&Weapon> {
        let weapon_id = self.player(id).weapon;
        self.weapon(weapon_id).ok_or_else(|| {
            DuelError::InvalidState(format!(
                "{} holds unknown weapon {}",
                self.player(id).name,
                weapon_id
            ))
        })
    }

    /// Whether the game is in battle mode.
    pub fn is_battle_active(&self) -> bool {
        self.phase == GamePhase::BattleTurn
    }

    /// Whether the game has ended.
    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    /// The winning player once the game is over.
    pub fn winner(&self) -> Option<&Player> {
        match self.phase {
            GamePhase::GameOver { winner } => Some(self.player(winner)),
            _ => None,
        }
    }

    /// Whether the two players stand next to each other along one axis.
    pub fn players_adjacent(&self) -> bool {
        self.players[0].location.is_adjacent_to(self.players[1].location)
    }

    /// Whether the active player may move to the cell.
    pub fn is_highlighted(&self, position: Position) -> bool {
        self.highlights.contains(&position)
    }

    /// What occupies a cell, with players drawn above weapons.
    pub fn occupant_at(&self, position: Position) -> CellOccupant {
        if self.obstacles.contains(&position) {
            return CellOccupant::Obstacle;
        }
        if let Some(player) = self.players.iter().find(|p| p.location == position) {
            return CellOccupant::Player(player.id);
        }
        match self.weapon_at(position) {
            Some(weapon) => CellOccupant::Weapon(weapon.id),
            None => CellOccupant::Empty,
        }
    }

    /// Snapshot of one player for notifications.
    pub fn player_snapshot(&self, id: PlayerId) -> DuelResult<PlayerSnapshot> {
        Ok(self.player(id).snapshot(self.held_weapon(id)?))
    }

    /// Read-only view of the whole game.
    pub fn snapshot(&self) -> DuelResult<GameSnapshot> {
        let players = PlayerId::ALL
            .iter()
            .map(|id| self.player_snapshot(*id))
            .collect::<DuelResult<Vec<_>>>()?;
        let winner = match self.phase {
            GamePhase::GameOver { winner } => Some(self.player_snapshot(winner)?),
            _ => None,
        };

        Ok(GameSnapshot {
            size: self.size,
            obstacles: self.obstacles.iter().copied().collect(),
            weapons: self.weapons.clone(),
            players,
            active: self.active,
            highlights: self.highlights.iter().copied().collect(),
            battle: self.is_battle_active(),
            winner,
        })
    }

    /// Verifies the structural invariants that must hold between transitions.
    pub fn check_invariants(&self) -> DuelResult<()> {
        let out_of_bounds = self
            .obstacles
            .iter()
            .chain(self.weapons.iter().filter_map(|w| w.location.as_ref()))
            .chain(self.players.iter().map(|p| &p.location))
            .find(|pos| !pos.in_bounds(self.size));
        if let Some(pos) = out_of_bounds {
            return Err(DuelError::InvalidState(format!(
                "{} lies outside the {}x{} board",
                pos, self.size, self.size
            )));
        }

        let mut ids = HashSet::new();
        if let Some(weapon) = self.weapons.iter().find(|w| !ids.insert(w.id)) {
            return Err(DuelError::InvalidState(format!(
                "weapon id {} is used twice",
                weapon.id
            )));
        }

        if self.players[0].weapon == self.players[1].weapon {
            return Err(DuelError::InvalidState(
                "both players hold the same weapon".to_string(),
            ));
        }

        for player in &self.players {
            let weapon = self.held_weapon(player.id)?;
            if weapon.is_placed() {
                return Err(DuelError::InvalidState(format!(
                    "{} holds weapon {} which is still on the board",
                    player.name, weapon.id
                )));
            }
            if !(0..=MAX_HEALTH).contains(&player.health) {
                return Err(DuelError::InvalidState(format!(
                    "{} has health {} outside 0..={}",
                    player.name, player.health, MAX_HEALTH
                )));
            }
        }

        let unplaced = self.weapons.iter().filter(|w| !w.is_placed()).count();
        if unplaced != self.players.len() {
            return Err(DuelError::InvalidState(format!(
                "{} weapons are off the board, expected one per player",
                unplaced
            )));
        }

        Ok(())
    }

    /// Serializes the state to pretty JSON.
    pub fn to_json(&self) -> DuelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
