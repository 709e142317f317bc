//! # Turn Controller
//!
//! The state machine driving a duel: whose turn it is, where they may move, when
//! battle starts and how it ends.
//!
//! ```text
//! Idle -> PlayerTurn <-> BattleTurn -> GameOver
//! ```
//!
//! Every command takes `&mut self`, so two commands can never interleave. Input
//! that does not fit the current phase is answered with a [`Rejection`] and leaves
//! the state exactly as it was.

use crate::game::combat::{check_death, resolve_action};
use crate::{
    BattleAction, DuelResult, EventSink, GameEvent, GamePhase, GameState, LocationUpdate,
    MovementPlanner, PlayerId, Position,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Why a command was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// No turn has been assigned yet
    NotStarted,
    /// The first turn was already assigned
    AlreadyStarted,
    /// The destination is not highlighted
    InvalidMove,
    /// A move was submitted during battle
    InBattle,
    /// A battle action was submitted outside battle
    NotInBattle,
    /// The command came from the player who is not active
    NotYourTurn,
    /// The game has already ended
    GameOver,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Rejection::NotStarted => "the game has not started",
            Rejection::AlreadyStarted => "the game is already under way",
            Rejection::InvalidMove => "that cell is not reachable",
            Rejection::InBattle => "players must fight before moving",
            Rejection::NotInBattle => "there is no battle to act in",
            Rejection::NotYourTurn => "it is not your turn",
            Rejection::GameOver => "the game is over",
        };
        f.write_str(text)
    }
}

/// Result of submitting a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The command was applied and produced these notifications, in order
    Accepted(Vec<GameEvent>),
    /// The command was ignored
    Rejected(Rejection),
}

impl Outcome {
    /// Whether the command changed the game.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    /// Notifications produced, empty when rejected.
    pub fn events(&self) -> &[GameEvent] {
        match self {
            Outcome::Accepted(events) => events,
            Outcome::Rejected(_) => &[],
        }
    }

    /// The rejection reason, if any.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Outcome::Accepted(_) => None,
            Outcome::Rejected(reason) => Some(*reason),
        }
    }

    /// Delivers the notifications to a sink.
    pub fn dispatch(&self, sink: &mut dyn EventSink) {
        for event in self.events() {
            sink.notify(event);
        }
    }
}

/// Owns a game and applies commands to it.
#[derive(Debug, Clone)]
pub struct TurnController {
    state: GameState,
}

impl TurnController {
    /// Wraps a generated game.
    pub fn new(state: GameState) -> Self {
        Self { state }
    }

    /// Current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Consumes the controller, returning the game.
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Cells the active player may move to.
    pub fn highlighted_cells(&self) -> &std::collections::BTreeSet<Position> {
        &self.state.highlights
    }

    /// Gives the first turn to a uniformly random player.
    pub fn assign_initial_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> DuelResult<Outcome> {
        let first = if rng.gen_bool(0.5) {
            PlayerId::First
        } else {
            PlayerId::Second
        };
        self.assign_turn_to(first)
    }

    /// Gives the first turn to a chosen player.
    ///
    /// Only valid from `Idle`; afterwards turns are handed over by moves and battle.
    pub fn assign_turn_to(&mut self, player: PlayerId) -> DuelResult<Outcome> {
        match self.state.phase {
            GamePhase::Idle => {}
            GamePhase::GameOver { .. } => return Ok(Outcome::Rejected(Rejection::GameOver)),
            _ => return Ok(Outcome::Rejected(Rejection::AlreadyStarted)),
        }

        self.state.phase = GamePhase::PlayerTurn;
        let events = vec![self.give_turn(player)?];
        log::debug!("{} takes the first turn", self.state.player(player).name);
        Ok(Outcome::Accepted(events))
    }

    /// Moves the active player to a highlighted cell.
    pub fn submit_move(&mut self, target: Position) -> DuelResult<Outcome> {
        let active = self.state.active;
        self.submit_move_as(active, target)
    }

    /// Moves `player` to a highlighted cell, rejecting input from the idle player.
    pub fn submit_move_as(&mut self, player: PlayerId, target: Position) -> DuelResult<Outcome> {
        if let Some(rejection) = self.move_rejection(player, target) {
            log::debug!("Move to {} rejected: {}", target, rejection);
            return Ok(Outcome::Rejected(rejection));
        }

        self.apply_move(player, target)
    }

    /// Resolves the active player's battle choice.
    pub fn submit_battle_action(&mut self, action: BattleAction) -> DuelResult<Outcome> {
        let active = self.state.active;
        self.submit_battle_action_as(active, action)
    }

    /// Resolves `player`'s battle choice, rejecting input from the idle player.
    pub fn submit_battle_action_as(
        &mut self,
        player: PlayerId,
        action: BattleAction,
    ) -> DuelResult<Outcome> {
        let rejection = match self.state.phase {
            GamePhase::Idle => Some(Rejection::NotStarted),
            GamePhase::GameOver { .. } => Some(Rejection::GameOver),
            GamePhase::PlayerTurn => Some(Rejection::NotInBattle),
            GamePhase::BattleTurn if player != self.state.active => Some(Rejection::NotYourTurn),
            GamePhase::BattleTurn => None,
        };
        if let Some(rejection) = rejection {
            log::debug!("{:?} rejected: {}", action, rejection);
            return Ok(Outcome::Rejected(rejection));
        }

        self.apply_battle_action(action)
    }

    fn move_rejection(&self, player: PlayerId, target: Position) -> Option<Rejection> {
        match self.state.phase {
            GamePhase::Idle => Some(Rejection::NotStarted),
            GamePhase::GameOver { .. } => Some(Rejection::GameOver),
            GamePhase::BattleTurn => Some(Rejection::InBattle),
            GamePhase::PlayerTurn if player != self.state.active => Some(Rejection::NotYourTurn),
            GamePhase::PlayerTurn if !self.state.is_highlighted(target) => {
                Some(Rejection::InvalidMove)
            }
            GamePhase::PlayerTurn => None,
        }
    }

    fn apply_move(&mut self, mover: PlayerId, target: Position) -> DuelResult<Outcome> {
        let start = self.state.player(mover).location;

        // Validate before touching anything so a failure leaves the game intact.
        let mut moved = self.state.player(mover).clone();
        moved.relocate(LocationUpdate::to(target), self.state.size)?;

        let found = MovementPlanner::new(&self.state)
            .weapon_on_path(start, target)
            .map(|w| (w.id, w.location));

        self.state.highlights.clear();

        if let Some((found_id, Some(found_at))) = found {
            let dropped_id = self.state.player(mover).weapon;
            if let Some(dropped) = self.state.weapon_mut(dropped_id) {
                dropped.location = Some(found_at);
            }
            if let Some(picked) = self.state.weapon_mut(found_id) {
                picked.location = None;
            }
            moved.weapon = found_id;
            log::debug!(
                "{} swapped weapon {} for {} at {}",
                moved.name,
                dropped_id,
                found_id,
                found_at
            );
        }

        log::debug!("{} moved {} -> {}", moved.name, start, target);
        *self.state.player_mut(mover) = moved;

        let mut events = Vec::new();
        let next = mover.opponent();

        if self.state.players_adjacent() {
            self.state.active = next;
            events.push(self.turn_changed()?);
            self.state.phase = GamePhase::BattleTurn;
            self.state.highlights.clear();
            events.push(GameEvent::BattleModeChanged { active: true });
            log::info!(
                "Battle! {} ({} hp) vs {} ({} hp)",
                self.state.players[0].name,
                self.state.players[0].health,
                self.state.players[1].name,
                self.state.players[1].health
            );
        } else {
            events.push(self.give_turn(next)?);
        }

        Ok(Outcome::Accepted(events))
    }

    fn apply_battle_action(&mut self, action: BattleAction) -> DuelResult<Outcome> {
        let defender_id = self.state.active;
        let attacker_id = defender_id.opponent();
        let damage = self.state.held_weapon(attacker_id)?.damage;

        let effect = resolve_action(action, self.state.player_mut(defender_id), damage);
        let mut events = Vec::new();

        if effect.defender_died || check_death(self.state.player(defender_id)) {
            self.state.phase = GamePhase::GameOver {
                winner: attacker_id,
            };
            self.state.highlights.clear();
            self.state.active = attacker_id;

            let winner = self.state.player_snapshot(attacker_id)?;
            events.push(GameEvent::BattleModeChanged { active: false });
            events.push(GameEvent::TurnChanged {
                player: winner.clone(),
                winner: Some(winner.clone()),
            });
            events.push(GameEvent::GameOver { winner });
            log::info!(
                "{} is dead, {} wins",
                self.state.player(defender_id).name,
                self.state.player(attacker_id).name
            );
            return Ok(Outcome::Accepted(events));
        }

        match action {
            BattleAction::Attack => {
                self.state.active = attacker_id;
                events.push(self.turn_changed()?);
            }
            BattleAction::Defend => {
                self.state.phase = GamePhase::PlayerTurn;
                events.push(GameEvent::BattleModeChanged { active: false });
                events.push(self.give_turn(defender_id)?);
                log::debug!("{} fled the battle", self.state.player(defender_id).name);
            }
        }

        Ok(Outcome::Accepted(events))
    }

    /// Hands the turn to `player` outside battle and refreshes highlights.
    fn give_turn(&mut self, player: PlayerId) -> DuelResult<GameEvent> {
        self.state.active = player;
        self.refresh_highlights();
        self.turn_changed()
    }

    fn refresh_highlights(&mut self) {
        let origin = self.state.active_player().location;
        let cells = MovementPlanner::new(&self.state).reachable_cells(origin, self.state.max_steps);
        self.state.highlights = cells;
    }

    fn turn_changed(&self) -> DuelResult<GameEvent> {
        let winner = match self.state.phase {
            GamePhase::GameOver { winner } => Some(self.state.player_snapshot(winner)?),
            _ => None,
        };
        Ok(GameEvent::TurnChanged {
            player: self.state.player_snapshot(self.state.active)?,
            winner,
        })
    }
}
