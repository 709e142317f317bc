//! # Game Events
//!
//! Notifications emitted after every accepted command. External layers subscribe
//! through [`EventSink`] and redraw from the data carried here.

use crate::PlayerSnapshot;
use serde::{Deserialize, Serialize};

/// A single observable state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// The turn passed to `player`
    TurnChanged {
        player: PlayerSnapshot,
        winner: Option<PlayerSnapshot>,
    },
    /// Battle mode was entered or left
    BattleModeChanged { active: bool },
    /// A player died; no further input is accepted
    GameOver { winner: PlayerSnapshot },
}

impl GameEvent {
    /// Short name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::TurnChanged { .. } => "turn_changed",
            GameEvent::BattleModeChanged { .. } => "battle_mode_changed",
            GameEvent::GameOver { .. } => "game_over",
        }
    }
}

/// Receiver of game notifications.
pub trait EventSink {
    /// Called once per event, in emission order.
    fn notify(&mut self, event: &GameEvent);
}

impl<F> EventSink for F
where
    F: FnMut(&GameEvent),
{
    fn notify(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Sink that keeps every event it receives.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events of the given kind seen so far.
    pub fn count(&self, kind: &str) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }

    /// Most recent event, if any.
    pub fn last(&self) -> Option<&GameEvent> {
        self.events.last()
    }
}

impl EventSink for EventLog {
    fn notify(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}
