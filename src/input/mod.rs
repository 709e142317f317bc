//! # Input Module
//!
//! Commands submitted by external layers and the queue that applies them.

pub mod commands;

pub use commands::*;

use crate::{BattleAction, DuelResult, EventSink, Outcome, PlayerId, Position, TurnController};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A player intent forwarded into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Move the active player to a cell
    Move(Position),
    /// Respond in battle
    Battle(BattleAction),
    /// Move on behalf of a specific player
    MoveAs(PlayerId, Position),
    /// Respond in battle on behalf of a specific player
    BattleAs(PlayerId, BattleAction),
}

impl Command {
    /// Applies the command to a game.
    pub fn apply(self, controller: &mut TurnController) -> DuelResult<Outcome> {
        match self {
            Command::Move(target) => controller.submit_move(target),
            Command::Battle(action) => controller.submit_battle_action(action),
            Command::MoveAs(player, target) => controller.submit_move_as(player, target),
            Command::BattleAs(player, action) => controller.submit_battle_action_as(player, action),
        }
    }
}

/// FIFO of pending commands, applied strictly one at a time.
///
/// Each command is fully applied and its notifications delivered before the next
/// one is looked at.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command.
    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    /// Number of commands waiting.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no commands are waiting.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Applies the oldest command, if any, and notifies the sink.
    pub fn process_next(
        &mut self,
        controller: &mut TurnController,
        sink: &mut dyn EventSink,
    ) -> DuelResult<Option<Outcome>> {
        let Some(command) = self.pending.pop_front() else {
            return Ok(None);
        };

        let outcome = command.apply(controller)?;
        if let Outcome::Rejected(reason) = outcome {
            log::debug!("{:?} ignored: {}", command, reason);
        }
        outcome.dispatch(sink);
        Ok(Some(outcome))
    }

    /// Applies every pending command in order.
    ///
    /// Stops at the first error; commands after it stay queued.
    pub fn drain(
        &mut self,
        controller: &mut TurnController,
        sink: &mut dyn EventSink,
    ) -> DuelResult<Vec<Outcome>> {
        let mut outcomes = Vec::with_capacity(self.pending.len());
        while let Some(outcome) = self.process_next(controller, sink)? {
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }
}
