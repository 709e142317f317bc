//! # Movement Planning
//!
//! Computes where the active player may move and what lies along a move.

use crate::{BlockQuery, Categories, Category, Direction, GameState, GridIndex, Position, Weapon};
use std::collections::BTreeSet;

/// Read-only movement queries over a game.
#[derive(Debug, Clone)]
pub struct MovementPlanner<'a> {
    state: &'a GameState,
    index: GridIndex,
}

impl<'a> MovementPlanner<'a> {
    /// Creates a planner over the current board.
    pub fn new(state: &'a GameState) -> Self {
        Self {
            state,
            index: GridIndex::from_state(state),
        }
    }

    /// Cells reachable from `origin` in a straight line of at most `max_steps`.
    ///
    /// Each cardinal direction is walked on its own and stops at the board edge,
    /// an obstacle or a player. Weapons neither stop the walk nor hide their cell,
    /// so moving onto or across one is legal. The result is plus-shaped.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridduel::{GameState, MovementPlanner, Position};
    ///
    /// let state = GameState::for_testing(6, Position::new(3, 3), Position::new(6, 6));
    /// let cells = MovementPlanner::new(&state).reachable_cells(Position::new(3, 3), 1);
    /// assert_eq!(cells.len(), 4);
    /// assert!(cells.contains(&Position::new(3, 2)));
    /// ```
    pub fn reachable_cells(&self, origin: Position, max_steps: u32) -> BTreeSet<Position> {
        let blockers = BlockQuery::new(Categories::ALL.without(Category::Weapons));
        let steps = i32::try_from(max_steps).unwrap_or(i32::MAX);
        let mut cells = BTreeSet::new();

        for direction in Direction::cardinal() {
            for distance in 1..=steps {
                let cell = origin.step(direction, distance);
                if !cell.in_bounds(self.state.size) || self.index.is_blocked(cell, &blockers) {
                    break;
                }
                cells.insert(cell);
            }
        }

        cells
    }

    /// First weapon the mover meets travelling from `start` to `end`.
    ///
    /// Only straight horizontal or vertical moves are scanned; any other pair
    /// yields `None`. The start cell is skipped and the destination is included,
    /// so stepping onto a weapon picks it up.
    pub fn weapon_on_path(&self, start: Position, end: Position) -> Option<&'a Weapon> {
        travelled_cells(start, end)
            .into_iter()
            .find_map(|cell| self.state.weapon_at(cell))
    }
}

/// Cells entered when moving in a straight line from `start` to `end`, in order.
///
/// The start cell is excluded and `end` is the last entry. Unaligned or equal
/// positions yield an empty path.
pub fn travelled_cells(start: Position, end: Position) -> Vec<Position> {
    if start == end || !start.is_aligned_with(end) {
        return Vec::new();
    }

    let delta = end - start;
    let step = Position::new(delta.x.signum(), delta.y.signum());
    let length = delta.x.abs().max(delta.y.abs());

    (1..=length)
        .map(|i| Position::new(start.x + step.x * i, start.y + step.y * i))
        .collect()
}
