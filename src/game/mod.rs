//! # Game Module
//!
//! Core game state, entities and the rules that mutate them.
//!
//! This module contains the fundamental building blocks of a duel:
//! - Grid coordinates and directions
//! - Players and weapons
//! - Combat resolution
//! - The turn/battle state machine and the notifications it emits

pub mod combat;
pub mod entities;
pub mod events;
pub mod state;
pub mod turns;

pub use combat::*;
pub use entities::*;
pub use events::*;
pub use state::*;
pub use turns::*;

use serde::{Deserialize, Serialize};

/// Represents a cell coordinate on the board.
///
/// Both components are 1-based: a board of size `n` spans `1..=n` on each axis.
///
/// # Examples
///
/// ```
/// use gridduel::Position;
///
/// let pos = Position::new(3, 4);
/// assert_eq!(pos.x, 3);
/// assert_eq!(pos.y, 4);
/// assert!(pos.in_bounds(10));
/// assert!(!Position::new(0, 4).in_bounds(10));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Checks whether the position lies on a board of the given size.
    pub fn in_bounds(self, size: i32) -> bool {
        (1..=size).contains(&self.x) && (1..=size).contains(&self.y)
    }

    /// Returns the position `distance` cells away in `direction`.
    pub fn step(self, direction: Direction, distance: i32) -> Position {
        let delta = direction.to_delta();
        Position::new(self.x + delta.x * distance, self.y + delta.y * distance)
    }

    /// Checks whether two positions share a row or a column.
    pub fn is_aligned_with(self, other: Position) -> bool {
        self.x == other.x || self.y == other.y
    }

    /// Checks whether two positions touch along a single axis.
    ///
    /// Only one axis may differ, so diagonal neighbours are never adjacent.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridduel::Position;
    ///
    /// assert!(Position::new(3, 3).is_adjacent_to(Position::new(3, 4)));
    /// assert!(!Position::new(3, 3).is_adjacent_to(Position::new(4, 4)));
    /// ```
    pub fn is_adjacent_to(self, other: Position) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        (dx == 0 && dy < 2) || (dy == 0 && dx < 2)
    }

    /// Converts the position to its row-major cell index on a board of `size`.
    ///
    /// Returns `None` when the position is off the board.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridduel::Position;
    ///
    /// assert_eq!(Position::new(1, 1).to_index(10), Some(0));
    /// assert_eq!(Position::new(3, 2).to_index(10), Some(12));
    /// assert_eq!(Position::new(11, 2).to_index(10), None);
    /// ```
    pub fn to_index(self, size: i32) -> Option<usize> {
        if !self.in_bounds(size) {
            return None;
        }
        usize::try_from((self.y - 1) * size + (self.x - 1)).ok()
    }

    /// Converts a row-major cell index back into a position.
    ///
    /// Returns `None` when the index is outside `0..size * size`.
    pub fn from_index(index: usize, size: i32) -> Option<Position> {
        let size_u = usize::try_from(size).ok()?;
        if size_u == 0 || index >= size_u * size_u {
            return None;
        }
        let x = i32::try_from(index % size_u).ok()? + 1;
        let y = i32::try_from(index / size_u).ok()? + 1;
        Some(Position::new(x, y))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Cardinal directions a player can travel in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridduel::{Direction, Position};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
        }
    }

    /// Returns the axis the direction travels along.
    pub fn axis(self) -> Axis {
        match self {
            Direction::North | Direction::South => Axis::Vertical,
            Direction::East | Direction::West => Axis::Horizontal,
        }
    }

    /// Returns all 4 cardinal directions.
    pub fn cardinal() -> [Direction; 4] {
        [
            Direction::West,
            Direction::East,
            Direction::North,
            Direction::South,
        ]
    }
}

/// Board axis, used to restrict neighbourhood checks to one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Along a row (x varies)
    Horizontal,
    /// Along a column (y varies)
    Vertical,
}
