//! # Grid Index
//!
//! Occupancy queries over the three kinds of placed entity. The index holds plain
//! coordinate sets and answers "is this cell (or its cross-shaped surroundings)
//! taken?" without any knowledge of turns or combat.

use crate::{Axis, Direction, GameState, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Kinds of entity that can occupy a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Obstacles,
    Weapons,
    Players,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Obstacles => "obstacle",
            Category::Weapons => "weapon",
            Category::Players => "player",
        };
        f.write_str(name)
    }
}

/// Selection of categories taking part in a blocking check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categories {
    pub obstacles: bool,
    pub weapons: bool,
    pub players: bool,
}

impl Categories {
    /// Every category participates.
    pub const ALL: Categories = Categories {
        obstacles: true,
        weapons: true,
        players: true,
    };

    /// Only the given category participates.
    pub fn only(category: Category) -> Self {
        Self {
            obstacles: false,
            weapons: false,
            players: false,
        }
        .with(category, true)
    }

    /// Drops one category from the selection.
    pub fn without(self, category: Category) -> Self {
        self.with(category, false)
    }

    /// Whether the category takes part.
    pub fn includes(self, category: Category) -> bool {
        match category {
            Category::Obstacles => self.obstacles,
            Category::Weapons => self.weapons,
            Category::Players => self.players,
        }
    }

    fn with(mut self, category: Category, enabled: bool) -> Self {
        match category {
            Category::Obstacles => self.obstacles = enabled,
            Category::Weapons => self.weapons = enabled,
            Category::Players => self.players = enabled,
        }
        self
    }
}

/// Parameters of a blocking check.
///
/// `bound` is the ring distance checked around the cell: 0 tests the cell alone,
/// each further ring adds the four axis-aligned cells at that distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockQuery {
    pub categories: Categories,
    pub bound: u32,
    /// Restricts the ring tests to a single axis
    pub axis: Option<Axis>,
}

impl BlockQuery {
    /// Cell-only check against the given categories.
    pub fn new(categories: Categories) -> Self {
        Self {
            categories,
            bound: 0,
            axis: None,
        }
    }

    /// Sets the ring distance.
    pub fn with_bound(mut self, bound: u32) -> Self {
        self.bound = bound;
        self
    }

    /// Restricts ring tests to one axis.
    pub fn along(mut self, axis: Axis) -> Self {
        self.axis = Some(axis);
        self
    }
}

/// Exact-match membership test.
pub fn occupied(set: &BTreeSet<Position>, position: Position) -> bool {
    set.contains(&position)
}

/// Occupancy sets for obstacles, board weapons and players.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridIndex {
    obstacles: BTreeSet<Position>,
    weapons: BTreeSet<Position>,
    players: BTreeSet<Position>,
}

impl GridIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes everything currently on the board of a game.
    ///
    /// Held weapons have no board location and are skipped.
    pub fn from_state(state: &GameState) -> Self {
        Self {
            obstacles: state.obstacles.clone(),
            weapons: state.weapons.iter().filter_map(|w| w.location).collect(),
            players: state.players.iter().map(|p| p.location).collect(),
        }
    }

    /// Records an occupied cell.
    pub fn insert(&mut self, category: Category, position: Position) {
        self.set_mut(category).insert(position);
    }

    /// Positions recorded for a category.
    pub fn positions(&self, category: Category) -> &BTreeSet<Position> {
        match category {
            Category::Obstacles => &self.obstacles,
            Category::Weapons => &self.weapons,
            Category::Players => &self.players,
        }
    }

    /// Checks the cell and its cross-shaped surroundings against the query.
    ///
    /// Diagonal cells are never tested. Returns `true` on the first hit.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridduel::{BlockQuery, Categories, Category, GridIndex, Position};
    ///
    /// let mut index = GridIndex::new();
    /// index.insert(Category::Weapons, Position::new(5, 5));
    ///
    /// let near = BlockQuery::new(Categories::only(Category::Weapons)).with_bound(2);
    /// assert!(index.is_blocked(Position::new(5, 7), &near));
    /// assert!(!index.is_blocked(Position::new(6, 6), &near));
    /// ```
    pub fn is_blocked(&self, position: Position, query: &BlockQuery) -> bool {
        let categories = [Category::Obstacles, Category::Weapons, Category::Players];

        for ring in 0..=query.bound {
            let probes = probe_points(position, ring, query.axis);
            for category in categories {
                if !query.categories.includes(category) {
                    continue;
                }
                let set = self.positions(category);
                if probes.iter().any(|probe| occupied(set, *probe)) {
                    return true;
                }
            }
        }

        false
    }

    fn set_mut(&mut self, category: Category) -> &mut BTreeSet<Position> {
        match category {
            Category::Obstacles => &mut self.obstacles,
            Category::Weapons => &mut self.weapons,
            Category::Players => &mut self.players,
        }
    }
}

/// Cells tested at one ring distance around `position`.
fn probe_points(position: Position, ring: u32, axis: Option<Axis>) -> Vec<Position> {
    if ring == 0 {
        return vec![position];
    }

    let distance = i32::try_from(ring).unwrap_or(i32::MAX);
    Direction::cardinal()
        .into_iter()
        .filter(|direction| axis.map_or(true, |axis| direction.axis() == axis))
        .map(|direction| position.step(direction, distance))
        .collect()
}
