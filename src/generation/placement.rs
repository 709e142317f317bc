//! # Placement
//!
//! Starting layout generation by rejection sampling.
//!
//! Categories are placed in a fixed order, obstacles, then players, then weapons,
//! so that each later category can avoid the ones before it. Every entity gets a
//! bounded number of draws; running out fails the whole generation instead of
//! spinning forever on an over-crowded board.

use crate::{
    BlockQuery, Categories, Category, DuelError, DuelResult, GameConfig, Generator, GridIndex,
    Position,
};
use rand::Rng;
use std::collections::BTreeSet;

/// Minimum free ring around a player with respect to the other player.
const PLAYER_SPACING: u32 = 1;

/// Minimum free ring around a board weapon with respect to other weapons.
const WEAPON_SPACING: u32 = 2;

/// Starting coordinates for every placed entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub obstacles: BTreeSet<Position>,
    /// Positions of the first and second player
    pub players: [Position; 2],
    /// Positions of board weapons, in catalog order
    pub weapons: Vec<Position>,
}

/// Generator for the starting layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementGenerator;

impl PlacementGenerator {
    /// Creates a placement generator.
    pub fn new() -> Self {
        Self
    }

    fn place<R, F>(
        &self,
        config: &GameConfig,
        rng: &mut R,
        category: Category,
        mut accept: F,
    ) -> DuelResult<Position>
    where
        R: Rng + ?Sized,
        F: FnMut(Position) -> bool,
    {
        for _ in 0..config.max_placement_attempts {
            let candidate = random_position(rng, config.grid_size);
            if accept(candidate) {
                return Ok(candidate);
            }
        }

        log::warn!(
            "Gave up placing a {} after {} attempts on a {}x{} board",
            category,
            config.max_placement_attempts,
            config.grid_size,
            config.grid_size
        );
        Err(DuelError::PlacementExhausted {
            category: category.to_string(),
            attempts: config.max_placement_attempts,
        })
    }
}

impl Generator<Layout> for PlacementGenerator {
    fn generate<R: Rng + ?Sized>(&self, config: &GameConfig, rng: &mut R) -> DuelResult<Layout> {
        config.validate()?;

        let mut index = GridIndex::new();
        let free = BlockQuery::new(Categories::ALL);

        let obstacle_count = usize::try_from(config.grid_size - 1).unwrap_or(0);
        let mut obstacles = BTreeSet::new();
        while obstacles.len() < obstacle_count {
            let position =
                self.place(config, rng, Category::Obstacles, |p| !index.is_blocked(p, &free))?;
            index.insert(Category::Obstacles, position);
            obstacles.insert(position);
        }

        let spaced_players =
            BlockQuery::new(Categories::only(Category::Players)).with_bound(PLAYER_SPACING);
        let mut players = [Position::new(0, 0); 2];
        for slot in players.iter_mut() {
            let position = self.place(config, rng, Category::Players, |p| {
                !index.is_blocked(p, &free) && !index.is_blocked(p, &spaced_players)
            })?;
            index.insert(Category::Players, position);
            *slot = position;
        }

        let spaced_weapons =
            BlockQuery::new(Categories::only(Category::Weapons)).with_bound(WEAPON_SPACING);
        let mut weapons = Vec::new();
        for _ in config.board_weapons() {
            let position = self.place(config, rng, Category::Weapons, |p| {
                !index.is_blocked(p, &free) && !index.is_blocked(p, &spaced_weapons)
            })?;
            index.insert(Category::Weapons, position);
            weapons.push(position);
        }

        let layout = Layout {
            obstacles,
            players,
            weapons,
        };
        self.validate(&layout, config)?;
        Ok(layout)
    }

    fn validate(&self, layout: &Layout, config: &GameConfig) -> DuelResult<()> {
        let all: Vec<Position> = layout
            .obstacles
            .iter()
            .chain(layout.players.iter())
            .chain(layout.weapons.iter())
            .copied()
            .collect();

        if let Some(pos) = all.iter().find(|p| !p.in_bounds(config.grid_size)) {
            return Err(DuelError::InvalidState(format!(
                "placed entity at {} is off the board",
                pos
            )));
        }

        let distinct: BTreeSet<Position> = all.iter().copied().collect();
        if distinct.len() != all.len() {
            return Err(DuelError::InvalidState(
                "two placed entities share a cell".to_string(),
            ));
        }

        let mut others = GridIndex::new();
        others.insert(Category::Players, layout.players[0]);
        let spaced_players =
            BlockQuery::new(Categories::only(Category::Players)).with_bound(PLAYER_SPACING);
        if others.is_blocked(layout.players[1], &spaced_players) {
            return Err(DuelError::InvalidState(
                "players were placed too close together".to_string(),
            ));
        }

        let spaced_weapons =
            BlockQuery::new(Categories::only(Category::Weapons)).with_bound(WEAPON_SPACING);
        let mut placed = GridIndex::new();
        for weapon in &layout.weapons {
            if placed.is_blocked(*weapon, &spaced_weapons) {
                return Err(DuelError::InvalidState(format!(
                    "weapon at {} is too close to another weapon",
                    weapon
                )));
            }
            placed.insert(Category::Weapons, *weapon);
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "PlacementGenerator"
    }
}

/// Uniformly random cell on a board of the given size.
pub fn random_position<R: Rng + ?Sized>(rng: &mut R, size: i32) -> Position {
    Position::new(rng.gen_range(1..=size), rng.gen_range(1..=size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_layout_counts() {
        let config = GameConfig::new();
        let mut rng = StdRng::seed_from_u64(42);
        let layout = PlacementGenerator::new().generate(&config, &mut rng).unwrap();

        assert_eq!(layout.obstacles.len(), 9);
        assert_eq!(layout.weapons.len(), config.board_weapons().count());
    }

    #[test]
    fn test_layout_respects_spacing_across_seeds() {
        let config = GameConfig::for_testing();
        let generator = PlacementGenerator::new();

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let layout = generator.generate(&config, &mut rng).unwrap();
            generator.validate(&layout, &config).unwrap();

            let [a, b] = layout.players;
            let apart = !(a.x == b.x && (a.y - b.y).abs() < 2)
                && !(a.y == b.y && (a.x - b.x).abs() < 2);
            assert!(apart, "seed {} placed players at {} and {}", seed, a, b);
        }
    }

    #[test]
    fn test_degenerate_rng_exhausts() {
        // Every draw lands on (1, 1), so the second obstacle can never be placed
        let config = GameConfig::for_testing();
        let mut rng = StepRng::new(0, 0);
        let result = PlacementGenerator::new().generate(&config, &mut rng);

        match result {
            Err(DuelError::PlacementExhausted { category, attempts }) => {
                assert_eq!(category, "obstacle");
                assert_eq!(attempts, config.max_placement_attempts);
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }

    #[test]
    fn test_crowded_board_exhausts() {
        let mut config = GameConfig::new();
        config.grid_size = 2;
        config.max_placement_attempts = 200;
        let mut rng = StdRng::seed_from_u64(3);

        let result = PlacementGenerator::new().generate(&config, &mut rng);
        assert!(matches!(result, Err(DuelError::PlacementExhausted { .. })));
    }

    #[test]
    fn test_unusable_config_is_an_error() {
        let mut rng = StdRng::seed_from_u64(5);
        for size in [0, -3] {
            let mut config = GameConfig::for_testing();
            config.grid_size = size;
            let result = PlacementGenerator::new().generate(&config, &mut rng);
            assert!(matches!(result, Err(DuelError::Config(_))));
        }
    }

    #[test]
    fn test_validate_rejects_overlap() {
        let config = GameConfig::for_testing();
        let layout = Layout {
            obstacles: [Position::new(2, 2)].into_iter().collect(),
            players: [Position::new(2, 2), Position::new(6, 6)],
            weapons: vec![],
        };
        assert!(PlacementGenerator::new().validate(&layout, &config).is_err());
    }

    #[test]
    fn test_validate_rejects_close_weapons() {
        let config = GameConfig::for_testing();
        let layout = Layout {
            obstacles: BTreeSet::new(),
            players: [Position::new(1, 1), Position::new(8, 8)],
            weapons: vec![Position::new(4, 4), Position::new(4, 6)],
        };
        assert!(PlacementGenerator::new().validate(&layout, &config).is_err());
    }

    #[test]
    fn test_random_position_in_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            assert!(random_position(&mut rng, 5).in_bounds(5));
        }
    }

    #[test]
    fn test_generator_type() {
        assert_eq!(PlacementGenerator::new().generator_type(), "PlacementGenerator");
    }
}
