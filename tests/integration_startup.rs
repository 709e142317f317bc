//! Integration test to ensure a game can be set up and played without errors.

use gridduel::{
    initialise, DuelError, DuelResult, GameConfig, GamePhase, GameState, Outcome, PlayerId,
    TurnController,
};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn test_basic_startup() -> DuelResult<()> {
    let mut rng = StdRng::seed_from_u64(12345);
    let controller = initialise(GameConfig::new(), &mut rng)?;
    let state = controller.state();

    // Verify the game state is properly initialized
    assert_eq!(state.phase, GamePhase::PlayerTurn);
    assert!(!controller.highlighted_cells().is_empty());
    assert_eq!(state.obstacles.len(), 9);
    state.check_invariants()?;

    // Every highlighted cell lies on the active player's row or column
    let origin = state.active_player().location;
    for cell in controller.highlighted_cells() {
        assert!(cell.is_aligned_with(origin));
        assert!(cell.in_bounds(state.size));
    }

    Ok(())
}

#[test]
fn test_first_move_is_accepted() -> DuelResult<()> {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut controller = initialise(GameConfig::new(), &mut rng)?;
    let mover = controller.state().active;

    let target = *controller
        .highlighted_cells()
        .iter()
        .next()
        .expect("starting player should be able to move");
    let outcome = controller.submit_move(target)?;

    assert!(matches!(outcome, Outcome::Accepted(_)));
    assert_eq!(controller.state().player(mover).location, target);
    assert_eq!(controller.state().active, mover.opponent());
    Ok(())
}

#[test]
fn test_starting_player_varies_with_seed() {
    let mut seen = [false; 2];
    for seed in 0..40 {
        let mut rng = StdRng::seed_from_u64(seed);
        let controller = initialise(GameConfig::for_testing(), &mut rng).unwrap();
        seen[controller.state().active.index()] = true;
    }
    assert_eq!(seen, [true, true]);
}

#[test]
fn test_new_game_is_a_fresh_value() -> DuelResult<()> {
    let config = GameConfig::for_testing();
    let first = GameState::generate(&config, &mut StdRng::seed_from_u64(1))?;
    let second = GameState::generate(&config, &mut StdRng::seed_from_u64(2))?;
    assert_ne!(first, second);

    let mut controller = TurnController::new(first);
    controller.assign_turn_to(PlayerId::First)?;
    assert_eq!(controller.state().phase, GamePhase::PlayerTurn);
    Ok(())
}

#[test]
fn test_invalid_config_is_fatal() {
    let mut config = GameConfig::new();
    config.default_weapon = "Slingshot".to_string();
    let mut rng = StdRng::seed_from_u64(5);
    assert!(matches!(
        initialise(config, &mut rng),
        Err(DuelError::Config(_))
    ));
}

#[test]
fn test_overcrowded_board_fails_fast() {
    let mut config = GameConfig::new();
    config.grid_size = 3;
    config.max_placement_attempts = 100;
    let mut rng = StdRng::seed_from_u64(5);
    assert!(matches!(
        initialise(config, &mut rng),
        Err(DuelError::PlacementExhausted { .. })
    ));
}
