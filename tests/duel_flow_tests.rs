//! Integration tests for complete duels: movement, pickups, battle and game over.

use gridduel::{
    BattleAction, Command, CommandQueue, EventLog, GameEvent, GamePhase, GameState, Outcome,
    PlayerId, Position, Rejection, TurnController, Weapon, WeaponId,
};

/// Builds a started game with the given player positions and weapon damages.
fn duel(first: Position, second: Position, damage: [u32; 2], turn: PlayerId) -> TurnController {
    let mut state = GameState::for_testing(8, first, second);
    state.weapons[0].damage = damage[0];
    state.weapons[1].damage = damage[1];
    let mut controller = TurnController::new(state);
    controller
        .assign_turn_to(turn)
        .expect("turn assignment should succeed");
    controller
}

/// Moves First from (3,1) to (3,3) next to Second at (3,4); Second defends first.
fn battle(damage: [u32; 2]) -> TurnController {
    let mut controller = duel(Position::new(3, 1), Position::new(3, 4), damage, PlayerId::First);
    let outcome = controller.submit_move(Position::new(3, 3)).unwrap();
    assert!(outcome.is_accepted());
    controller
}

#[test]
fn test_vertical_neighbours_enter_battle() {
    let controller = battle([10, 10]);
    let state = controller.state();

    assert_eq!(state.player(PlayerId::First).location, Position::new(3, 3));
    assert!(state.is_battle_active());
    assert_eq!(state.active, PlayerId::Second);
}

#[test]
fn test_horizontal_neighbours_enter_battle() {
    let mut controller = duel(
        Position::new(1, 5),
        Position::new(5, 5),
        [10, 10],
        PlayerId::First,
    );
    controller.submit_move(Position::new(4, 5)).unwrap();
    assert!(controller.state().is_battle_active());
}

#[test]
fn test_diagonal_neighbours_do_not_battle() {
    // First ends on (4,4), diagonal to Second on (3,3)
    let mut controller = duel(
        Position::new(4, 7),
        Position::new(3, 3),
        [10, 10],
        PlayerId::First,
    );
    let outcome = controller.submit_move(Position::new(4, 4)).unwrap();

    assert!(outcome.is_accepted());
    assert!(!controller.state().is_battle_active());
    assert_eq!(controller.state().phase, GamePhase::PlayerTurn);
    assert!(!controller.highlighted_cells().is_empty());
}

#[test]
fn test_battle_events_in_order() {
    let mut controller = duel(Position::new(3, 1), Position::new(3, 4), [10, 10], PlayerId::First);
    let outcome = controller.submit_move(Position::new(3, 3)).unwrap();

    let events = outcome.events();
    assert_eq!(events.len(), 2);
    assert!(matches!(
        &events[0],
        GameEvent::TurnChanged { player, winner: None } if player.name == "Pink"
    ));
    assert_eq!(events[1], GameEvent::BattleModeChanged { active: true });
}

#[test]
fn test_retaliation_alternates_until_defend() {
    let mut controller = battle([10, 10]);
    let mut expected = PlayerId::Second;

    for _ in 0..5 {
        assert_eq!(controller.state().active, expected);
        controller.submit_battle_action(BattleAction::Attack).unwrap();
        expected = expected.opponent();
    }

    // First was attacked twice, Second three times
    assert_eq!(controller.state().player(PlayerId::First).health, 80);
    assert_eq!(controller.state().player(PlayerId::Second).health, 70);
    assert!(controller.state().is_battle_active());

    let defender = controller.state().active;
    controller.submit_battle_action(BattleAction::Defend).unwrap();
    assert!(!controller.state().is_battle_active());
    assert_eq!(controller.state().active, defender);
}

#[test]
fn test_defend_halves_damage() {
    let mut controller = battle([30, 10]);
    controller.submit_battle_action(BattleAction::Defend).unwrap();
    assert_eq!(controller.state().player(PlayerId::Second).health, 85);
}

#[test]
fn test_after_fleeing_the_defender_moves_away() {
    let mut controller = battle([30, 10]);
    controller.submit_battle_action(BattleAction::Defend).unwrap();

    // Second at (3,4) cannot walk through First at (3,3)
    let cells = controller.highlighted_cells().clone();
    assert!(!cells.contains(&Position::new(3, 3)));
    assert!(!cells.contains(&Position::new(3, 2)));
    assert!(cells.contains(&Position::new(3, 7)));

    let outcome = controller.submit_move(Position::new(3, 7)).unwrap();
    assert!(outcome.is_accepted());
    assert_eq!(controller.state().active, PlayerId::First);
}

#[test]
fn test_death_by_attack_declares_attacker_winner() {
    let mut controller = battle([50, 10]);
    let mut log = EventLog::new();

    // Second takes 50, First takes 10, Second takes 50 and dies
    for _ in 0..3 {
        controller
            .submit_battle_action(BattleAction::Attack)
            .unwrap()
            .dispatch(&mut log);
    }

    assert_eq!(controller.state().winner().map(|p| p.id), Some(PlayerId::First));
    assert_eq!(log.count("game_over"), 1);
    assert!(matches!(
        log.last(),
        Some(GameEvent::GameOver { winner }) if winner.name == "Blue"
    ));
}

#[test]
fn test_death_while_fleeing_still_ends_game() {
    let mut controller = battle([10, 200]);
    // Second attacks back, First is now defending against 200 damage
    controller.submit_battle_action(BattleAction::Attack).unwrap();
    controller.submit_battle_action(BattleAction::Defend).unwrap();

    assert_eq!(
        controller.state().phase,
        GamePhase::GameOver {
            winner: PlayerId::Second
        }
    );
    assert_eq!(controller.state().player(PlayerId::First).health, 0);
}

#[test]
fn test_game_over_rejects_everything() {
    let mut controller = battle([100, 10]);
    controller.submit_battle_action(BattleAction::Attack).unwrap();
    let frozen = controller.state().clone();

    let mut queue = CommandQueue::new();
    queue.push(Command::Battle(BattleAction::Attack));
    queue.push(Command::Battle(BattleAction::Defend));
    queue.push(Command::Move(Position::new(3, 2)));
    let mut log = EventLog::new();
    let outcomes = queue.drain(&mut controller, &mut log).unwrap();

    assert!(outcomes
        .iter()
        .all(|o| *o == Outcome::Rejected(Rejection::GameOver)));
    assert!(log.events.is_empty());
    assert_eq!(controller.state(), &frozen);
}

#[test]
fn test_pickup_swap_through_path() {
    let mut controller = duel(Position::new(2, 2), Position::new(8, 8), [10, 10], PlayerId::First);
    let mut state = controller.into_state();
    state.weapons.push(Weapon {
        location: Some(Position::new(3, 2)),
        ..Weapon::new(WeaponId(2), "Axe", 30, "axe")
    });
    state.phase = GamePhase::Idle;
    controller = TurnController::new(state);
    controller.assign_turn_to(PlayerId::First).unwrap();

    let outcome = controller.submit_move(Position::new(5, 2)).unwrap();
    assert!(outcome.is_accepted());

    let state = controller.state();
    assert_eq!(state.weapons.len(), 3);
    assert_eq!(state.held_weapon(PlayerId::First).unwrap().name, "Axe");
    assert_eq!(
        state.weapon(WeaponId(0)).unwrap().location,
        Some(Position::new(3, 2))
    );
    state.check_invariants().unwrap();

    // The turn notification for the next player carries the opponent, unchanged
    assert!(matches!(
        &outcome.events()[0],
        GameEvent::TurnChanged { player, .. } if player.weapon.damage == 10
    ));
}

#[test]
fn test_landing_on_weapon_cell_swaps_weapons() {
    let mut state = GameState::for_testing(8, Position::new(2, 2), Position::new(8, 8));
    state.weapons.push(Weapon {
        location: Some(Position::new(2, 4)),
        ..Weapon::new(WeaponId(2), "Sword", 20, "sword")
    });
    let mut controller = TurnController::new(state);
    controller.assign_turn_to(PlayerId::First).unwrap();
    assert!(controller.highlighted_cells().contains(&Position::new(2, 4)));

    let outcome = controller.submit_move(Position::new(2, 4)).unwrap();
    assert!(outcome.is_accepted());

    let state = controller.state();
    assert_eq!(state.player(PlayerId::First).location, Position::new(2, 4));
    assert_eq!(state.held_weapon(PlayerId::First).unwrap().id, WeaponId(2));
    assert_eq!(
        state.weapon(WeaponId(0)).unwrap().location,
        Some(Position::new(2, 4))
    );
    state.check_invariants().unwrap();

    // Leaving the cell does not pick the dropped dagger back up
    controller
        .submit_move_as(PlayerId::Second, Position::new(8, 7))
        .unwrap();
    controller.submit_move(Position::new(2, 5)).unwrap();
    let state = controller.state();
    assert_eq!(state.held_weapon(PlayerId::First).unwrap().name, "Sword");
    assert_eq!(
        state.weapon(WeaponId(0)).unwrap().location,
        Some(Position::new(2, 4))
    );
}

#[test]
fn test_picked_up_weapon_is_used_in_battle() {
    let mut state = GameState::for_testing(8, Position::new(1, 4), Position::new(6, 4));
    state.weapons.push(Weapon {
        location: Some(Position::new(2, 4)),
        ..Weapon::new(WeaponId(2), "Axe", 30, "axe")
    });
    let mut controller = TurnController::new(state);
    controller.assign_turn_to(PlayerId::First).unwrap();

    // First walks across the axe and stops two cells short of Second
    controller.submit_move(Position::new(4, 4)).unwrap();
    assert!(!controller.state().is_battle_active());
    assert_eq!(controller.state().held_weapon(PlayerId::First).unwrap().damage, 30);

    // Second closes in, First must respond
    controller
        .submit_move_as(PlayerId::Second, Position::new(5, 4))
        .unwrap();
    assert!(controller.state().is_battle_active());
    assert_eq!(controller.state().active, PlayerId::First);

    // First retaliates against the dagger, then Second takes the axe
    controller.submit_battle_action(BattleAction::Attack).unwrap();
    assert_eq!(controller.state().player(PlayerId::First).health, 90);
    controller.submit_battle_action(BattleAction::Attack).unwrap();
    assert_eq!(controller.state().player(PlayerId::Second).health, 70);
}

#[test]
fn test_rejected_move_is_idempotent() {
    let mut controller = duel(Position::new(4, 4), Position::new(8, 8), [10, 10], PlayerId::First);
    let before = controller.state().clone();

    for target in [
        Position::new(5, 5),
        Position::new(4, 4),
        Position::new(4, 8),
        Position::new(0, 4),
    ] {
        let outcome = controller.submit_move(target).unwrap();
        assert_eq!(outcome, Outcome::Rejected(Rejection::InvalidMove));
        assert_eq!(controller.state(), &before);
    }
}
