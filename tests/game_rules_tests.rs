//! Game rules tests - driving the engine through its public commands

use classic_tetris::core::{GameState, PieceRule};
use classic_tetris::types::{GameAction, PieceKind, Rotation, SPAWN_X, SPAWN_Y};

/// First seed whose opening piece is `kind`.
fn game_starting_with(kind: PieceKind) -> GameState {
    (1..10_000)
        .map(GameState::new)
        .find(|g| g.active().map(|p| p.kind) == Some(kind))
        .expect("some seed opens with the requested piece")
}

fn play_until_game_over(game: &mut GameState) -> usize {
    let mut drops = 0;
    while !game.game_over() && drops < 200 {
        game.hard_drop();
        drops += 1;
    }
    drops
}

#[test]
fn test_new_game_defaults() {
    let game = GameState::new(12345);

    assert!(!game.game_over());
    assert_eq!(game.score(), 0);
    assert_eq!(game.level(), 1);
    assert_eq!(game.lines(), 0);
    assert_eq!(game.fall_interval_ms(), 500);
    assert!(game.can_hold());
    assert_eq!(game.hold_piece(), None);
    assert_eq!(game.piece_rule(), PieceRule::Uniform);

    let active = game.active().unwrap();
    assert_eq!((active.x, active.y), (SPAWN_X, SPAWN_Y));
    assert_eq!(active.rotation, Rotation::North);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = GameState::new(777);
    let mut b = GameState::new(777);

    for i in 0..30 {
        let action = match i % 4 {
            0 => GameAction::MoveLeft,
            1 => GameAction::Rotate,
            2 => GameAction::MoveRight,
            _ => GameAction::HardDrop,
        };
        assert_eq!(a.apply_action(action), b.apply_action(action));
        assert_eq!(a.snapshot(), b.snapshot());
    }
}

#[test]
fn test_hard_drop_o_on_empty_board() {
    let mut game = game_starting_with(PieceKind::O);

    assert!(game.hard_drop());

    assert_eq!(game.score(), 36);
    for (x, y) in [(3, 18), (4, 18), (3, 19), (4, 19)] {
        assert_eq!(game.board().get(x, y), Some(Some(PieceKind::O)));
    }
    assert_eq!(game.lines(), 0);
    assert_eq!(game.active().unwrap().y, 0);
    assert!(game.can_hold());
}

#[test]
fn test_soft_drop_and_gravity() {
    let mut game = game_starting_with(PieceKind::T);

    assert!(game.soft_drop_step());
    assert_eq!(game.score(), 1);
    assert_eq!(game.active().unwrap().y, 1);

    assert!(!game.tick(499));
    assert_eq!(game.active().unwrap().y, 1);
    assert!(game.tick(1));
    assert_eq!(game.active().unwrap().y, 2);
    // Gravity does not score.
    assert_eq!(game.score(), 1);
}

#[test]
fn test_ghost_matches_landing_position() {
    let mut game = game_starting_with(PieceKind::L);
    game.move_left();
    game.rotate();

    let ghost = game.ghost_cells();
    let mut dropped = game.clone();
    while dropped.soft_drop_step() {}
    assert_eq!(dropped.active_cells(), ghost);
    assert_eq!(dropped.active().unwrap().y, game.ghost_y().unwrap());

    // Querying the ghost leaves the piece where it was.
    assert_eq!(game.active().unwrap().y, 0);
}

#[test]
fn test_hold_once_per_piece() {
    let mut game = game_starting_with(PieceKind::I);
    let next = game.next_piece();

    assert!(game.hold());
    assert_eq!(game.hold_piece(), Some(PieceKind::I));
    assert_eq!(game.active().unwrap().kind, next);
    assert!(!game.hold());

    assert!(game.hard_drop());
    assert!(game.can_hold());
    assert!(game.hold());
    let active = game.active().unwrap();
    assert_eq!(active.kind, PieceKind::I);
    assert_eq!((active.x, active.y, active.rotation), (SPAWN_X, SPAWN_Y, Rotation::North));
}

#[test]
fn test_wall_stops_movement() {
    let mut game = game_starting_with(PieceKind::O);

    let mut moves = 0;
    while game.move_right() {
        moves += 1;
    }
    // O occupies columns 3-4 at spawn; it can reach 8-9.
    assert_eq!(moves, 5);
    assert_eq!(game.active().unwrap().x, 8);
}

#[test]
fn test_stacking_in_place_ends_the_game() {
    let mut game = GameState::new(2024);

    let drops = play_until_game_over(&mut game);
    assert!(game.game_over(), "no game over after {drops} drops");
    assert_eq!(game.lines(), 0);

    // The colliding piece stays current.
    assert!(game.active().is_some());
    let snap = game.snapshot();
    assert!(snap.game_over);
    assert!(snap.active.is_some());
}

#[test]
fn test_game_over_rejects_commands() {
    let mut game = GameState::new(99);
    play_until_game_over(&mut game);
    let before = game.snapshot();

    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::Rotate,
        GameAction::Hold,
    ] {
        assert!(!game.apply_action(action), "{action:?}");
    }
    assert!(!game.tick(10_000));
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_restart_after_game_over() {
    let mut game = GameState::with_rule(5, PieceRule::Bag7);
    play_until_game_over(&mut game);
    assert!(game.score() > 0);

    assert!(game.apply_action(GameAction::Restart));

    assert!(!game.game_over());
    assert_eq!(game.score(), 0);
    assert_eq!(game.level(), 1);
    assert_eq!(game.lines(), 0);
    assert_eq!(game.hold_piece(), None);
    assert!(game.board().cells().iter().all(|c| c.is_none()));
    assert_eq!(game.piece_rule(), PieceRule::Bag7);
    assert!(game.active().is_some());
}

#[test]
fn test_lock_events_are_taken_once() {
    let mut game = GameState::new(31337);
    assert!(game.take_last_event().is_none());

    let kind = game.active().unwrap().kind;
    game.hard_drop();

    let event = game.take_last_event().unwrap();
    assert_eq!(event.kind, kind);
    assert_eq!(event.lines_cleared, 0);
    assert_eq!(event.line_clear_score, 0);
    assert!(!event.game_over);
    assert!(game.take_last_event().is_none());
}

#[test]
fn test_bag7_deals_each_kind_once_per_bag() {
    let mut game = GameState::with_rule(8, PieceRule::Bag7);

    let mut seen = Vec::new();
    for _ in 0..7 {
        seen.push(game.active().unwrap().kind);
        game.hard_drop();
    }
    seen.sort_by_key(|k| k.index());
    assert_eq!(seen, PieceKind::ALL.to_vec());
}
