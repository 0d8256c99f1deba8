//! Integration tests for the game lifecycle

use neon_tetris::core::{GameState, Randomizer, ScriptedRandomizer};
use neon_tetris::types::{Command, Direction, PieceKind, Spin, Status, BOARD_HEIGHT};

fn scripted(kinds: &[PieceKind]) -> GameState<ScriptedRandomizer> {
    GameState::with_randomizer(ScriptedRandomizer::new(kinds.to_vec()))
}

/// Apply gravity until the current piece locks (a new piece spawns higher up,
/// or the game ends).
fn drop_until_lock<R: Randomizer>(mut state: GameState<R>) -> GameState<R> {
    for _ in 0..(BOARD_HEIGHT as usize * 2) {
        let y = state.player().map(|p| p.y);
        state = state.on_gravity();
        if state.status() != Status::Playing || state.player().map(|p| p.y) < y {
            return state;
        }
    }
    panic!("piece never locked");
}

fn apply_all<R: Randomizer>(state: GameState<R>, commands: &[Command]) -> GameState<R> {
    commands.iter().fold(state, |s, c| s.apply(*c))
}

#[test]
fn test_new_game_is_clean() {
    let state = GameState::new(12345).start_game();

    assert_eq!(state.status(), Status::Playing);
    assert_eq!(state.score(), 0);
    assert_eq!(state.level(), 1);
    assert_eq!(state.rows_cleared(), 0);
    assert_eq!(state.seconds_remaining(), 60);
    assert_eq!(state.drop_interval_ms(), Some(1000));
    assert!(state.board().cells().iter().all(|c| c.is_empty()));
}

#[test]
fn test_spawned_piece_always_fits() {
    for seed in 1..200 {
        let state = GameState::new(seed).start_game();
        let player = state.player().copied().unwrap();
        assert_eq!((player.x, player.y), (4, 0));
        assert!(!state.board().has_collision(&player, 0, 0), "seed {}", seed);
    }
}

#[test]
fn test_same_seed_same_session() {
    let script = [
        Command::StartGame,
        Command::Move(Direction::Left),
        Command::Rotate(Spin::Clockwise),
        Command::SoftDropStart,
        Command::SoftDropRelease,
    ];
    let a = apply_all(GameState::new(77), &script);
    let b = apply_all(GameState::new(77), &script);
    assert_eq!(a.snapshot(), b.snapshot());

    let a = drop_until_lock(a);
    let b = drop_until_lock(b);
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_move_left_at_wall_is_rejected() {
    let mut state = scripted(&[PieceKind::O, PieceKind::T]).start_game();
    for _ in 0..4 {
        state = state.move_player(Direction::Left);
    }
    assert_eq!(state.player().unwrap().x, 0);

    let blocked = state.move_player(Direction::Left);
    assert_eq!(blocked.player(), state.player());
}

#[test]
fn test_piece_locks_at_floor_and_next_spawns() {
    let state = scripted(&[PieceKind::O, PieceKind::T]).start_game();
    assert_eq!(state.next_kind(), PieceKind::T);

    let state = drop_until_lock(state);
    assert_eq!(state.status(), Status::Playing);
    assert!(state.board().is_locked(4, 18));
    assert!(state.board().is_locked(5, 19));

    let player = state.player().unwrap();
    assert_eq!(player.kind, PieceKind::T);
    assert_eq!((player.x, player.y), (4, 0));
    assert_eq!(state.next_kind(), PieceKind::O);
}

#[test]
fn test_countdown_to_level_complete() {
    let mut state = GameState::new(5).start_game();
    for _ in 0..59 {
        state = state.countdown_tick();
    }
    assert_eq!(state.seconds_remaining(), 1);
    assert_eq!(state.status(), Status::Playing);

    let state = state.countdown_tick();
    assert_eq!(state.seconds_remaining(), 0);
    assert_eq!(state.status(), Status::LevelComplete);
    assert_eq!(state.drop_interval_ms(), None);

    // Play commands are ignored while the level is complete.
    let frozen = state.apply(Command::Move(Direction::Left));
    assert_eq!(frozen.player(), state.player());

    let next = state.apply(Command::StartNextLevel);
    assert_eq!(next.status(), Status::Playing);
    assert_eq!(next.level(), 2);
    assert_eq!(next.drop_interval_ms(), Some(900));
    assert_eq!(next.seconds_remaining(), 60);
}

#[test]
fn test_completing_a_row_scores_and_shifts() {
    // Three horizontal I pieces fill row 19 exactly.
    let state = scripted(&[PieceKind::I]).start_game();

    let state = apply_all(
        state,
        &[
            Command::Rotate(Spin::Clockwise),
            Command::Move(Direction::Left),
            Command::Move(Direction::Left),
            Command::Move(Direction::Left),
            Command::Move(Direction::Left),
        ],
    );
    let state = drop_until_lock(state);
    let state = drop_until_lock(state.rotate_player(Spin::Clockwise));
    assert_eq!(state.score(), 0);
    assert_eq!(state.board().row(19).unwrap().iter().filter(|c| c.locked).count(), 8);

    let state = apply_all(
        state,
        &[
            Command::Rotate(Spin::Clockwise),
            Command::Move(Direction::Right),
            Command::Move(Direction::Right),
            Command::Move(Direction::Right),
            Command::Move(Direction::Right),
        ],
    );
    assert_eq!(state.player().unwrap().x, 8);

    let before = state.score();
    let state = drop_until_lock(state);
    assert_eq!(state.score(), before + 40 * state.level());
    assert_eq!(state.rows_cleared(), 1);
    assert!(state.board().cells().iter().all(|c| c.is_empty()));
}

#[test]
fn test_stacking_to_the_top_ends_the_game() {
    let mut state = scripted(&[PieceKind::O]).start_game();
    // Each O stacks two rows higher in columns 4-5 until one locks at y = 0.
    for _ in 0..12 {
        state = drop_until_lock(state);
        if state.status() == Status::GameOver {
            break;
        }
    }
    assert_eq!(state.status(), Status::GameOver);
    assert_eq!(state.drop_interval_ms(), None);
    assert!(state.player().is_none());

    let restarted = state.apply(Command::StartGame);
    assert_eq!(restarted.status(), Status::Playing);
    assert_eq!(restarted.score(), 0);
    assert!(restarted.board().cells().iter().all(|c| c.is_empty()));
}

#[test]
fn test_soft_drop_flow() {
    let state = GameState::new(3).start_game();
    let state = state.apply(Command::SoftDropStart);
    assert_eq!(state.drop_interval_ms(), None);
    assert_eq!(state.player().unwrap().y, 1);

    let state = state.apply(Command::SoftDropStart);
    assert_eq!(state.player().unwrap().y, 2);

    let state = state.apply(Command::SoftDropRelease);
    assert_eq!(state.drop_interval_ms(), Some(900));
}
