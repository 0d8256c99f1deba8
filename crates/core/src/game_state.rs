//! Game state module - the session state machine
//!
//! `GameState` ties together the board, the falling piece, the randomizer and
//! the score/level/countdown counters. Every public transition takes `&self`
//! and returns the next state; nothing is mutated in place, so callers can
//! keep old states around for replay or diffing.
//!
//! Status transitions:
//!
//! ```text
//! Menu ──startGame──▶ Playing ──countdown hits 0──▶ LevelComplete
//!                      │  ▲                              │
//!          lock at y<1 │  └────────startNextLevel────────┘
//!                      ▼
//!                   GameOver ──startGame──▶ Playing
//! ```

use tracing::{debug, info};

use crate::board::Board;
use crate::pieces::catalog;
use crate::player::Player;
use crate::rng::{Randomizer, UniformRandomizer};
use crate::scoring::{
    level_drop_interval_ms, line_clear_score, release_drop_interval_ms, row_speedup_interval_ms,
    row_threshold_reached,
};
use crate::snapshot::GameSnapshot;
use crate::types::{Command, Direction, PieceKind, Spin, Status, BASE_DROP_MS, LEVEL_DURATION_SECS};

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState<R = UniformRandomizer> {
    board: Board,
    player: Option<Player>,
    next_kind: PieceKind,
    randomizer: R,
    score: u32,
    rows_cleared: u32,
    level: u32,
    seconds_remaining: u32,
    status: Status,
    /// Gravity period; `None` while gravity is suspended.
    drop_interval_ms: Option<u32>,
}

impl GameState<UniformRandomizer> {
    /// Create a session in the menu with a uniform randomizer seeded by `seed`
    pub fn new(seed: u32) -> Self {
        Self::with_randomizer(UniformRandomizer::new(seed))
    }
}

impl Default for GameState<UniformRandomizer> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<R: Randomizer> GameState<R> {
    /// Create a session in the menu drawing pieces from `randomizer`.
    ///
    /// The first "next" piece is drawn immediately so it can be previewed.
    pub fn with_randomizer(mut randomizer: R) -> Self {
        let next_kind = randomizer.next_kind();
        Self {
            board: Board::new(),
            player: None,
            next_kind,
            randomizer,
            score: 0,
            rows_cleared: 0,
            level: 1,
            seconds_remaining: LEVEL_DURATION_SECS,
            status: Status::Menu,
            drop_interval_ms: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next_kind
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Current gravity period, `None` when gravity is inactive.
    pub fn drop_interval_ms(&self) -> Option<u32> {
        self.drop_interval_ms
    }

    /// The survival countdown only runs while playing.
    pub fn countdown_active(&self) -> bool {
        self.status == Status::Playing
    }

    fn playing(&self) -> bool {
        self.status == Status::Playing
    }

    /// Clone, apply `f`, return the clone.
    fn transition(&self, f: impl FnOnce(&mut Self)) -> Self {
        let mut next = self.clone();
        f(&mut next);
        next
    }

    /// Apply an adapter command
    pub fn apply(&self, command: Command) -> Self {
        match command {
            Command::StartGame => self.start_game(),
            Command::StartNextLevel => self.start_next_level(),
            Command::Move(direction) => self.move_player(direction),
            Command::Rotate(spin) => self.rotate_player(spin),
            Command::SoftDropStart => self.soft_drop_start(),
            Command::SoftDropRelease => self.soft_drop_release(),
        }
    }

    /// Menu/GameOver → Playing with a fresh board and counters.
    pub fn start_game(&self) -> Self {
        if !matches!(self.status, Status::Menu | Status::GameOver) {
            return self.clone();
        }
        self.transition(|s| {
            s.board.clear();
            s.score = 0;
            s.rows_cleared = 0;
            s.level = 1;
            s.seconds_remaining = LEVEL_DURATION_SECS;
            s.drop_interval_ms = Some(BASE_DROP_MS);
            s.status = Status::Playing;
            s.spawn_next();
            info!(next = ?s.next_kind, "game started");
        })
    }

    /// LevelComplete → Playing on a cleared board, one level up and faster.
    pub fn start_next_level(&self) -> Self {
        if self.status != Status::LevelComplete {
            return self.clone();
        }
        self.transition(|s| {
            s.board.clear();
            s.level += 1;
            s.drop_interval_ms = Some(level_drop_interval_ms(s.level));
            s.seconds_remaining = LEVEL_DURATION_SECS;
            s.status = Status::Playing;
            s.spawn_next();
            info!(level = s.level, drop_ms = ?s.drop_interval_ms, "next level started");
        })
    }

    /// Shift the falling piece one column; rejected moves change nothing.
    pub fn move_player(&self, direction: Direction) -> Self {
        let Some(player) = self.player.filter(|_| self.playing()) else {
            return self.clone();
        };
        let dx = direction.dx();
        if self.board.has_collision(&player, dx, 0) {
            return self.clone();
        }
        self.transition(|s| s.player = Some(player.translated(dx, 0)))
    }

    /// Rotate the falling piece, kicking it sideways if the rotated shape
    /// collides in place.
    ///
    /// Kick steps accumulate as +1, -2, +3, ... and the search gives up once
    /// the next step would exceed the shape's width. That tests net shifts of
    /// +1, -1 and +2 for the 3- and 4-wide shapes, and only +1 for O.
    pub fn rotate_player(&self, spin: Spin) -> Self {
        let Some(player) = self.player.filter(|_| self.playing()) else {
            return self.clone();
        };

        let mut candidate = player.rotated(spin);
        let width = candidate.shape.size() as i8;
        let mut offset: i8 = 1;

        while self.board.has_collision(&candidate, 0, 0) {
            candidate.x += offset;
            offset = -(offset + offset.signum());
            if offset > width {
                debug!(kind = ?player.kind, "rotation abandoned, no kick fits");
                return self.clone();
            }
        }

        self.transition(|s| s.player = Some(candidate))
    }

    /// Suspend gravity and drop one row immediately.
    pub fn soft_drop_start(&self) -> Self {
        if !self.playing() {
            return self.clone();
        }
        self.transition(|s| s.drop_interval_ms = None).on_gravity()
    }

    /// Resume gravity at the release interval for the current level.
    pub fn soft_drop_release(&self) -> Self {
        if !self.playing() {
            return self.clone();
        }
        self.transition(|s| s.drop_interval_ms = Some(release_drop_interval_ms(s.level)))
    }

    /// One gravity step: move down a row or mark the piece collided.
    ///
    /// Also runs the row-count speed-up, which raises the level without
    /// touching the board or the countdown. This is independent of the
    /// timer-driven level change in [`Self::start_next_level`].
    pub fn gravity_tick(&self) -> Self {
        let Some(player) = self.player.filter(|_| self.playing()) else {
            return self.clone();
        };

        self.transition(|s| {
            if row_threshold_reached(s.rows_cleared, s.level) {
                s.drop_interval_ms = Some(row_speedup_interval_ms(s.level));
                s.level += 1;
                info!(
                    level = s.level,
                    rows = s.rows_cleared,
                    drop_ms = ?s.drop_interval_ms,
                    "row threshold level up"
                );
            }

            s.player = Some(if s.board.has_collision(&player, 0, 1) {
                Player {
                    collided: true,
                    ..player
                }
            } else {
                player.translated(0, 1)
            });
        })
    }

    /// Lock a collided piece into the board.
    ///
    /// A lock with the piece origin above row 1 ends the game. Otherwise full
    /// rows are swept and scored, and the next piece spawns.
    pub fn commit_lock(&self) -> Self {
        let Some(player) = self.player.filter(|p| p.collided && self.playing()) else {
            return self.clone();
        };

        self.transition(|s| {
            s.board.lock_player(&player);
            debug!(kind = ?player.kind, x = player.x, y = player.y, "piece locked");

            if player.y < 1 {
                s.player = None;
                s.status = Status::GameOver;
                s.drop_interval_ms = None;
                info!(score = s.score, level = s.level, "game over");
                return;
            }

            let cleared = s.board.clear_full_rows();
            if !cleared.is_empty() {
                let points = line_clear_score(cleared.len(), s.level);
                s.rows_cleared += cleared.len() as u32;
                s.score += points;
                debug!(rows = ?cleared.as_slice(), points, "rows swept");
            }

            s.spawn_next();
        })
    }

    /// Gravity tick followed by the lock it may trigger.
    pub fn on_gravity(&self) -> Self {
        let next = self.gravity_tick();
        if next.player.is_some_and(|p| p.collided) {
            next.commit_lock()
        } else {
            next
        }
    }

    /// One second of the survival countdown.
    pub fn countdown_tick(&self) -> Self {
        if !self.playing() {
            return self.clone();
        }
        self.transition(|s| {
            if s.seconds_remaining <= 1 {
                s.seconds_remaining = 0;
                s.status = Status::LevelComplete;
                s.drop_interval_ms = None;
                info!(level = s.level, score = s.score, "level complete");
            } else {
                s.seconds_remaining -= 1;
            }
        })
    }

    /// Promote the next kind to the falling piece and draw a new next kind.
    fn spawn_next(&mut self) {
        let kind = self.next_kind;
        self.next_kind = self.randomizer.next_kind();
        self.player = Some(Player::spawn(catalog(kind)));
        debug!(kind = ?kind, next = ?self.next_kind, "piece spawned");
    }

    /// Read-only view for renderers.
    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }

    /// Fill an existing snapshot, avoiding a fresh allocation per frame.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.write_board(&self.board, self.player.as_ref());
        let next = catalog(self.next_kind);
        out.next_kind = next.kind;
        out.next_shape = next.shape;
        out.next_color = next.color;
        out.score = self.score;
        out.level = self.level;
        out.rows_cleared = self.rows_cleared;
        out.seconds_remaining = self.seconds_remaining;
        out.status = self.status;
        out.drop_interval_ms = self.drop_interval_ms;
    }

    #[cfg(test)]
    pub(crate) fn set_player(&mut self, player: Option<Player>) {
        self.player = player;
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::pieces::shape_of;
    use crate::rng::ScriptedRandomizer;
    use crate::types::{Rgb, BOARD_HEIGHT, BOARD_WIDTH};

    fn scripted(kinds: &[PieceKind]) -> GameState<ScriptedRandomizer> {
        GameState::with_randomizer(ScriptedRandomizer::new(kinds.to_vec()))
    }

    fn wall() -> Cell {
        Cell::locked(PieceKind::Z, Rgb::new(9, 9, 9))
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.status, Status::Menu);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.rows_cleared, 0);
        assert_eq!(state.seconds_remaining, 60);
        assert!(state.player.is_none());
        assert!(state.drop_interval_ms.is_none());
    }

    #[test]
    fn test_start_game_promotes_next_piece() {
        let state = scripted(&[PieceKind::T, PieceKind::L, PieceKind::J]);
        assert_eq!(state.next_kind, PieceKind::T);

        let state = state.start_game();
        assert_eq!(state.status, Status::Playing);
        assert_eq!(state.player.unwrap().kind, PieceKind::T);
        assert_eq!(state.next_kind, PieceKind::L);
        assert_eq!(state.drop_interval_ms, Some(1000));
    }

    #[test]
    fn test_start_game_ignored_while_playing() {
        let state = GameState::new(1).start_game();
        let moved = state.move_player(Direction::Right);
        let again = moved.start_game();
        assert_eq!(again.player, moved.player);
    }

    #[test]
    fn test_transitions_do_not_touch_input_state() {
        let state = GameState::new(5).start_game();
        let before = state.player;
        let _ = state.move_player(Direction::Left);
        let _ = state.on_gravity();
        assert_eq!(state.player, before);
    }

    #[test]
    fn test_commands_ignored_in_menu() {
        let state = GameState::new(1);
        for cmd in [
            Command::Move(Direction::Left),
            Command::Rotate(Spin::Clockwise),
            Command::SoftDropStart,
            Command::SoftDropRelease,
            Command::StartNextLevel,
        ] {
            let next = state.apply(cmd);
            assert_eq!(next.status, Status::Menu);
            assert!(next.player.is_none());
            assert!(next.drop_interval_ms.is_none());
        }
    }

    #[test]
    fn test_move_blocked_by_locked_cell() {
        let mut state = scripted(&[PieceKind::O]).start_game();
        // O occupies columns 4-5 on rows 0-1.
        state.board_mut().set(3, 1, wall());

        let next = state.move_player(Direction::Left);
        assert_eq!(next.player.unwrap().x, 4);

        let next = state.move_player(Direction::Right);
        assert_eq!(next.player.unwrap().x, 5);
    }

    #[test]
    fn test_rotate_in_open_space() {
        let state = scripted(&[PieceKind::T]).start_game();
        let next = state.rotate_player(Spin::Clockwise);
        let player = next.player.unwrap();
        assert_eq!(player.x, 4);
        assert_eq!(player.shape, shape_of(PieceKind::T).rotated(Spin::Clockwise));
    }

    #[test]
    fn test_rotate_kicks_off_left_wall() {
        // Vertical I in column 1 of its matrix; at x=-1 it sits in column 0.
        let mut state = scripted(&[PieceKind::I]).start_game();
        let mut player = state.player.unwrap();
        player.x = -1;
        player.y = 5;
        state.set_player(Some(player));

        // Rotated horizontally it spans x-1..x+2 starting at -1: the first
        // kick (+1) brings it to x=0.
        let next = state.rotate_player(Spin::Clockwise);
        let rotated = next.player.unwrap();
        assert_eq!(rotated.x, 0);
        assert_eq!(rotated.shape, player.shape.rotated(Spin::Clockwise));
        assert!(!next.board.has_collision(&rotated, 0, 0));
    }

    #[test]
    fn test_rotate_kick_second_step_goes_left() {
        // Vertical I against the right wall: x=9 puts it in column 10, the
        // horizontal shape would span 9..12 and needs a net -1 kick.
        let mut state = scripted(&[PieceKind::I]).start_game();
        let mut player = state.player.unwrap();
        player.x = 9;
        player.y = 5;
        state.set_player(Some(player));

        let rotated = state.rotate_player(Spin::Clockwise).player.unwrap();
        assert_eq!(rotated.x, 8);
    }

    #[test]
    fn test_rotate_abandoned_when_no_kick_fits() {
        let mut state = scripted(&[PieceKind::I]).start_game();
        let mut player = state.player.unwrap();
        player.y = 5;
        state.set_player(Some(player));

        // Block the horizontal row the rotation would occupy.
        for x in 0..BOARD_WIDTH as i8 {
            if x != 5 {
                state.board_mut().set(x, 6, wall());
            }
        }

        let next = state.rotate_player(Spin::Clockwise);
        assert_eq!(next.player, Some(player));
    }

    #[test]
    fn test_gravity_moves_down_then_collides() {
        let mut state = scripted(&[PieceKind::O, PieceKind::T]).start_game();
        let mut player = state.player.unwrap();
        player.y = BOARD_HEIGHT as i8 - 3;
        state.set_player(Some(player));

        let state = state.gravity_tick();
        assert_eq!(state.player.unwrap().y, BOARD_HEIGHT as i8 - 2);
        assert!(!state.player.unwrap().collided);

        let state = state.gravity_tick();
        assert_eq!(state.player.unwrap().y, BOARD_HEIGHT as i8 - 2);
        assert!(state.player.unwrap().collided);
    }

    #[test]
    fn test_commit_lock_requires_collided() {
        let state = GameState::new(3).start_game();
        let next = state.commit_lock();
        assert_eq!(next.player, state.player);
        assert_eq!(next.board, state.board);
    }

    #[test]
    fn test_lock_at_spawn_row_is_game_over() {
        let mut state = scripted(&[PieceKind::O]).start_game();
        // Something directly below the fresh O.
        state.board_mut().set(4, 2, wall());

        let state = state.on_gravity();
        assert_eq!(state.status, Status::GameOver);
        assert!(state.drop_interval_ms.is_none());
        assert!(state.board.is_locked(4, 0));
        assert!(state.board.is_locked(5, 1));

        let restarted = state.start_game();
        assert_eq!(restarted.status, Status::Playing);
        assert!(restarted.board.cells().iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_lock_below_spawn_row_continues() {
        let mut state = scripted(&[PieceKind::O]).start_game();
        state.board_mut().set(4, 3, wall());

        let state = state.on_gravity(); // y: 0 -> 1
        let state = state.on_gravity(); // collides at y = 1, locks
        assert_eq!(state.status, Status::Playing);
        assert!(state.board.is_locked(4, 1));
        assert_eq!(state.player.unwrap().y, 0);
        assert!(!state.player.unwrap().collided);
    }

    #[test]
    fn test_double_clear_scores_with_level_and_shifts_rows() {
        let mut state = scripted(&[PieceKind::O, PieceKind::T]).start_game();
        state.level = 3;
        state.score = 50;

        // Rows 18 and 19 full except the O's two columns.
        for y in [18, 19] {
            for x in 0..BOARD_WIDTH as i8 {
                if x != 4 && x != 5 {
                    state.board_mut().set(x, y, wall());
                }
            }
        }
        let marker = Cell::locked(PieceKind::L, Rgb::new(7, 7, 7));
        state.board_mut().set(0, 17, marker);
        state.board_mut().set(11, 16, marker);

        let mut player = state.player.unwrap();
        player.y = BOARD_HEIGHT as i8 - 2;
        state.set_player(Some(player));

        let state = state.on_gravity();
        assert_eq!(state.status, Status::Playing);
        assert_eq!(state.score, 50 + 100 * 3);
        assert_eq!(state.rows_cleared, 2);
        assert_eq!(state.level, 3);

        // Rows above the sweep moved down by two.
        assert_eq!(state.board.get(0, 19), Some(marker));
        assert_eq!(state.board.get(11, 18), Some(marker));
        assert!(!state.board.is_locked(0, 17));
        assert!(!state.board.is_locked(11, 16));
        assert!(!state.board.is_locked(4, 19));
        assert_eq!(state.board.cells().iter().filter(|c| c.locked).count(), 2);
        assert_eq!(state.player.unwrap().kind, PieceKind::T);
    }

    #[test]
    fn test_soft_drop_suspends_and_release_restores() {
        let state = GameState::new(9).start_game();
        let y = state.player.unwrap().y;

        let dropping = state.soft_drop_start();
        assert!(dropping.drop_interval_ms.is_none());
        assert_eq!(dropping.player.unwrap().y, y + 1);

        let released = dropping.soft_drop_release();
        assert_eq!(released.drop_interval_ms, Some(900));
    }

    #[test]
    fn test_soft_drop_release_tracks_current_level() {
        let mut state = GameState::new(9).start_game();
        state.level = 3;
        let released = state.soft_drop_start().soft_drop_release();
        assert_eq!(released.drop_interval_ms, Some(700));

        state.level = 12;
        let released = state.soft_drop_start().soft_drop_release();
        assert_eq!(released.drop_interval_ms, Some(100));
    }

    #[test]
    fn test_row_threshold_level_up_keeps_board_and_timer() {
        let mut state = scripted(&[PieceKind::T]).start_game();
        state.rows_cleared = 21;
        state.seconds_remaining = 42;
        state.board_mut().set(0, 19, wall());

        let next = state.gravity_tick();
        assert_eq!(next.level, 2);
        assert_eq!(next.drop_interval_ms, Some(700));
        assert_eq!(next.seconds_remaining, 42);
        assert!(next.board.is_locked(0, 19));

        // Threshold for level 2 is 30 rows, so no second bump.
        assert_eq!(next.gravity_tick().level, 2);
    }

    #[test]
    fn test_countdown_completes_level() {
        let mut state = GameState::new(4).start_game();
        state.seconds_remaining = 2;

        let state = state.countdown_tick();
        assert_eq!(state.seconds_remaining, 1);
        assert_eq!(state.status, Status::Playing);

        let state = state.countdown_tick();
        assert_eq!(state.seconds_remaining, 0);
        assert_eq!(state.status, Status::LevelComplete);
        assert!(state.drop_interval_ms.is_none());

        // Frozen: gravity and countdown are no-ops.
        assert_eq!(state.on_gravity().player, state.player);
        assert_eq!(state.countdown_tick().seconds_remaining, 0);
    }

    #[test]
    fn test_start_next_level() {
        let mut state = GameState::new(4).start_game();
        state.status = Status::LevelComplete;
        state.seconds_remaining = 0;
        state.drop_interval_ms = None;
        state.score = 500;
        state.board_mut().set(0, 19, wall());

        let next = state.start_next_level();
        assert_eq!(next.status, Status::Playing);
        assert_eq!(next.level, 2);
        assert_eq!(next.drop_interval_ms, Some(900));
        assert_eq!(next.seconds_remaining, 60);
        assert_eq!(next.score, 500);
        assert!(!next.board.is_locked(0, 19));
        assert!(next.player.is_some());
    }

    #[test]
    fn test_snapshot_overlays_falling_piece() {
        let state = scripted(&[PieceKind::O, PieceKind::S]).start_game();
        let snap = state.snapshot();

        assert_eq!(snap.board[0][4].kind, Some(PieceKind::O));
        assert!(!snap.board[0][4].locked);
        assert_eq!(snap.next_kind, PieceKind::S);
        assert_eq!(snap.status, Status::Playing);
        assert_eq!(snap.seconds_remaining, 60);
    }
}
