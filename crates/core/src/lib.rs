//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules, state transitions and timers of the
//! neon falling-block game. It has **no dependencies** on terminals or I/O:
//!
//! - **Deterministic**: the randomizer is part of the state, so a seed fixes a session
//! - **Pure transitions**: every operation takes a state and returns the next one
//! - **Portable**: runs in a terminal, a headless replay, or a test
//!
//! # Module Structure
//!
//! - [`board`]: 12x20 grid, collision tests and row sweeping
//! - [`pieces`]: the 7-piece catalog and matrix rotation
//! - [`player`]: the falling piece
//! - [`rng`]: uniform piece selection (no bag), plus a scripted randomizer for tests
//! - [`scoring`]: line-clear points and gravity intervals
//! - [`game_state`]: the session state machine (menu, playing, level complete, game over)
//! - [`clock`]: gravity and countdown timers
//! - [`snapshot`]: render-ready view with the falling piece merged into the board
//!
//! # Game Rules
//!
//! - **Survival levels**: a level is complete after 60 seconds without topping out
//! - **Gravity**: 1000ms at level 1, 100ms faster per level, never below 100ms
//! - **Simple wall kick**: a blocked rotation tries small sideways shifts
//! - **Scoring**: 40/100/300/1200 for 1-4 rows, times the level
//! - **Row speed-up**: clearing more than `(level + 1) * 10` rows also raises the level
//!
//! # Example
//!
//! ```
//! use neon_tetris_core::GameState;
//! use neon_tetris_core::types::{Direction, Status};
//!
//! let game = GameState::new(12345).start_game();
//! assert_eq!(game.status(), Status::Playing);
//!
//! let moved = game.move_player(Direction::Left);
//! assert_eq!(moved.player().unwrap().x, 3);
//!
//! // The old state is untouched.
//! assert_eq!(game.player().unwrap().x, 4);
//! ```

pub mod board;
pub mod clock;
pub mod game_state;
pub mod pieces;
pub mod player;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use neon_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{sweep_rows, Board, Cell};
pub use clock::{GameClock, IntervalTimer};
pub use game_state::GameState;
pub use pieces::{catalog, rotate, CatalogEntry, PieceShape};
pub use player::Player;
pub use rng::{Randomizer, ScriptedRandomizer, SimpleRng, UniformRandomizer};
pub use scoring::{level_drop_interval_ms, line_clear_score, release_drop_interval_ms};
pub use snapshot::{GameSnapshot, RenderGrid};
