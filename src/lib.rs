//! Neon Tetris (workspace facade crate).
//!
//! Re-exports the engine, input and terminal crates under short names and
//! adds the command line, JSON observations and headless replay used by the
//! binary.

pub use neon_tetris_core as core;
pub use neon_tetris_input as input;
pub use neon_tetris_term as term;
pub use neon_tetris_types as types;

pub mod cli;
pub mod observe;
pub mod replay;
