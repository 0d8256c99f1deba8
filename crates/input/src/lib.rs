//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`] and tracks the
//! soft-drop key so its release can restore gravity, including on terminals
//! without key-release events.

pub mod handler;
pub mod map;

pub use neon_tetris_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, is_soft_drop_key, should_quit};
