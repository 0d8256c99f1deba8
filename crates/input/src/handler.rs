//! Soft-drop aware input handler for terminal environments.
//!
//! Each soft-drop key press drops one row; the key's release restores
//! gravity. Terminals that never emit release events are covered by a
//! timeout measured from the last soft-drop press.

use crossterm::event::{KeyCode, KeyEvent};

use crate::map::{handle_key_event, is_soft_drop_key};
use crate::types::{Command, Status};

// Longer than the typical auto-repeat gap, so a held key stays held.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Tracks whether soft drop is held.
#[derive(Debug, Clone)]
pub struct InputHandler {
    down_held: bool,
    since_down_ms: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            down_held: false,
            since_down_ms: 0,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn soft_drop_held(&self) -> bool {
        self.down_held
    }

    pub fn handle_key_press(&mut self, key: KeyEvent, status: Status) -> Option<Command> {
        let command = handle_key_event(key, status)?;
        if command == Command::SoftDropStart {
            self.down_held = true;
            self.since_down_ms = 0;
        }
        Some(command)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) -> Option<Command> {
        if is_soft_drop_key(code) {
            return self.release();
        }
        None
    }

    /// Advance the release timeout; yields a release once it expires.
    pub fn update(&mut self, elapsed_ms: u32) -> Option<Command> {
        if !self.down_held {
            return None;
        }
        self.since_down_ms = self.since_down_ms.saturating_add(elapsed_ms);
        if self.since_down_ms > self.key_release_timeout_ms {
            return self.release();
        }
        None
    }

    pub fn reset(&mut self) {
        self.down_held = false;
        self.since_down_ms = 0;
    }

    fn release(&mut self) -> Option<Command> {
        if !self.down_held {
            return None;
        }
        self.reset();
        Some(Command::SoftDropRelease)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn press(ih: &mut InputHandler, code: KeyCode) -> Option<Command> {
        ih.handle_key_press(KeyEvent::from(code), Status::Playing)
    }

    #[test]
    fn test_every_down_press_drops() {
        let mut ih = InputHandler::new();
        assert_eq!(press(&mut ih, KeyCode::Down), Some(Command::SoftDropStart));
        assert_eq!(press(&mut ih, KeyCode::Down), Some(Command::SoftDropStart));
        assert!(ih.soft_drop_held());
    }

    #[test]
    fn test_release_event_restores_gravity_once() {
        let mut ih = InputHandler::new();
        press(&mut ih, KeyCode::Down);

        assert_eq!(ih.handle_key_release(KeyCode::Down), Some(Command::SoftDropRelease));
        assert_eq!(ih.handle_key_release(KeyCode::Down), None);
        assert_eq!(ih.update(1_000), None);
    }

    #[test]
    fn test_auto_release_after_timeout_without_release_events() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(50);
        press(&mut ih, KeyCode::Down);

        assert_eq!(ih.update(50), None);
        assert_eq!(ih.update(1), Some(Command::SoftDropRelease));
        assert!(!ih.soft_drop_held());
    }

    #[test]
    fn test_repeat_press_extends_timeout() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(50);
        press(&mut ih, KeyCode::Down);
        assert_eq!(ih.update(40), None);

        press(&mut ih, KeyCode::Down);
        assert_eq!(ih.update(40), None);
        assert!(ih.soft_drop_held());
    }

    #[test]
    fn test_other_keys_do_not_extend_timeout() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(50);
        press(&mut ih, KeyCode::Down);
        assert_eq!(ih.update(40), None);

        assert_eq!(press(&mut ih, KeyCode::Left), Some(Command::Move(Direction::Left)));
        assert_eq!(ih.update(20), Some(Command::SoftDropRelease));
    }

    #[test]
    fn test_release_of_other_key_is_ignored() {
        let mut ih = InputHandler::new();
        press(&mut ih, KeyCode::Down);
        assert_eq!(ih.handle_key_release(KeyCode::Left), None);
        assert!(ih.soft_drop_held());
    }

    #[test]
    fn test_default_key_release_timeout_is_non_zero() {
        let ih = InputHandler::new();
        assert!(ih.key_release_timeout_ms() > 0);
    }
}
