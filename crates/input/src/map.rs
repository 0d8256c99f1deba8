//! Key mapping from terminal events to game commands.

use crate::types::{Command, Direction, Spin, Status};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to a game command.
///
/// Enter and Space start a game from the menu or after game over, and
/// continue after a completed level. The engine ignores commands its
/// status does not allow, so play keys are mapped unconditionally.
pub fn handle_key_event(key: KeyEvent, status: Status) -> Option<Command> {
    match key.code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(Command::Move(Direction::Left)),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(Command::Move(Direction::Right)),
        code if is_soft_drop_key(code) => Some(Command::SoftDropStart),

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Command::Rotate(Spin::Clockwise)),
        KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('y')
        | KeyCode::Char('Y') => Some(Command::Rotate(Spin::CounterClockwise)),

        // Session
        KeyCode::Enter | KeyCode::Char(' ') => match status {
            Status::Menu | Status::GameOver => Some(Command::StartGame),
            Status::LevelComplete => Some(Command::StartNextLevel),
            Status::Playing | Status::Paused => None,
        },

        _ => None,
    }
}

/// Keys that drop the piece one row per press.
pub fn is_soft_drop_key(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Down
            | KeyCode::Char('j')
            | KeyCode::Char('J')
            | KeyCode::Char('s')
            | KeyCode::Char('S')
    )
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
