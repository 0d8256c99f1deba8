//! Core types module - shared data structures and constants
//!
//! Everything here is plain data with no external dependencies, so the engine,
//! the terminal adapter and the headless replay tooling can all share it.
//!
//! # Board Dimensions
//!
//! - **Width**: 12 columns (indexed 0-11)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: (4, 0), i.e. `floor(W/2) - 2`
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame loop step of the terminal front-end |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_STEP_MS` | 100 | Interval reduction per completed level |
//! | `MIN_DROP_MS` | 100 | Fastest timer-driven gravity |
//! | `COUNTDOWN_TICK_MS` | 1000 | Survival countdown period |
//!
//! # Examples
//!
//! ```
//! use neon_tetris_types::{Command, PieceKind, Spin, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Command::from_str("rotateCw"), Some(Command::Rotate(Spin::Clockwise)));
//! assert_eq!(BOARD_WIDTH, 12);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (12 columns)
pub const BOARD_WIDTH: u8 = 12;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Column of the spawn origin.
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 2;

/// Row of the spawn origin.
pub const SPAWN_Y: i8 = 0;

/// Frame loop step for interactive front-ends (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Seconds a player must survive to complete a level.
pub const LEVEL_DURATION_SECS: u32 = 60;

/// Period of the survival countdown.
pub const COUNTDOWN_TICK_MS: u32 = 1000;

/// Gravity interval at the start of a game (level 1).
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity speed-up applied by each timer-driven level.
pub const DROP_STEP_MS: u32 = 100;

/// Floor for the timer-driven gravity interval.
pub const MIN_DROP_MS: u32 = 100;

/// Rows per level used by the row-count speed-up.
pub const ROWS_PER_LEVEL: u32 = 10;

/// Offset added by the row-count speed-up (`1000 / (level + 1) + 200`).
pub const ROW_SPEEDUP_OFFSET_MS: u32 = 200;

/// Line clear scoring table, indexed by `rows_cleared - 1`.
///
/// Points are multiplied by the current level (levels start at 1).
pub const LINE_SCORES: [u32; 4] = [40, 100, 300, 1200];

/// The seven tetromino piece kinds
///
/// Catalog colors (see the core crate's catalog):
/// - **I**: Cyan
/// - **J**: Blue
/// - **L**: Orange
/// - **O**: Yellow
/// - **S**: Green
/// - **T**: Purple
/// - **Z**: Red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order. Uniform draws index into this array.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use neon_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase letter used by HUDs and observations.
    pub fn letter(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }
}

/// 24-bit RGB color triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Session status.
///
/// `Paused` is reserved: no engine transition enters or leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    Menu,
    Playing,
    Paused,
    LevelComplete,
    GameOver,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Menu => "menu",
            Status::Playing => "playing",
            Status::Paused => "paused",
            Status::LevelComplete => "levelComplete",
            Status::GameOver => "gameOver",
        }
    }
}

/// Horizontal movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn dx(&self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Rotation sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spin {
    Clockwise,
    CounterClockwise,
}

/// Commands accepted by the game engine.
///
/// Input adapters (keyboard, scripted replays) produce these; the engine
/// ignores any command the current status does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Start a fresh game from the menu or after game over
    StartGame,
    /// Continue after a completed level
    StartNextLevel,
    /// Shift the falling piece one column
    Move(Direction),
    /// Rotate the falling piece (with wall kick)
    Rotate(Spin),
    /// Suspend gravity and drop one row
    SoftDropStart,
    /// Resume gravity at the level's base interval
    SoftDropRelease,
}

impl Command {
    pub const ALL: [Command; 8] = [
        Command::StartGame,
        Command::StartNextLevel,
        Command::Move(Direction::Left),
        Command::Move(Direction::Right),
        Command::Rotate(Spin::Clockwise),
        Command::Rotate(Spin::CounterClockwise),
        Command::SoftDropStart,
        Command::SoftDropRelease,
    ];

    /// Parse a command from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use neon_tetris_types::{Command, Direction};
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::Move(Direction::Left)));
    /// assert_eq!(Command::from_str("startgame"), Some(Command::StartGame));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "startgame" => Some(Command::StartGame),
            "startnextlevel" => Some(Command::StartNextLevel),
            "moveleft" => Some(Command::Move(Direction::Left)),
            "moveright" => Some(Command::Move(Direction::Right)),
            "rotatecw" => Some(Command::Rotate(Spin::Clockwise)),
            "rotateccw" => Some(Command::Rotate(Spin::CounterClockwise)),
            "softdropstart" => Some(Command::SoftDropStart),
            "softdroprelease" => Some(Command::SoftDropRelease),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::StartGame => "startGame",
            Command::StartNextLevel => "startNextLevel",
            Command::Move(Direction::Left) => "moveLeft",
            Command::Move(Direction::Right) => "moveRight",
            Command::Rotate(Spin::Clockwise) => "rotateCw",
            Command::Rotate(Spin::CounterClockwise) => "rotateCcw",
            Command::SoftDropStart => "softDropStart",
            Command::SoftDropRelease => "softDropRelease",
        }
    }
}
