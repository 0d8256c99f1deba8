use crate::board::{Board, Cell};
use crate::pieces::{catalog, PieceShape};
use crate::player::Player;
use crate::types::{PieceKind, Rgb, Status, BOARD_HEIGHT, BOARD_WIDTH, LEVEL_DURATION_SECS};

pub type RenderGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// Everything a renderer or observer needs for one frame.
///
/// `board` is the settled board with the falling piece drawn over it as
/// unlocked cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: RenderGrid,
    pub next_kind: PieceKind,
    pub next_shape: PieceShape,
    pub next_color: Rgb,
    pub score: u32,
    pub level: u32,
    pub rows_cleared: u32,
    pub seconds_remaining: u32,
    pub status: Status,
    pub drop_interval_ms: Option<u32>,
}

impl GameSnapshot {
    /// Copy `board` into the grid and overlay the in-bounds cells of `player`.
    pub fn write_board(&mut self, board: &Board, player: Option<&Player>) {
        for (dst, src) in self.board.iter_mut().zip(board.rows()) {
            dst.copy_from_slice(src);
        }
        if let Some(player) = player {
            for (x, y) in player.cells() {
                if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
                    continue;
                }
                self.board[y as usize][x as usize] = Cell::falling(player.kind, player.color);
            }
        }
    }

    pub fn playable(&self) -> bool {
        self.status == Status::Playing
    }

    /// Countdown is in its last ten seconds.
    pub fn time_running_out(&self) -> bool {
        self.status == Status::Playing && self.seconds_remaining <= 10
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let next = catalog(PieceKind::I);
        Self {
            board: [[Cell::EMPTY; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            next_kind: next.kind,
            next_shape: next.shape,
            next_color: next.color,
            score: 0,
            level: 1,
            rows_cleared: 0,
            seconds_remaining: LEVEL_DURATION_SECS,
            status: Status::Menu,
            drop_interval_ms: None,
        }
    }
}
