//! Board module - manages the game grid
//!
//! The board is a 12x20 grid of settled cells stored as a flat array for
//! cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..11 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::player::Player;
use crate::types::{PieceKind, Rgb, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// A single grid cell.
///
/// Invariant: an empty cell (`kind == None`) is never locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub kind: Option<PieceKind>,
    pub color: Rgb,
    pub locked: bool,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        kind: None,
        color: Rgb::BLACK,
        locked: false,
    };

    /// A settled cell of the given kind and color.
    pub fn locked(kind: PieceKind, color: Rgb) -> Self {
        Self {
            kind: Some(kind),
            color,
            locked: true,
        }
    }

    /// A cell of the falling piece drawn over the board.
    pub fn falling(kind: PieceKind, color: Rgb) -> Self {
        Self {
            kind: Some(kind),
            color,
            locked: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::EMPTY
    }
}

/// Row indices removed by one sweep, sorted top to bottom.
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 12 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::EMPTY; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y); `None` if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y); returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether (x, y) is inside the grid and holds a settled cell.
    pub fn is_locked(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Cell { locked: true, .. }))
    }

    /// One row as a slice of `BOARD_WIDTH` cells, `None` below the floor.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let width = BOARD_WIDTH as usize;
        let start = y * width;
        Some(&self.cells[start..start + width])
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// A row is full when none of its cells is empty.
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| !cell.is_empty()))
    }

    /// Collision test for `player` shifted by (dx, dy).
    ///
    /// Occupied shape cells left, right or below the grid collide, as do cells
    /// landing on a locked cell. Cells above row 0 do not collide.
    pub fn has_collision(&self, player: &Player, dx: i8, dy: i8) -> bool {
        player.cells().any(|(x, y)| {
            let x = x + dx;
            let y = y + dy;
            if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
                return true;
            }
            y >= 0 && self.is_locked(x, y)
        })
    }

    /// Write the player's in-bounds cells as locked cells of its color.
    ///
    /// Cells above the grid are dropped.
    pub fn lock_player(&mut self, player: &Player) {
        for (x, y) in player.cells() {
            self.set(x, y, Cell::locked(player.kind, player.color));
        }
    }

    /// Remove every full row, shifting the rows above down and refilling the
    /// top with empty rows. Returns the removed row indices.
    ///
    /// Uses a two-pointer pass from the bottom up, without allocation.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * width;
                    self.cells.copy_within(src..src + width, write_y * width);
                }
            }
        }

        self.cells[..write_y * width].fill(Cell::EMPTY);

        cleared.reverse();
        cleared
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Sweep full rows from `board`, returning the compacted board and the
/// number of rows removed.
pub fn sweep_rows(board: &Board) -> (Board, usize) {
    let mut next = board.clone();
    let cleared = next.clear_full_rows();
    (next, cleared.len())
}
