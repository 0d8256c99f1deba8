//! The falling piece.

use crate::pieces::{CatalogEntry, PieceShape};
use crate::types::{PieceKind, Rgb, Spin, SPAWN_X, SPAWN_Y};

/// Active falling piece.
///
/// `(x, y)` is the board position of the shape matrix's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Player {
    pub x: i8,
    pub y: i8,
    pub shape: PieceShape,
    pub kind: PieceKind,
    pub color: Rgb,
    pub collided: bool,
}

impl Player {
    /// New piece at the spawn position in its catalog orientation.
    pub fn spawn(entry: CatalogEntry) -> Self {
        Self {
            x: SPAWN_X,
            y: SPAWN_Y,
            shape: entry.shape,
            kind: entry.kind,
            color: entry.color,
            collided: false,
        }
    }

    /// Absolute board coordinates of the occupied cells.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .occupied()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn rotated(&self, spin: Spin) -> Self {
        Self {
            shape: self.shape.rotated(spin),
            ..*self
        }
    }
}
