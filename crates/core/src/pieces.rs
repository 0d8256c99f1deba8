//! Pieces module - the piece catalog and shape rotation
//!
//! Each kind owns a square shape matrix (2x2, 3x3 or 4x4) and a color.
//! Rotation transposes the matrix and then mirrors it, so rotating a shape
//! never needs per-kind tables.

use crate::types::{PieceKind, Rgb, Spin};

/// Largest shape matrix side in the catalog (the I piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Square matrix of piece cells relative to the piece origin.
///
/// Cells outside `size x size` are always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceShape {
    size: u8,
    cells: [[Option<PieceKind>; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl PieceShape {
    /// Build a shape from text rows: `.` is empty, any other char is `kind`.
    ///
    /// Returns `None` unless the rows form a square of side 1..=4.
    pub fn from_pattern(kind: PieceKind, rows: &[&str]) -> Option<Self> {
        let size = rows.len();
        if size == 0 || size > MAX_SHAPE_SIZE {
            return None;
        }

        let mut cells = [[None; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != size {
                return None;
            }
            for (x, ch) in row.chars().enumerate() {
                if ch != '.' {
                    cells[y][x] = Some(kind);
                }
            }
        }

        Some(Self {
            size: size as u8,
            cells,
        })
    }

    /// Side length of the matrix (also its row width).
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Cell at local (x, y); `None` for empty or outside the matrix.
    pub fn get(&self, x: usize, y: usize) -> Option<PieceKind> {
        if x >= self.size as usize || y >= self.size as usize {
            return None;
        }
        self.cells[y][x]
    }

    /// Local offsets of the occupied cells, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size as usize;
        (0..n).flat_map(move |y| {
            (0..n).filter_map(move |x| self.cells[y][x].map(|_| (x as i8, y as i8)))
        })
    }

    /// Rotate by 90° without touching `self`.
    pub fn rotated(&self, spin: Spin) -> Self {
        rotate(self, spin)
    }
}

/// Rotate a shape by 90 degrees.
///
/// The matrix is transposed, then each row is reversed (clockwise) or the row
/// order is reversed (counter-clockwise).
pub fn rotate(shape: &PieceShape, spin: Spin) -> PieceShape {
    let n = shape.size as usize;
    let mut cells = [[None; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];

    for y in 0..n {
        for x in 0..n {
            cells[y][x] = match spin {
                Spin::Clockwise => shape.cells[n - 1 - x][y],
                Spin::CounterClockwise => shape.cells[x][n - 1 - y],
            };
        }
    }

    PieceShape {
        size: shape.size,
        cells,
    }
}

/// Immutable catalog entry for one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CatalogEntry {
    pub kind: PieceKind,
    pub shape: PieceShape,
    pub color: Rgb,
}

fn pattern(kind: PieceKind) -> &'static [&'static str] {
    match kind {
        PieceKind::I => &[".I..", ".I..", ".I..", ".I.."],
        PieceKind::J => &[".J.", ".J.", "JJ."],
        PieceKind::L => &[".L.", ".L.", ".LL"],
        PieceKind::O => &["OO", "OO"],
        PieceKind::S => &[".SS", "SS.", "..."],
        PieceKind::T => &["...", "TTT", ".T."],
        PieceKind::Z => &["ZZ.", ".ZZ", "..."],
    }
}

/// Display color of a kind.
pub fn color_of(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 227, 194),
        PieceKind::J => Rgb::new(59, 130, 246),
        PieceKind::L => Rgb::new(249, 115, 22),
        PieceKind::O => Rgb::new(250, 204, 21),
        PieceKind::S => Rgb::new(74, 222, 128),
        PieceKind::T => Rgb::new(168, 85, 247),
        PieceKind::Z => Rgb::new(239, 68, 68),
    }
}

/// Spawn shape of a kind.
pub fn shape_of(kind: PieceKind) -> PieceShape {
    // Catalog patterns are static squares, so parsing cannot fail.
    PieceShape::from_pattern(kind, pattern(kind)).unwrap_or(PieceShape {
        size: 1,
        cells: [[None; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
    })
}

/// Look up the catalog entry for a kind.
pub fn catalog(kind: PieceKind) -> CatalogEntry {
    CatalogEntry {
        kind,
        shape: shape_of(kind),
        color: color_of(kind),
    }
}
