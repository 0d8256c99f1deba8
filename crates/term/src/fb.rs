//! Character framebuffer the game view draws into.
//!
//! One `Cell` per terminal column. Rows are stored contiguously so the
//! renderer can compare whole rows as slices.

pub use crate::types::Rgb;

/// Text weight. Bold marks falling pieces and headline values, dim marks
/// grid dots and hints; the two never combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Emphasis {
    #[default]
    Normal,
    Bold,
    Dim,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub emphasis: Emphasis,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            emphasis: Emphasis::Normal,
        }
    }

    pub const fn bold(self) -> Self {
        Self {
            emphasis: Emphasis::Bold,
            ..self
        }
    }

    pub const fn dim(self) -> Self {
        Self {
            emphasis: Emphasis::Dim,
            ..self
        }
    }

    pub fn is_bold(&self) -> bool {
        self.emphasis == Emphasis::Bold
    }
}

/// Slate text on the dark panel background.
impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(226, 232, 240), Rgb::new(15, 23, 42))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Cell {
    pub const fn blank(style: CellStyle) -> Self {
        Self { ch: ' ', style }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(CellStyle::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let mut fb = Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
        };
        fb.resize(width, height);
        fb
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn same_size(&self, other: &FrameBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Change dimensions. Contents are unspecified afterwards; callers clear
    /// before drawing. The allocation is kept when shrinking.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells
            .resize(usize::from(width) * usize::from(height), Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells of row `y`; empty when out of range.
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let w = usize::from(self.width);
        let start = usize::from(y) * w;
        &self.cells[start..start + w]
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Set one cell; writes outside the buffer are dropped.
    pub fn set(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Cell { ch, style };
        }
    }

    /// Blank every cell with `style`.
    pub fn clear(&mut self, style: CellStyle) {
        self.cells.fill(Cell::blank(style));
    }

    /// Print `s` from (x, y) and return the column after the last character.
    /// Text running past the right edge is clipped.
    pub fn print(&mut self, x: u16, y: u16, s: &str, style: CellStyle) -> u16 {
        let mut cx = x;
        for ch in s.chars() {
            self.set(cx, y, ch, style);
            cx = cx.saturating_add(1);
        }
        cx
    }

    /// Print `value` in decimal without allocating. Returns the column after
    /// the last digit.
    pub fn print_u32(&mut self, x: u16, y: u16, value: u32, style: CellStyle) -> u16 {
        let mut digits = [b'0'; 10];
        let mut start = digits.len();
        let mut n = value;
        loop {
            start -= 1;
            digits[start] = b'0' + (n % 10) as u8;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        let mut cx = x;
        for &d in &digits[start..] {
            self.set(cx, y, char::from(d), style);
            cx = cx.saturating_add(1);
        }
        cx
    }

    /// Fill a `w` by `h` block whose top-left corner is (x, y).
    pub fn fill(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for py in y..y.saturating_add(h).min(self.height) {
            for px in x..x.saturating_add(w).min(self.width) {
                self.set(px, py, ch, style);
            }
        }
    }

    /// Characters of row `y` as a string, for tests and debugging.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|c| c.ch).collect()
    }
}
