//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Cell as BoardCell, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Status, BOARD_HEIGHT, BOARD_WIDTH, LEVEL_DURATION_SECS};

const PANEL_BG: Rgb = Rgb::new(15, 23, 42);
const WELL_BG: Rgb = Rgb::new(2, 6, 23);
const GRID_FG: Rgb = Rgb::new(30, 41, 59);
const BORDER_FG: Rgb = Rgb::new(96, 165, 250);
const LABEL_FG: Rgb = Rgb::new(148, 163, 184);
const VALUE_FG: Rgb = Rgb::new(241, 245, 249);
const TITLE_FG: Rgb = Rgb::new(192, 132, 252);
const ALERT_FG: Rgb = Rgb::new(248, 113, 113);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// One centered overlay line: `text`, then an optional number, then `suffix`.
#[derive(Debug, Clone, Copy)]
struct OverlayLine {
    text: &'static str,
    value: Option<u32>,
    suffix: &'static str,
    style: CellStyle,
}

impl OverlayLine {
    fn text(text: &'static str, style: CellStyle) -> Self {
        Self {
            text,
            value: None,
            suffix: "",
            style,
        }
    }

    fn number(text: &'static str, value: u32, suffix: &'static str, style: CellStyle) -> Self {
        Self {
            text,
            value: Some(value),
            suffix,
            style,
        }
    }

    fn width(&self) -> u16 {
        let digits = self.value.map(digit_count).unwrap_or(0);
        (self.text.chars().count() + self.suffix.chars().count()) as u16 + digits
    }
}

/// Terminal renderer for the neon game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default());

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        fb.fill(
            start_x + 1,
            start_y + 1,
            board_px_w,
            board_px_h,
            ' ',
            CellStyle::new(GRID_FG, WELL_BG),
        );
        let border = CellStyle::new(BORDER_FG, PANEL_BG).bold();
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // The snapshot board already carries the falling piece.
        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                self.draw_board_cell(fb, start_x, start_y, x as u16, y as u16, *cell);
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        match snap.status {
            Status::Menu => self.draw_overlay(
                fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                &[
                    OverlayLine::text("NEON TETRIS", CellStyle::new(TITLE_FG, WELL_BG).bold()),
                    OverlayLine::number(
                        "Survive ",
                        LEVEL_DURATION_SECS,
                        " seconds",
                        overlay_style(),
                    ),
                    OverlayLine::text("to reach the next level.", overlay_style()),
                    OverlayLine::text("ENTER to start", hint_style()),
                ],
            ),
            Status::LevelComplete => self.draw_overlay(
                fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                &[
                    OverlayLine::number(
                        "LEVEL ",
                        snap.level,
                        " CLEARED!",
                        CellStyle::new(TITLE_FG, WELL_BG).bold(),
                    ),
                    OverlayLine::number("ENTER for level ", snap.level + 1, "", hint_style()),
                ],
            ),
            Status::GameOver => self.draw_overlay(
                fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                &[
                    OverlayLine::text("GAME OVER", CellStyle::new(ALERT_FG, WELL_BG).bold()),
                    OverlayLine::number("SCORE ", snap.score, "", overlay_style()),
                    OverlayLine::number("LEVEL ", snap.level, "", overlay_style()),
                    OverlayLine::text("ENTER to retry", hint_style()),
                ],
            ),
            Status::Paused => self.draw_overlay(
                fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                &[OverlayLine::text("PAUSED", overlay_style().bold())],
            ),
            Status::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.set(x, y, '╔', style);
        fb.set(x + w - 1, y, '╗', style);
        fb.set(x, y + h - 1, '╚', style);
        fb.set(x + w - 1, y + h - 1, '╝', style);

        for dx in 1..w - 1 {
            fb.set(x + dx, y, '═', style);
            fb.set(x + dx, y + h - 1, '═', style);
        }
        for dy in 1..h - 1 {
            fb.set(x, y + dy, '║', style);
            fb.set(x + w - 1, y + dy, '║', style);
        }
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        cell: BoardCell,
    ) {
        let px = start_x + 1 + x * self.cell_w;
        let py = start_y + 1 + y * self.cell_h;

        if cell.is_empty() {
            let style = CellStyle::new(GRID_FG, WELL_BG).dim();
            fb.fill(px, py, self.cell_w, self.cell_h, '·', style);
            return;
        }

        // Falling cells glow brighter than settled ones.
        let style = CellStyle::new(cell.color, WELL_BG);
        let style = if cell.locked { style } else { style.bold() };
        fb.fill(px, py, self.cell_w, self.cell_h, '█', style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::new(LABEL_FG, PANEL_BG);
        let value = CellStyle::new(VALUE_FG, PANEL_BG).bold();

        let mut y = start_y;
        fb.print(panel_x, y, "NEON TETRIS", CellStyle::new(TITLE_FG, PANEL_BG).bold());
        y = y.saturating_add(2);

        fb.print(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.print_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.print(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.print_u32(panel_x, y, snap.level, value);
        y = y.saturating_add(2);

        fb.print(panel_x, y, "ROWS", label);
        y = y.saturating_add(1);
        fb.print_u32(panel_x, y, snap.rows_cleared, value);
        y = y.saturating_add(2);

        fb.print(panel_x, y, "TIME", label);
        y = y.saturating_add(1);
        let time_style = if snap.time_running_out() {
            CellStyle::new(ALERT_FG, PANEL_BG).bold()
        } else {
            value
        };
        let end = fb.print_u32(panel_x, y, snap.seconds_remaining, time_style);
        fb.set(end, y, 's', time_style);
        y = y.saturating_add(2);

        fb.print(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        let shape = snap.next_shape;
        let preview = CellStyle::new(snap.next_color, PANEL_BG).bold();
        for (dx, dy) in shape.occupied() {
            let px = panel_x + (dx as u16) * self.cell_w;
            let py = y + dy as u16;
            if py < viewport.height {
                fb.fill(px, py, self.cell_w, 1, '█', preview);
            }
        }
        y = y.saturating_add(shape.size() as u16 + 1);

        let hint = CellStyle::new(LABEL_FG, PANEL_BG).dim();
        for line in ["←/→ move", "↑ rotate  z ccw", "↓ soft drop", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.print(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        lines: &[OverlayLine],
    ) {
        let top = start_y.saturating_add(frame_h.saturating_sub(lines.len() as u16) / 2);
        for (i, line) in lines.iter().enumerate() {
            let y = top.saturating_add(i as u16);
            let x = start_x.saturating_add(frame_w.saturating_sub(line.width()) / 2);
            let mut cx = fb.print(x, y, line.text, line.style);
            if let Some(value) = line.value {
                cx = fb.print_u32(cx, y, value, line.style);
            }
            fb.print(cx, y, line.suffix, line.style);
        }
    }
}

fn overlay_style() -> CellStyle {
    CellStyle::new(VALUE_FG, WELL_BG)
}

fn hint_style() -> CellStyle {
    CellStyle::new(LABEL_FG, WELL_BG).dim()
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
