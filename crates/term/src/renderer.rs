//! TerminalRenderer: flushes framebuffers to the terminal.
//!
//! The first frame, and any frame after a resize or [`TerminalRenderer::invalidate`],
//! repaints everything. Later frames rewrite only the changed spans of each
//! row. Style escapes are emitted per component, so a run of cells that only
//! changes foreground color does not resend the background.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, Emphasis, FrameBuffer, Rgb};

/// Unchanged cells bridged inside a span instead of moving the cursor.
///
/// A cursor move costs around eight bytes; a reprinted board cell costs one
/// to three.
const MERGE_GAP: usize = 3;

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    prev: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            prev: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush()?;
        self.prev = None;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(ResetColor)?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next draw (resize events).
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    /// Draw `fb`, then swap it with the previously drawn frame.
    ///
    /// On return `fb` holds stale contents the caller redraws over, so two
    /// buffers cycle between caller and renderer without cloning.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame(self.prev.as_ref(), fb, &mut self.buf)?;
        self.flush()?;

        match self.prev.as_mut() {
            Some(prev) => std::mem::swap(prev, fb),
            None => self.prev = Some(fb.clone()),
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.out.write_all(&self.buf)?;
        self.out.flush()
    }
}

/// Encode the escape sequence that turns `prev` into `next` on screen.
///
/// Without a previous frame of the same size the whole screen is repainted.
/// Identical frames encode to nothing.
pub fn encode_frame(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> io::Result<()> {
    let mut pen = Pen::default();

    match prev.filter(|p| p.same_size(next)) {
        Some(prev) => {
            for y in 0..next.height() {
                let (old, new) = (prev.row(y), next.row(y));
                if old == new {
                    continue;
                }
                changed_spans(old, new, |start, end| {
                    write_span(out, &mut pen, y, start, &new[start..end])
                })?;
            }
        }
        None => {
            out.queue(terminal::Clear(terminal::ClearType::All))?;
            for y in 0..next.height() {
                write_span(out, &mut pen, y, 0, next.row(y))?;
            }
        }
    }

    if pen.touched {
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(ResetColor)?;
    }
    Ok(())
}

fn write_span(
    out: &mut Vec<u8>,
    pen: &mut Pen,
    y: u16,
    x: usize,
    cells: &[Cell],
) -> io::Result<()> {
    if cells.is_empty() {
        return Ok(());
    }
    out.queue(cursor::MoveTo(x as u16, y))?;
    for cell in cells {
        pen.apply(out, cell.style)?;
        out.queue(Print(cell.ch))?;
    }
    Ok(())
}

/// Call `emit(start, end)` for each half-open run of differing columns,
/// bridging gaps of up to [`MERGE_GAP`] unchanged cells.
fn changed_spans(
    old: &[Cell],
    new: &[Cell],
    mut emit: impl FnMut(usize, usize) -> io::Result<()>,
) -> io::Result<()> {
    let mut span: Option<(usize, usize)> = None;

    for (x, (a, b)) in old.iter().zip(new).enumerate() {
        if a == b {
            continue;
        }
        span = match span {
            Some((start, end)) if x - end <= MERGE_GAP => Some((start, x + 1)),
            Some((start, end)) => {
                emit(start, end)?;
                Some((x, x + 1))
            }
            None => Some((x, x + 1)),
        };
    }

    match span {
        Some((start, end)) => emit(start, end),
        None => Ok(()),
    }
}

/// Terminal style state as last emitted within one frame.
#[derive(Debug, Default)]
struct Pen {
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    emphasis: Emphasis,
    touched: bool,
}

impl Pen {
    fn apply(&mut self, out: &mut Vec<u8>, style: CellStyle) -> io::Result<()> {
        self.touched = true;

        if style.emphasis != self.emphasis {
            // SGR reset also drops colors, so they are re-sent below.
            out.queue(SetAttribute(Attribute::Reset))?;
            self.fg = None;
            self.bg = None;
            match style.emphasis {
                Emphasis::Normal => {}
                Emphasis::Bold => {
                    out.queue(SetAttribute(Attribute::Bold))?;
                }
                Emphasis::Dim => {
                    out.queue(SetAttribute(Attribute::Dim))?;
                }
            }
            self.emphasis = style.emphasis;
        }
        if self.fg != Some(style.fg) {
            out.queue(SetForegroundColor(color(style.fg)))?;
            self.fg = Some(style.fg);
        }
        if self.bg != Some(style.bg) {
            out.queue(SetBackgroundColor(color(style.bg)))?;
            self.bg = Some(style.bg);
        }
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
