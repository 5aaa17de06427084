//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame after `enter`, and any frame whose size differs from the last
//! one, is a full redraw. Every other frame only rewrites the runs of cells that
//! changed.

use std::io::{self, Write};

use anyhow::{ensure, Context, Result};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::Viewport;

/// Fallback when the terminal size cannot be queried.
const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 80,
    height: 24,
};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.last = None;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        Ok(())
    }

    /// Flush `fb` to the terminal and keep it as the diff base for the next call.
    ///
    /// On return `fb` holds the previously drawn frame, ready to be overwritten.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            stale => {
                encode_full_into(fb, &mut self.buf)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    /// Current terminal size, or 80x24 if it cannot be read.
    pub fn viewport(&self) -> Viewport {
        terminal::size()
            .map(|(w, h)| Viewport::new(w, h))
            .unwrap_or(DEFAULT_VIEWPORT)
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout
            .write_all(&self.buf)
            .and_then(|_| self.stdout.flush())
            .context("write to terminal")
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Clear the screen and paint every cell of `fb` into `out`, one row per cursor move.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::new(out);
    for y in 0..fb.height() {
        pen.paint_run(fb, 0, y, fb.width())?;
    }
    pen.finish()
}

/// Paint only the cells of `next` that differ from `prev`. Both buffers must
/// have the same size; the renderer sends resized frames through
/// [`encode_full_into`].
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    ensure!(
        prev.width() == next.width() && prev.height() == next.height(),
        "diff between {}x{} and {}x{} frames",
        prev.width(),
        prev.height(),
        next.width(),
        next.height()
    );

    let mut pen = Pen::new(out);
    for y in 0..next.height() {
        for (x, len) in changed_runs(prev, next, y) {
            pen.paint_run(next, x, y, len)?;
        }
    }
    pen.finish()
}

/// Spans `(x, len)` of row `y` where the two buffers disagree.
fn changed_runs<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
    y: u16,
) -> impl Iterator<Item = (u16, u16)> + 'a {
    let w = next.width();
    let differs = move |x: u16| prev.get(x, y) != next.get(x, y);
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < w && !differs(x) {
            x += 1;
        }
        if x == w {
            return None;
        }
        let start = x;
        while x < w && differs(x) {
            x += 1;
        }
        Some((start, x - start))
    })
}

/// Writes cells, emitting colour and attribute changes only when the style moves.
struct Pen<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Pen<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn paint_run(&mut self, fb: &FrameBuffer, x: u16, y: u16, len: u16) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        for cx in x..x + len {
            let cell = fb.get(cx, y).unwrap_or_default();
            self.set_style(cell.style)?;
            self.out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn set_style(&mut self, next: CellStyle) -> Result<()> {
        let prev = self.style.replace(next);
        if prev == Some(next) {
            return Ok(());
        }
        // Bold and dim can only be cleared by a full attribute reset, which also
        // drops the colours.
        let reset = prev.map_or(true, |p| (p.bold && !next.bold) || (p.dim && !next.dim));
        if reset {
            self.out.queue(SetAttribute(Attribute::Reset))?;
        }
        if reset || prev.map(|p| p.fg) != Some(next.fg) {
            self.out.queue(SetForegroundColor(next.fg.into()))?;
        }
        if reset || prev.map(|p| p.bg) != Some(next.bg) {
            self.out.queue(SetBackgroundColor(next.bg.into()))?;
        }
        if next.bold && (reset || prev.map_or(true, |p| !p.bold)) {
            self.out.queue(SetAttribute(Attribute::Bold))?;
        }
        if next.dim && (reset || prev.map_or(true, |p| !p.dim)) {
            self.out.queue(SetAttribute(Attribute::Dim))?;
        }
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}
