//! GameView: maps a core [`Frame`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{CellKind, Frame, FRAME_H, FRAME_W};
use crate::fb::{text_width, CellStyle, FrameBuffer, Rgb};
use crate::types::Theme;

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

/// Lines drawn under the board: status, then the key hint.
const FOOTER_ROWS: u16 = 2;

const HINT: &str = "Arrows/WASD/HJKL move | q quit";

const SNAKE: Rgb = Rgb::new(60, 220, 90);
const FOOD: Rgb = Rgb::new(230, 50, 60);
const POWER_UP: Rgb = Rgb::new(255, 235, 90);
const POWER_DOWN: Rgb = Rgb::new(255, 110, 110);

/// A lightweight terminal renderer for the snake board.
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
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Cell size actually used for `viewport`: the configured size when the board
    /// fits horizontally, 1x1 otherwise.
    pub fn cell_size(&self, viewport: Viewport) -> (u16, u16) {
        if FRAME_W as u16 * self.cell_w + 2 > viewport.width {
            (1, 1)
        } else {
            (self.cell_w, self.cell_h)
        }
    }

    /// Render `frame` into an existing framebuffer, with an optional centred banner.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        frame: &Frame,
        theme: Theme,
        banner: Option<&str>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (cell_w, cell_h) = self.cell_size(viewport);
        let frame_w = FRAME_W as u16 * cell_w + 2;
        let frame_h = FRAME_H as u16 * cell_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h + FOOTER_ROWS) / 2,
            AnchorY::Top => 0,
        };

        let bg = background(theme, frame.elapsed_ms);
        let floor = CellStyle::default().on(bg);
        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            floor,
        );
        fb.draw_box(
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::fg(Rgb::new(200, 200, 200)),
        );

        for (y, row) in frame.cells.iter().enumerate() {
            for (x, kind) in row.iter().enumerate() {
                if let Some((ch, style)) = glyph(*kind) {
                    let px = start_x + 1 + x as u16 * cell_w;
                    let py = start_y + 1 + y as u16 * cell_h;
                    fb.fill_rect(px, py, cell_w, cell_h, ' ', floor);
                    fb.put_char(px, py, ch, style.on(bg));
                }
            }
        }

        let status_y = start_y + frame_h;
        fb.put_str(
            start_x,
            status_y,
            &frame.status_text(),
            CellStyle::fg(Rgb::WHITE).bold(),
        );
        fb.put_str(
            start_x,
            status_y + 1,
            HINT,
            CellStyle::fg(Rgb::new(150, 150, 160)).dim(),
        );

        if let Some(text) = banner {
            let padded = format!(" {} ", text);
            let mid_y = start_y + frame_h / 2;
            let style = CellStyle::fg(Rgb::WHITE).bold();
            let w = text_width(&padded);
            fb.fill_rect(
                start_x + frame_w.saturating_sub(w) / 2,
                mid_y,
                w,
                1,
                ' ',
                style,
            );
            fb.put_str_centered(start_x, frame_w, mid_y, &padded, style);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        frame: &Frame,
        theme: Theme,
        banner: Option<&str>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, theme, banner, viewport, &mut fb);
        fb
    }
}

/// Background colours a theme cycles through, two steps per second.
pub fn palette(theme: Theme) -> &'static [Rgb] {
    const DEFAULT: [Rgb; 4] = [
        Rgb::new(0, 0, 0),
        Rgb::new(0, 0, 110),
        Rgb::new(90, 0, 90),
        Rgb::new(0, 90, 100),
    ];
    const BLUE: [Rgb; 2] = [Rgb::new(0, 0, 150), Rgb::new(0, 130, 150)];
    const RED: [Rgb; 2] = [Rgb::new(140, 0, 0), Rgb::new(190, 60, 60)];
    const GREEN: [Rgb; 2] = [Rgb::new(0, 110, 0), Rgb::new(60, 160, 60)];

    match theme {
        Theme::Default => &DEFAULT,
        Theme::Blue => &BLUE,
        Theme::Red => &RED,
        Theme::Green => &GREEN,
    }
}

pub fn background(theme: Theme, elapsed_ms: u64) -> Rgb {
    let colors = palette(theme);
    colors[((elapsed_ms / 500) % colors.len() as u64) as usize]
}

/// Glyph and style for an occupied cell.
pub fn glyph(kind: CellKind) -> Option<(char, CellStyle)> {
    match kind {
        CellKind::Empty => None,
        CellKind::Head => Some(('●', CellStyle::fg(SNAKE).bold())),
        CellKind::Body => Some(('■', CellStyle::fg(SNAKE))),
        CellKind::Food => Some(('♥', CellStyle::fg(FOOD).bold())),
        CellKind::PowerUp => Some(('♦', CellStyle::fg(POWER_UP).bold())),
        CellKind::PowerDown => Some(('▲', CellStyle::fg(POWER_DOWN).bold())),
    }
}
