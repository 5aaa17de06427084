//! MenuView: titled, bordered list screens (main menu, settings, records).

use crate::fb::{text_width, CellStyle, FrameBuffer, Rgb};
use crate::game_view::Viewport;

/// Content of one menu screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuScreen {
    pub title: String,
    /// Selectable rows, numbered from 1 on screen.
    pub items: Vec<String>,
    /// Highlighted row, if the screen has a cursor.
    pub selected: Option<usize>,
    /// Free text drawn under the items.
    pub lines: Vec<String>,
    /// Key hint on the bottom row.
    pub footer: String,
}

impl MenuScreen {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn items<I, S>(mut self, items: I, selected: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self.selected = Some(selected.min(self.items.len().saturating_sub(1)));
        self
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = footer.into();
        self
    }
}

const ACCENT: Rgb = Rgb::new(60, 220, 90);

#[derive(Debug, Default)]
pub struct MenuView;

impl MenuView {
    pub fn render_into(&self, screen: &MenuScreen, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let item_rows: Vec<String> = screen
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| format!(" {}. {} ", i + 1, item))
            .collect();

        let content_w = item_rows
            .iter()
            .chain(screen.lines.iter())
            .chain(std::iter::once(&screen.footer))
            .map(|s| text_width(s))
            .chain(std::iter::once(text_width(&screen.title) + 4))
            .max()
            .unwrap_or(0);
        let spacer = u16::from(!item_rows.is_empty() && !screen.lines.is_empty());
        let content_h = item_rows.len() as u16 + spacer + screen.lines.len() as u16;

        let box_w = (content_w + 4).min(viewport.width);
        let box_h = (content_h + 4).min(viewport.height.saturating_sub(1));
        let x0 = viewport.width.saturating_sub(box_w) / 2;
        let y0 = viewport.height.saturating_sub(box_h + 1) / 2;

        let border = CellStyle::fg(Rgb::new(200, 200, 200));
        fb.draw_box(x0, y0, box_w, box_h, border);
        fb.put_str_centered(
            x0,
            box_w,
            y0,
            &format!(" {} ", screen.title),
            CellStyle::fg(ACCENT).bold(),
        );

        let text = CellStyle::default();
        let mut y = y0 + 2;
        for (i, row) in item_rows.iter().enumerate() {
            let style = if screen.selected == Some(i) {
                text.bold().inverted()
            } else {
                text
            };
            fb.put_str(x0 + 2, y, row, style);
            y += 1;
        }
        y += spacer;
        for line in &screen.lines {
            fb.put_str(x0 + 2, y, line, text);
            y += 1;
        }

        fb.put_str_centered(
            0,
            viewport.width,
            y0 + box_h,
            &screen.footer,
            CellStyle::fg(Rgb::new(150, 150, 160)).dim(),
        );
    }

    pub fn render(&self, screen: &MenuScreen, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(screen, viewport, &mut fb);
        fb
    }
}
