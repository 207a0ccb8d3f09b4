//! Frame assembly for the three menu layouts.
//!
//! * Horizontal bar: prompt, input field, `<`, the window's items, `>`.
//!   The input field is as wide as the widest item but at most a third of
//!   the screen; the remaining columns are the paginator's width budget.
//! * Vertical list: prompt and input on the first row, one item per row
//!   below, indented by the prompt width.
//! * Message: the window's items on one line, aligned left, centre or right.

use crate::measure::{CellMeasure, PADDING, sanitize};
use crate::theme::Theme;
use crate::writer::Writer;
use anyhow::Result;
use core_config::{Config, MessageAlign};
use core_match::MasterList;
use core_state::{Capacity, Session};
use core_text::grapheme::{str_width, truncate_to_width};
use crossterm::style::Colors;
use std::io::Write;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub placement: Placement,
    /// `Some(n)` draws a vertical list of `n` rows.
    pub list_rows: Option<usize>,
    pub prompt: String,
    pub align: MessageAlign,
}

impl RenderOptions {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            placement: if cfg.file.menu.bottom {
                Placement::Bottom
            } else {
                Placement::Top
            },
            list_rows: cfg.list_rows(),
            prompt: cfg.prompt().to_string(),
            align: cfg.file.message.align,
        }
    }
}

/// Column split of the horizontal bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarGeometry {
    pub prompt: usize,
    pub input: usize,
    /// Width of each of the `<` and `>` indicators.
    pub indicator: usize,
    /// Columns left for items.
    pub budget: usize,
}

impl BarGeometry {
    pub fn compute(cols: usize, prompt: &str, max_item_width: usize) -> Self {
        let prompt = if prompt.is_empty() {
            0
        } else {
            CellMeasure::padded(prompt)
        };
        let input = max_item_width.min(cols / 3);
        let indicator = CellMeasure::padded("<").max(CellMeasure::padded(">"));
        let budget = cols.saturating_sub(prompt + input + 2 * indicator);
        Self {
            prompt,
            input,
            indicator,
            budget,
        }
    }
}

pub struct RenderEngine {
    options: RenderOptions,
    theme: Theme,
    max_item_width: usize,
}

impl RenderEngine {
    pub fn new(options: RenderOptions, theme: Theme, master: &MasterList) -> Self {
        Self {
            options,
            theme,
            max_item_width: CellMeasure::max_width(master),
        }
    }

    pub fn geometry(&self, cols: u16) -> BarGeometry {
        BarGeometry::compute(cols as usize, &self.options.prompt, self.max_item_width)
    }

    // Single-line layouts: the whole line for a message, the item area for
    // the bar.
    fn width_budget(&self, cols: u16, message: bool) -> usize {
        if message {
            cols as usize
        } else {
            self.geometry(cols).budget
        }
    }

    /// Paginator capacity for a terminal of `size` (columns, rows). A list
    /// never pages past the rows below the input line.
    pub fn capacity(&self, size: (u16, u16), message: bool) -> Capacity {
        match self.options.list_rows {
            Some(lines) if !message => {
                Capacity::Rows(lines.min((size.1 as usize).saturating_sub(1)))
            }
            _ => Capacity::Width(self.width_budget(size.0, message)),
        }
    }

    /// Rows the menu occupies.
    pub fn menu_rows(&self, message: bool) -> usize {
        match self.options.list_rows {
            Some(rows) if !message => rows + 1,
            _ => 1,
        }
    }

    pub fn frame(&self, session: &Session, cols: u16, rows: u16) -> Writer {
        let message = session.config().message;
        let height = self.menu_rows(message).min(rows as usize);
        let top = match self.options.placement {
            Placement::Top => 0,
            Placement::Bottom => (rows as usize).saturating_sub(height),
        };
        let mut f = FrameBuilder {
            w: Writer::new(),
            cols: cols as usize,
            theme: &self.theme,
        };
        for y in top..top + height {
            f.blank_row(y);
        }
        if height > 0 {
            if message {
                self.message_row(&mut f, session, top);
            } else if self.options.list_rows.is_some() {
                self.list_rows(&mut f, session, top, height);
            } else {
                self.bar_row(&mut f, session, top);
            }
        }
        tracing::trace!(
            target: "render",
            cols,
            rows,
            top,
            height,
            visible = session.window().visible(session.matches().len()).len(),
            "frame"
        );
        f.w
    }

    pub fn draw<W: Write>(&self, session: &Session, size: (u16, u16), out: &mut W) -> Result<()> {
        self.frame(session, size.0, size.1).flush_to(out)
    }

    fn prompt_cell(&self, f: &mut FrameBuilder<'_>, y: usize) -> usize {
        if self.options.prompt.is_empty() {
            return 0;
        }
        let w = CellMeasure::padded(&self.options.prompt);
        f.cell(0, y, w, &self.options.prompt, self.theme.selected)
    }

    fn bar_row(&self, f: &mut FrameBuilder<'_>, session: &Session, y: usize) {
        let g = self.geometry(f.cols as u16);
        let mut x = self.prompt_cell(f, y);
        let has_matches = !session.matches().is_empty();
        let field = if has_matches {
            g.input
        } else {
            f.cols.saturating_sub(x)
        };
        f.input(x, y, field, session);
        if !has_matches {
            return;
        }
        x += field;
        let window = session.window();
        if window.first > 0 {
            x += f.cell(x, y, g.indicator, "<", self.theme.normal);
        }
        for (pos, text) in session.visible_items() {
            let room = f.cols.saturating_sub(x + g.indicator);
            let w = CellMeasure::padded(text).min(room);
            x += f.cell(x, y, w, text, self.item_colors(session, pos));
        }
        if window.last.is_some() {
            let at = f.cols.saturating_sub(g.indicator);
            f.cell(at, y, g.indicator, ">", self.theme.normal);
        }
    }

    fn list_rows(&self, f: &mut FrameBuilder<'_>, session: &Session, top: usize, height: usize) {
        let x = self.prompt_cell(f, top);
        f.input(x, top, f.cols.saturating_sub(x), session);
        let width = f.cols.saturating_sub(x);
        for (row, (pos, text)) in session.visible_items().take(height - 1).enumerate() {
            f.cell(x, top + 1 + row, width, text, self.item_colors(session, pos));
        }
    }

    fn message_row(&self, f: &mut FrameBuilder<'_>, session: &Session, y: usize) {
        let total: usize = session
            .visible_items()
            .map(|(_, t)| CellMeasure::padded(t))
            .sum();
        let slack = f.cols.saturating_sub(total);
        let mut x = match self.options.align {
            MessageAlign::Left => 0,
            MessageAlign::Centre => slack / 2,
            MessageAlign::Right => slack,
        };
        for (_, text) in session.visible_items() {
            x += f.cell(x, y, CellMeasure::padded(text), text, self.theme.normal);
        }
    }

    fn item_colors(&self, session: &Session, pos: usize) -> Colors {
        if session.selected() == Some(pos) {
            self.theme.selected
        } else {
            self.theme.normal
        }
    }
}

struct FrameBuilder<'a> {
    w: Writer,
    cols: usize,
    theme: &'a Theme,
}

impl FrameBuilder<'_> {
    fn blank_row(&mut self, y: usize) {
        self.w.move_to(0, to_u16(y));
        self.w.colors(self.theme.normal);
        self.w.clear_line();
    }

    /// Draw `text` padded into a `width` column cell at `x`, clipped to the
    /// screen. Returns the columns used.
    fn cell(&mut self, x: usize, y: usize, width: usize, text: &str, colors: Colors) -> usize {
        let width = width.min(self.cols.saturating_sub(x));
        if width == 0 {
            return 0;
        }
        let mut s = String::with_capacity(width + text.len());
        let mut used = 0;
        if width >= PADDING {
            let clean = sanitize(text);
            let (shown, shown_w) = truncate_to_width(&clean, width - PADDING);
            s.push(' ');
            s.push_str(shown);
            used = 1 + shown_w;
        }
        s.extend(std::iter::repeat_n(' ', width - used));
        self.w.move_to(to_u16(x), to_u16(y));
        self.w.colors(colors);
        self.w.print(s);
        width
    }

    /// Query text with a reverse-video cursor cell.
    fn input(&mut self, x: usize, y: usize, width: usize, session: &Session) {
        let query = session.query();
        let width = self.cell(x, y, width, query, self.theme.normal);
        let cursor = session.buffer().cursor();
        let col = x + 1 + str_width(&sanitize(&query[..cursor]));
        if width < PADDING || col >= x + width - 1 {
            return;
        }
        let under = query[cursor..]
            .graphemes(true)
            .next()
            .map(|g| sanitize(g).into_owned())
            .unwrap_or_else(|| " ".to_string());
        self.w.move_to(to_u16(col), to_u16(y));
        self.w.colors(self.theme.cursor());
        self.w.print(under);
    }
}

fn to_u16(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}
