//! View: paints one editor window into a framebuffer.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ File  Help  Themes  Fonts                │ ← menu bar
//! │ text rows, scrolled to keep the cursor   │
//! │ ...                                      │
//! │ INSERT | notes.txt    Courier 10 | 1:1   │ ← status line
//! │ ?pattern                                 │ ← command line
//! └──────────────────────────────────────────┘
//! ```
//!
//! An open menu drops down over the text and a popup is centered on top of
//! everything. The view holds only scroll state; the window's parts are
//! lent to [`View::render`] through a [`Screen`].

use tvim_term::ansi::CursorShape;
use tvim_term::buffer::{FrameBuffer, char_width, string_width};
use tvim_term::cell::Cell;
use tvim_term::style::Attr;
use tvim_theme::{Font, FontFamily, HighlightGroup, Theme};

use crate::buffer::Buffer;
use crate::command::CommandLine;
use crate::menu::{Entry, Menu, MenuBar};
use crate::mode::Mode;
use crate::popup::{Popup, Severity};
use crate::position::Position;
use crate::surface::{TextArea, TextSurface};
use crate::tag::Tag;

/// Display columns per tab stop.
pub const TAB_WIDTH: usize = 8;

/// Rows taken by the menu bar, status line and command line.
const CHROME_ROWS: u16 = 3;

/// Everything a window shows, borrowed for one paint.
pub struct Screen<'a> {
    pub text: &'a TextArea,
    pub command_line: &'a CommandLine,
    pub mode: Mode,
    pub font: Font,
    pub theme: &'a Theme,
    pub menu: &'a MenuBar,
    pub popup: Option<&'a Popup>,
    /// 0-based index of this window among `window_count`.
    pub window_index: usize,
    pub window_count: usize,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Display column of char column `col` in `line`, with tabs expanded and
/// glyphs mapped through `family`.
#[must_use]
pub fn display_col(line: &str, col: usize, family: FontFamily) -> usize {
    line.chars().take(col).fold(0, |display, ch| match ch {
        '\t' => (display / TAB_WIDTH + 1) * TAB_WIDTH,
        _ => display + char_width(family.glyph(ch)),
    })
}

/// Replace tabs with spaces up to the next tab stop.
#[must_use]
pub fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut width = 0;
    for ch in line.chars() {
        if ch == '\t' {
            let pad = TAB_WIDTH - width % TAB_WIDTH;
            out.extend(std::iter::repeat_n(' ', pad));
            width += pad;
        } else {
            out.push(ch);
            width += char_width(ch);
        }
    }
    out
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn fill_row(frame: &mut FrameBuffer, x: u16, y: u16, width: u16, style: HighlightGroup) {
    frame.fill(x, y, width, style.style());
}

fn paint(frame: &mut FrameBuffer, x: u16, y: u16, limit: u16, text: &str, style: HighlightGroup) -> u16 {
    frame.paint_text(x, y, limit, text, style.style())
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct View {
    /// First visible document line.
    top_line: usize,
    /// Horizontal scroll in display columns.
    left_col: usize,
}

impl View {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            top_line: 0,
            left_col: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn top_line(&self) -> usize {
        self.top_line
    }

    #[inline]
    #[must_use]
    pub const fn left_col(&self) -> usize {
        self.left_col
    }

    /// Document rows available in a frame `height` rows tall.
    #[must_use]
    pub const fn text_rows(height: u16) -> u16 {
        height.saturating_sub(CHROME_ROWS)
    }

    /// Scroll so the cursor is inside a `width` x `rows` text area.
    pub fn ensure_cursor_visible(
        &mut self,
        buf: &Buffer,
        cursor: Position,
        family: FontFamily,
        width: u16,
        rows: u16,
    ) {
        let (width, rows) = (usize::from(width), usize::from(rows));
        if width == 0 || rows == 0 {
            return;
        }

        if cursor.line < self.top_line {
            self.top_line = cursor.line;
        } else if cursor.line >= self.top_line + rows {
            self.top_line = cursor.line + 1 - rows;
        }

        let line = buf.line_text(cursor.line).unwrap_or_default();
        let col = display_col(&line, cursor.col, family);
        if col < self.left_col {
            self.left_col = col;
        } else if col >= self.left_col + width {
            self.left_col = col + 1 - width;
        }
    }

    /// Paint the whole window. Returns where the hardware cursor goes, or
    /// `None` to hide it.
    pub fn render(&mut self, frame: &mut FrameBuffer, screen: &Screen<'_>) -> Option<(u16, u16, CursorShape)> {
        let (width, height) = (frame.width(), frame.height());
        if width == 0 || height == 0 {
            return None;
        }

        let rows = Self::text_rows(height);
        let cursor = screen.text.cursor();
        self.ensure_cursor_visible(screen.text.buffer(), cursor, screen.font.family, width, rows);

        for row in 0..rows {
            self.paint_text_row(frame, screen, self.top_line + usize::from(row), row + 1, width);
        }
        if height >= CHROME_ROWS {
            paint_status_line(frame, screen, height - 2, width);
        }
        let command_cursor = paint_command_line(frame, screen, height - 1, width);
        let open_menu = paint_menu_bar(frame, screen.menu, screen.theme, width);

        if let Some(popup) = screen.popup {
            return paint_popup(frame, popup, screen.theme)
                .map(|(x, y)| (x, y, CursorShape::SteadyBar));
        }
        if open_menu {
            return None;
        }
        match screen.mode {
            Mode::Command => Some((command_cursor, height - 1, screen.mode.cursor_shape())),
            Mode::Insert => {
                let line = screen.text.buffer().line_text(cursor.line).unwrap_or_default();
                let x = display_col(&line, cursor.col, screen.font.family).checked_sub(self.left_col)?;
                let y = cursor.line.checked_sub(self.top_line)?;
                (x < usize::from(width) && y < usize::from(rows))
                    .then(|| (to_u16(x), to_u16(y) + 1, screen.mode.cursor_shape()))
            }
        }
    }

    /// One document line: text colors, font style, tag backgrounds.
    fn paint_text_row(&self, frame: &mut FrameBuffer, screen: &Screen<'_>, line: usize, y: u16, width: u16) {
        let theme = screen.theme;
        let base = theme.text.style().add_attrs(screen.font.style.attrs());
        frame.fill(0, y, width, base);

        let buf = screen.text.buffer();
        let Some(text) = buf.line_text(line) else {
            return;
        };
        let tags = screen.text.tags();
        let style_at = |col: usize| match tags.tag_at(Position::new(line, col)) {
            Some(Tag::Highlight) => base.with_bg(theme.highlight_tag),
            Some(Tag::Search) => base.with_bg(theme.search_tag),
            None => base,
        };

        let left = self.left_col;
        let right = left + usize::from(width);
        let put = |frame: &mut FrameBuffer, display: usize, cell: Cell| {
            if (left..right).contains(&display) {
                frame.set(to_u16(display - left), y, cell);
            }
        };

        let mut display = 0;
        let mut col = 0;
        for ch in text.chars() {
            if display >= right {
                break;
            }
            let style = style_at(col);
            let blank = Cell::new(' ', style);
            if ch == '\t' {
                let next = (display / TAB_WIDTH + 1) * TAB_WIDTH;
                for d in display..next {
                    put(frame, d, blank);
                }
                display = next;
            } else {
                let glyph = screen.font.family.glyph(ch);
                let w = char_width(glyph);
                if w == 2 && display >= left && display + 1 < right {
                    put(frame, display, Cell::new(glyph, style));
                    put(frame, display + 1, Cell::wide_tail(style));
                } else if w == 2 {
                    put(frame, display, blank);
                    put(frame, display + 1, blank);
                } else if w == 1 {
                    put(frame, display, Cell::new(glyph, style));
                }
                display += w;
            }
            col += 1;
        }

        // A tagged line break shows as one colored cell after the text.
        if buf.char_at(Position::new(line, col)).is_some() && tags.tag_at(Position::new(line, col)).is_some() {
            let style = style_at(col);
            put(frame, display, Cell::new(' ', style));
        }
    }
}

// ---------------------------------------------------------------------------
// Chrome
// ---------------------------------------------------------------------------

fn paint_status_line(frame: &mut FrameBuffer, screen: &Screen<'_>, y: u16, width: u16) {
    let style = screen.theme.status_line;
    fill_row(frame, 0, y, width, style);

    let buf = screen.text.buffer();
    let name = buf
        .path()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("[No Name]");
    let modified = if buf.is_modified() { " [+]" } else { "" };
    let left = format!(" {} | {name}{modified}", screen.mode);
    let position = format!(
        "{} | {}/{}",
        screen.text.cursor(),
        screen.window_index + 1,
        screen.window_count
    );
    // The font is dropped before the file name is cut.
    let full = format!(" {} | {position} ", screen.font);
    let right = if string_width(&left) + string_width(&full) <= usize::from(width) {
        full
    } else {
        format!(" {position} ")
    };

    let right_x = width.saturating_sub(to_u16(string_width(&right)));
    paint(frame, 0, y, right_x, &left, style);
    paint(frame, right_x, y, width, &right, style);
}

/// Paint the command line and return the cursor column.
fn paint_command_line(frame: &mut FrameBuffer, screen: &Screen<'_>, y: u16, width: u16) -> u16 {
    let style = screen.theme.command_line;
    fill_row(frame, 0, y, width, style);

    let line = screen.command_line;
    let limit = usize::from(width.max(1)) - 1;
    let skip = line.cursor().saturating_sub(limit);
    let visible: String = line.text().chars().skip(skip).collect();
    paint(frame, 0, y, width, &visible, style);

    let before: String = line.text().chars().skip(skip).take(line.cursor() - skip).collect();
    to_u16(string_width(&before)).min(width.saturating_sub(1))
}

/// Paint the title row and any open dropdown. Returns whether a menu is
/// open.
fn paint_menu_bar(frame: &mut FrameBuffer, bar: &MenuBar, theme: &Theme, width: u16) -> bool {
    fill_row(frame, 0, 0, width, theme.menu_bar);

    let mut x = 1;
    let mut open_at = None;
    for (index, menu) in bar.menus().iter().enumerate() {
        let is_open = bar.open().is_some_and(|(open, _)| open == index);
        let style = if is_open { theme.menu_selected } else { theme.menu_bar };
        if is_open {
            open_at = Some(x);
        }
        x += paint_title(frame, x, width, menu, style) + 1;
    }

    let (Some((open, selected)), Some(title_x)) = (bar.open(), open_at) else {
        return false;
    };
    let entries = &bar.menus()[open].entries;
    let inner = entries
        .iter()
        .map(|e| match e {
            Entry::Item { label, .. } => string_width(label),
            Entry::Separator => 0,
        })
        .max()
        .unwrap_or(0)
        + 2;
    let drop_w = to_u16(inner).min(width);
    let drop_x = title_x.min(width.saturating_sub(drop_w));

    for (i, entry) in entries.iter().enumerate() {
        let y = to_u16(i + 1);
        if y >= frame.height() {
            break;
        }
        let style = if i == selected { theme.menu_selected } else { theme.menu };
        fill_row(frame, drop_x, y, drop_w, style);
        match entry {
            Entry::Item { label, .. } => {
                paint(frame, drop_x + 1, y, drop_x + drop_w, label, style);
            }
            Entry::Separator => {
                let rule = "─".repeat(usize::from(drop_w));
                paint(frame, drop_x, y, drop_x + drop_w, &rule, style);
            }
        }
    }
    true
}

/// A title padded by one space each side, its mnemonic letter underlined.
fn paint_title(frame: &mut FrameBuffer, x: u16, limit: u16, menu: &Menu, style: HighlightGroup) -> u16 {
    let plain = style.style();
    let mut used = paint(frame, x, 0, limit, " ", style);
    let mut marked = false;
    for ch in menu.title.chars() {
        let is_mnemonic = !marked && ch.to_lowercase().eq(menu.mnemonic.to_lowercase());
        marked |= is_mnemonic;
        let look = if is_mnemonic { plain.add_attrs(Attr::UNDERLINE) } else { plain };
        used += frame.paint_text(x + used, 0, limit, ch.encode_utf8(&mut [0; 4]), look);
    }
    used + paint(frame, x + used, 0, limit, " ", style)
}

// ---------------------------------------------------------------------------
// Popups
// ---------------------------------------------------------------------------

/// Paint a centered popup. Returns the text cursor for a prompt.
fn paint_popup(frame: &mut FrameBuffer, popup: &Popup, theme: &Theme) -> Option<(u16, u16)> {
    let (fw, fh) = (frame.width(), frame.height());

    let body: Vec<String> = match popup {
        Popup::Message { body, .. } => body.lines().map(expand_tabs).collect(),
        Popup::Confirm { question, .. } => vec![question.clone()],
        Popup::Prompt { .. } => vec!["File name:".to_string()],
    };
    let buttons: Vec<(&str, bool)> = match popup {
        Popup::Message { .. } => vec![("[ OK ]", true)],
        Popup::Confirm { yes, .. } => vec![("[ Yes ]", *yes), ("[ No ]", !*yes)],
        Popup::Prompt { .. } => vec![("Enter: OK", false), ("Esc: Cancel", false)],
    };
    let field = match popup {
        Popup::Prompt { field, .. } => Some(field),
        _ => None,
    };

    let buttons_w: usize = buttons.iter().map(|(b, _)| string_width(b) + 2).sum();
    let content_w = body
        .iter()
        .map(|l| string_width(l))
        .chain([string_width(popup.title()) + 2, buttons_w])
        .chain(field.map(|_| 40))
        .max()
        .unwrap_or(0);

    let w = to_u16(content_w + 4).min(fw);
    let h = to_u16(body.len() + 4 + usize::from(field.is_some())).min(fh);
    let x = (fw - w) / 2;
    let y = (fh - h) / 2;
    let right = x + w;

    let style = theme.popup;
    for row in y..y + h {
        fill_row(frame, x, row, w, style);
    }

    // Frame and title.
    if w >= 2 && h >= 2 {
        let horizontal = "─".repeat(usize::from(w - 2));
        paint(frame, x, y, right, &format!("┌{horizontal}┐"), style);
        paint(frame, x, y + h - 1, right, &format!("└{horizontal}┘"), style);
        for row in y + 1..y + h - 1 {
            paint(frame, x, row, right, "│", style);
            paint(frame, right - 1, row, right, "│", style);
        }
    }
    let title_style = match popup {
        Popup::Message { severity: Severity::Error, .. } => theme.error_title,
        _ => theme.popup_title,
    };
    let title = format!(" {} ", popup.title());
    let title_x = x + w.saturating_sub(to_u16(string_width(&title))) / 2;
    paint(frame, title_x, y, right.saturating_sub(1), &title, title_style);

    let inner_right = right.saturating_sub(2);
    let mut row = y + 1;
    for line in &body {
        if row + 1 >= y + h {
            break;
        }
        paint(frame, x + 2, row, inner_right, line, style);
        row += 1;
    }

    let mut cursor = None;
    if let Some(field) = field {
        let field_w = inner_right.saturating_sub(x + 2);
        fill_row(frame, x + 2, row, field_w, theme.field);
        let limit = usize::from(field_w.max(1)) - 1;
        let skip = field.cursor().saturating_sub(limit);
        let visible: String = field.text().chars().skip(skip).collect();
        paint(frame, x + 2, row, inner_right, &visible, theme.field);
        let before: String = field.text().chars().skip(skip).take(field.cursor() - skip).collect();
        cursor = Some((x + 2 + to_u16(string_width(&before)), row));
        row += 1;
    }

    // Buttons, centered on the row above the bottom border.
    let buttons_row = (y + h).saturating_sub(2).max(row);
    if buttons_row + 1 < y + h {
        let mut bx = x + w.saturating_sub(to_u16(buttons_w)) / 2;
        for (label, selected) in buttons {
            let button_style = if selected { theme.menu_selected } else { style };
            bx += 1;
            bx += paint(frame, bx, buttons_row, inner_right, label, button_style);
            bx += 1;
        }
    }

    cursor
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
