// SPDX-License-Identifier: MIT
//
// FrameBuffer: the grid one frame is painted into.
//
// The view paints the menu bar, text rows, status line, command line and
// any popup here from scratch each frame. The diff renderer then compares
// it with the previous frame. Cells are stored row after row.

use unicode_width::UnicodeWidthChar;

use crate::cell::Cell;
use crate::style::Style;

// ─── FrameBuffer ────────────────────────────────────────────────────────────

/// ```
/// use tvim_term::buffer::FrameBuffer;
/// use tvim_term::style::Style;
///
/// let mut frame = FrameBuffer::new(12, 2);
/// frame.paint_text(0, 1, 12, "INSERT", Style::PLAIN);
/// assert_eq!(frame.row_text(1).trim_end(), "INSERT");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; usize::from(width) * usize::from(height)],
        }
    }

    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Index of `(x, y)` in `cells`, if it is on screen.
    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.offset(x, y).map(|i| &self.cells[i])
    }

    #[must_use]
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        let start = self.offset(0, y)?;
        Some(&self.cells[start..start + usize::from(self.width)])
    }

    /// The characters of a row, wide tails left out.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        self.row(y)
            .into_iter()
            .flatten()
            .filter_map(|cell| cell.character())
            .collect()
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    /// New dimensions, every cell blank.
    pub fn resize(&mut self, width: u16, height: u16) {
        *self = Self::new(width, height);
    }

    // ─── Painting ───────────────────────────────────────────────────────

    /// Write one cell. Whatever half of a wide character was there loses
    /// its other half too. Returns `false` off screen.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        let Some(at) = self.offset(x, y) else {
            return false;
        };
        if self.cells[at].is_wide_tail() {
            if let Some(head) = x.checked_sub(1).and_then(|hx| self.offset(hx, y)) {
                self.cells[head].glyph = Cell::BLANK.glyph;
            }
        }
        if let Some(tail) = self.offset(x + 1, y).filter(|&i| self.cells[i].is_wide_tail()) {
            self.cells[tail] = Cell::BLANK;
        }
        self.cells[at] = cell;
        true
    }

    /// Blank `width` cells of row `y` from column `x` in `style`.
    pub fn fill(&mut self, x: u16, y: u16, width: u16, style: Style) {
        let end = x.saturating_add(width).min(self.width);
        for col in x..end {
            self.set(col, y, Cell::new(' ', style));
        }
    }

    /// Paint `text` from `(x, y)` up to column `limit` (exclusive) and
    /// return how many columns it took.
    ///
    /// Zero-width characters are dropped. A double-width character with
    /// only one column left becomes a space.
    pub fn paint_text(&mut self, x: u16, y: u16, limit: u16, text: &str, style: Style) -> u16 {
        if y >= self.height {
            return 0;
        }
        let limit = limit.min(self.width);
        let mut col = x;
        for ch in text.chars() {
            let room = limit.saturating_sub(col);
            match char_width(ch) {
                _ if room == 0 => break,
                0 => {}
                1 => {
                    self.set(col, y, Cell::new(ch, style));
                    col += 1;
                }
                _ if room == 1 => {
                    self.set(col, y, Cell::new(' ', style));
                    col += 1;
                    break;
                }
                _ => {
                    self.set(col, y, Cell::new(ch, style));
                    self.set(col + 1, y, Cell::wide_tail(style));
                    col += 2;
                }
            }
        }
        col - x
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FrameBuffer({}x{})", self.width, self.height)
    }
}

// ─── Display Width ──────────────────────────────────────────────────────────

/// Terminal columns a character takes: 0, 1 or 2.
///
/// ```
/// use tvim_term::buffer::char_width;
///
/// assert_eq!(char_width('a'), 1);
/// assert_eq!(char_width('中'), 2);
/// assert_eq!(char_width('\u{301}'), 0);
/// ```
#[must_use]
pub fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

#[must_use]
pub fn string_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::CellColor;
    use crate::style::Attr;
    use pretty_assertions::assert_eq;

    const STATUS: Style = Style::new(CellColor::Default, CellColor::Default, Attr::BOLD.union(Attr::INVERSE));
    const TAG: Style = Style::new(CellColor::Rgb(255, 255, 255), CellColor::Rgb(0, 0, 255), Attr::empty());

    // ── Geometry ─────────────────────────────────────────────────────────

    #[test]
    fn off_screen_is_rejected() {
        let mut frame = FrameBuffer::new(3, 2);
        assert!(frame.get(3, 0).is_none());
        assert!(frame.get(0, 2).is_none());
        assert!(frame.row(2).is_none());
        assert!(!frame.set(0, 2, Cell::BLANK));
        assert_eq!(frame.row_text(9), "");
    }

    #[test]
    fn resize_and_clear_blank_everything() {
        let mut frame = FrameBuffer::new(2, 2);
        frame.paint_text(0, 0, 2, "ab", TAG);
        frame.clear();
        assert_eq!(frame.get(0, 0), Some(&Cell::BLANK));
        frame.paint_text(0, 1, 2, "ab", TAG);
        frame.resize(5, 1);
        assert_eq!((frame.width(), frame.height()), (5, 1));
        assert_eq!(frame.row_text(0), "     ");
    }

    // ── Text ─────────────────────────────────────────────────────────────

    #[test]
    fn paint_text_respects_limit_and_style() {
        let mut frame = FrameBuffer::new(10, 1);
        assert_eq!(frame.paint_text(1, 0, 4, "hello", STATUS), 3);
        assert_eq!(frame.row_text(0), " hel      ");
        assert_eq!(frame.get(1, 0).map(|c| c.style), Some(STATUS));
        assert_eq!(frame.get(4, 0).map(|c| c.style), Some(Style::PLAIN));
    }

    #[test]
    fn wide_characters_take_two_cells() {
        let mut frame = FrameBuffer::new(4, 1);
        assert_eq!(frame.paint_text(0, 0, 4, "中a", TAG), 3);
        assert_eq!(frame.get(1, 0), Some(&Cell::wide_tail(TAG)));
        assert_eq!(frame.row_text(0), "中a ");
    }

    #[test]
    fn wide_character_without_room_is_a_space() {
        let mut frame = FrameBuffer::new(3, 1);
        assert_eq!(frame.paint_text(2, 0, 3, "中x", TAG), 1);
        assert_eq!(frame.get(2, 0), Some(&Cell::new(' ', TAG)));
    }

    #[test]
    fn zero_width_characters_are_dropped() {
        let mut frame = FrameBuffer::new(4, 1);
        assert_eq!(frame.paint_text(0, 0, 4, "e\u{301}b", TAG), 2);
        assert_eq!(frame.row_text(0), "eb  ");
    }

    // ── Overwrites ───────────────────────────────────────────────────────

    #[test]
    fn overwriting_either_half_breaks_the_pair() {
        let mut frame = FrameBuffer::new(4, 1);
        frame.paint_text(0, 0, 4, "中", TAG);
        frame.set(1, 0, Cell::new('x', TAG));
        assert_eq!(frame.row_text(0), " x  ");

        frame.paint_text(2, 0, 4, "中", TAG);
        frame.set(2, 0, Cell::new('y', TAG));
        assert_eq!(frame.row_text(0), " xy ");
        assert_eq!(frame.get(3, 0), Some(&Cell::BLANK));
    }

    #[test]
    fn fill_clamps_to_the_row() {
        let mut frame = FrameBuffer::new(3, 2);
        frame.fill(1, 1, 10, TAG);
        assert_eq!(frame.get(0, 1).map(|c| c.style), Some(Style::PLAIN));
        assert_eq!(frame.get(2, 1).map(|c| c.style), Some(TAG));
        assert_eq!(frame.get(1, 0).map(|c| c.style), Some(Style::PLAIN));
    }

    // ── Width ────────────────────────────────────────────────────────────

    #[test]
    fn string_width_counts_columns() {
        assert_eq!(string_width("a中b"), 4);
        assert_eq!(string_width("e\u{301}"), 1);
        assert_eq!(string_width(""), 0);
    }
}
