//! The insertion cursor of a text area.
//!
//! The cursor sits between characters, so on a line of `n` chars it can be
//! at any column in `0..=n`. Horizontal moves wrap to the neighbouring line.
//!
//! # Sticky column
//!
//! Vertical moves remember the column they started from. Passing through a
//! short line and reaching a long one again puts the cursor back on the
//! remembered column. Any other move resets it.

use crate::buffer::Buffer;
use crate::position::Position;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cursor {
    pos: Position,
    sticky_col: usize,
}

impl Cursor {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pos: Position::ZERO,
            sticky_col: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn position(&self) -> Position {
        self.pos
    }

    #[inline]
    #[must_use]
    pub const fn line(&self) -> usize {
        self.pos.line
    }

    #[inline]
    #[must_use]
    pub const fn col(&self) -> usize {
        self.pos.col
    }

    // -- Direct positioning -------------------------------------------------

    /// Move to `pos`, clamped into the buffer. Resets the sticky column.
    pub fn set_position(&mut self, pos: Position, buf: &Buffer) {
        self.pos = buf.clamp_position(pos);
        self.sticky_col = self.pos.col;
    }

    /// Re-clamp after the buffer changed underneath the cursor.
    pub fn clamp(&mut self, buf: &Buffer) {
        self.pos = buf.clamp_position(self.pos);
    }

    // -- Horizontal movement ------------------------------------------------

    /// One char left, onto the end of the previous line from column 0.
    pub fn move_left(&mut self, buf: &Buffer) {
        if self.pos.col > 0 {
            self.pos.col -= 1;
        } else if self.pos.line > 0 {
            self.pos.line -= 1;
            self.pos.col = line_len(buf, self.pos.line);
        }
        self.sticky_col = self.pos.col;
    }

    /// One char right, onto the start of the next line from the line end.
    pub fn move_right(&mut self, buf: &Buffer) {
        if self.pos.col < line_len(buf, self.pos.line) {
            self.pos.col += 1;
        } else if self.pos.line + 1 < buf.line_count() {
            self.pos.line += 1;
            self.pos.col = 0;
        }
        self.sticky_col = self.pos.col;
    }

    pub const fn move_to_line_start(&mut self) {
        self.pos.col = 0;
        self.sticky_col = 0;
    }

    pub fn move_to_line_end(&mut self, buf: &Buffer) {
        self.pos.col = line_len(buf, self.pos.line);
        self.sticky_col = self.pos.col;
    }

    // -- Vertical movement --------------------------------------------------

    pub fn move_up(&mut self, count: usize, buf: &Buffer) {
        self.pos.line = self.pos.line.saturating_sub(count);
        self.pos.col = self.sticky_col.min(line_len(buf, self.pos.line));
    }

    pub fn move_down(&mut self, count: usize, buf: &Buffer) {
        let last = buf.line_count().saturating_sub(1);
        self.pos.line = self.pos.line.saturating_add(count).min(last);
        self.pos.col = self.sticky_col.min(line_len(buf, self.pos.line));
    }
}

fn line_len(buf: &Buffer, line: usize) -> usize {
    buf.line_content_len(line).unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn at(buf: &Buffer, line: usize, col: usize) -> Cursor {
        let mut c = Cursor::new();
        c.set_position(Position::new(line, col), buf);
        c
    }

    // -- positioning --

    #[test]
    fn set_position_clamps() {
        let buf = Buffer::from_text("abc\nde");
        assert_eq!(at(&buf, 0, 99).position(), Position::new(0, 3));
        assert_eq!(at(&buf, 7, 1).position(), Position::new(1, 1));
    }

    #[test]
    fn line_start_and_end() {
        let buf = Buffer::from_text("hello\nx");
        let mut c = at(&buf, 0, 2);
        c.move_to_line_end(&buf);
        assert_eq!(c.col(), 5);
        c.move_to_line_start();
        assert_eq!(c.col(), 0);
    }

    // -- horizontal --

    #[test]
    fn left_wraps_to_previous_line_end() {
        let buf = Buffer::from_text("ab\ncd");
        let mut c = at(&buf, 1, 0);
        c.move_left(&buf);
        assert_eq!(c.position(), Position::new(0, 2));
        let mut origin = Cursor::new();
        origin.move_left(&buf);
        assert_eq!(origin.position(), Position::ZERO);
    }

    #[test]
    fn right_wraps_to_next_line_start() {
        let buf = Buffer::from_text("ab\ncd");
        let mut c = at(&buf, 0, 2);
        c.move_right(&buf);
        assert_eq!(c.position(), Position::new(1, 0));
        let mut end = at(&buf, 1, 2);
        end.move_right(&buf);
        assert_eq!(end.position(), Position::new(1, 2));
    }

    // -- vertical --

    #[test]
    fn sticky_column_survives_short_line() {
        let buf = Buffer::from_text("long line\nab\nanother long");
        let mut c = at(&buf, 0, 7);
        c.move_down(1, &buf);
        assert_eq!(c.position(), Position::new(1, 2));
        c.move_down(1, &buf);
        assert_eq!(c.position(), Position::new(2, 7));
        c.move_up(5, &buf);
        assert_eq!(c.position(), Position::new(0, 7));
    }

    #[test]
    fn horizontal_move_resets_sticky() {
        let buf = Buffer::from_text("abcdef\nab\nabcdef");
        let mut c = at(&buf, 0, 5);
        c.move_down(1, &buf);
        c.move_left(&buf);
        c.move_down(1, &buf);
        assert_eq!(c.position(), Position::new(2, 1));
    }

    #[test]
    fn clamp_after_delete() {
        let mut buf = Buffer::from_text("abc\ndef");
        let mut c = at(&buf, 1, 3);
        buf = Buffer::from_text("a");
        c.clamp(&buf);
        assert_eq!(c.position(), Position::new(0, 1));
    }
}
