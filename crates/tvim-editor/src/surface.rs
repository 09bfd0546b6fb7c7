//! The editable document view.
//!
//! [`TextSurface`] is the position vocabulary the command dispatcher and
//! the search routine work in. [`TextArea`] is the terminal implementation:
//! a [`Buffer`], a [`Cursor`] and the highlight [`Tags`], plus the editing
//! keys of insert mode.

use crate::buffer::Buffer;
use crate::cursor::Cursor;
use crate::position::{Position, Range};
use crate::tag::{Tag, Tags};

// ---------------------------------------------------------------------------
// TextSurface
// ---------------------------------------------------------------------------

/// Document operations in terms of [`Position`]s.
///
/// Every position returned lies inside the document; out-of-range input is
/// clamped rather than rejected.
pub trait TextSurface {
    fn cursor(&self) -> Position;

    fn set_cursor(&mut self, pos: Position);

    /// Column 0 of `pos`'s line.
    fn line_start(&self, pos: Position) -> Position;

    /// Just after the last char of `pos`'s line, before its line break.
    fn line_end(&self, pos: Position) -> Position;

    /// Same column one line up, clamped to that line. Line 0 stays put.
    fn previous_line(&self, pos: Position) -> Position;

    fn start(&self) -> Position {
        Position::ZERO
    }

    /// Just after the last char of the document.
    fn end(&self) -> Position;

    /// `chars` characters after (or before, if negative) `pos`. Line breaks
    /// count like any other char. Stops at the document edges.
    fn offset(&self, pos: Position, chars: isize) -> Position;

    /// Insert at the cursor and leave the cursor after the text.
    fn insert_at_cursor(&mut self, text: &str);

    /// First occurrence of `pattern` starting at or after `from`.
    fn find(&self, pattern: &str, from: Position) -> Option<Position>;

    fn tag_add(&mut self, tag: Tag, range: Range);

    fn tag_clear(&mut self, tag: Tag);

    fn contents(&self) -> String;
}

// ---------------------------------------------------------------------------
// TextArea
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TextArea {
    buffer: Buffer,
    cursor: Cursor,
    tags: Tags,
}

impl TextArea {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A text area showing `buffer` with the cursor at the start.
    #[must_use]
    pub fn from_buffer(buffer: Buffer) -> Self {
        Self {
            buffer,
            cursor: Cursor::new(),
            tags: Tags::new(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    #[inline]
    pub const fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    #[inline]
    #[must_use]
    pub const fn tags(&self) -> &Tags {
        &self.tags
    }

    // -- Insert-mode editing ------------------------------------------------

    pub fn insert_char(&mut self, ch: char) {
        let mut utf8 = [0; 4];
        self.insert_at_cursor(ch.encode_utf8(&mut utf8));
    }

    pub fn newline(&mut self) {
        self.insert_at_cursor("\n");
    }

    /// Paste. `\r\n` and lone `\r` become `\n`, as terminals send them.
    pub fn paste(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        self.insert_at_cursor(&text);
    }

    /// Delete the char before the cursor. At column 0 this joins the line
    /// with the one above.
    pub fn backspace(&mut self) {
        let here = self.cursor.position();
        let before = self.offset(here, -1);
        if before != here && self.buffer.delete(Range::new(before, here)) {
            self.cursor.set_position(before, &self.buffer);
        }
    }

    /// Delete the char after the cursor, joining with the next line at a
    /// line end.
    pub fn delete_forward(&mut self) {
        let here = self.cursor.position();
        let after = self.offset(here, 1);
        if after != here {
            self.buffer.delete(Range::new(here, after));
            self.cursor.clamp(&self.buffer);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor.move_left(&self.buffer);
    }

    pub fn move_right(&mut self) {
        self.cursor.move_right(&self.buffer);
    }

    pub fn move_up(&mut self, lines: usize) {
        self.cursor.move_up(lines, &self.buffer);
    }

    pub fn move_down(&mut self, lines: usize) {
        self.cursor.move_down(lines, &self.buffer);
    }

    pub const fn move_home(&mut self) {
        self.cursor.move_to_line_start();
    }

    pub fn move_end(&mut self) {
        self.cursor.move_to_line_end(&self.buffer);
    }

    fn char_idx(&self, pos: Position) -> usize {
        let pos = self.buffer.clamp_position(pos);
        self.buffer.pos_to_char_idx(pos).unwrap_or(0)
    }
}

impl TextSurface for TextArea {
    fn cursor(&self) -> Position {
        self.cursor.position()
    }

    fn set_cursor(&mut self, pos: Position) {
        self.cursor.set_position(pos, &self.buffer);
    }

    fn line_start(&self, pos: Position) -> Position {
        let pos = self.buffer.clamp_position(pos);
        Position::new(pos.line, 0)
    }

    fn line_end(&self, pos: Position) -> Position {
        let line = self.buffer.clamp_position(pos).line;
        Position::new(line, self.buffer.line_content_len(line).unwrap_or(0))
    }

    fn previous_line(&self, pos: Position) -> Position {
        let pos = self.buffer.clamp_position(pos);
        self.buffer
            .clamp_position(Position::new(pos.line.saturating_sub(1), pos.col))
    }

    fn end(&self) -> Position {
        self.buffer.end_position()
    }

    fn offset(&self, pos: Position, chars: isize) -> Position {
        let idx = self.char_idx(pos);
        let target = idx
            .saturating_add_signed(chars)
            .min(self.buffer.len_chars());
        self.buffer.char_idx_to_pos(target).unwrap_or(Position::ZERO)
    }

    fn insert_at_cursor(&mut self, text: &str) {
        let here = self.cursor.position();
        if let Some(after) = self.buffer.insert(here, text) {
            self.cursor.set_position(after, &self.buffer);
        }
    }

    fn find(&self, pattern: &str, from: Position) -> Option<Position> {
        let idx = self.buffer.find(pattern, self.char_idx(from))?;
        self.buffer.char_idx_to_pos(idx)
    }

    fn tag_add(&mut self, tag: Tag, range: Range) {
        self.tags.add(tag, range);
    }

    fn tag_clear(&mut self, tag: Tag) {
        self.tags.clear(tag);
    }

    fn contents(&self) -> String {
        self.buffer.contents()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
