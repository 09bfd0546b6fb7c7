//! Document text.
//!
//! A `Buffer` wraps a [`ropey::Rope`] with position conversion, editing,
//! literal search and whole-file I/O.
//!
//! The buffer holds exactly the file's text. Nothing is normalized on load
//! and nothing is appended on save, so writing a buffer and reading the
//! file back gives the same contents.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use ropey::{Rope, RopeSlice};

use crate::error::EditorError;
use crate::position::{Position, Range};

// ---------------------------------------------------------------------------
// Buffer
// ---------------------------------------------------------------------------

/// Rope-backed text of one window.
///
/// Positions are `(line, col)` with char columns. Use
/// [`pos_to_char_idx`](Self::pos_to_char_idx) and
/// [`char_idx_to_pos`](Self::char_idx_to_pos) to move between positions and
/// rope char indices.
pub struct Buffer {
    rope: Rope,
    path: Option<PathBuf>,
    modified: bool,
}

impl Buffer {
    // -- Construction -------------------------------------------------------

    #[must_use]
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            path: None,
            modified: false,
        }
    }

    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            path: None,
            modified: false,
        }
    }

    /// Read a whole file. The buffer remembers the path.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Io`] if the file cannot be read or is not
    /// valid UTF-8.
    pub fn from_file(path: &Path) -> Result<Self, EditorError> {
        let text = fs::read_to_string(path).map_err(|e| EditorError::io(path, e))?;
        tracing::info!(path = %path.display(), chars = text.chars().count(), "read file");
        Ok(Self {
            rope: Rope::from_str(&text),
            path: Some(path.to_path_buf()),
            modified: false,
        })
    }

    // -- Text access --------------------------------------------------------

    /// Number of lines. Empty text has one empty line, and text ending in a
    /// line break has an empty last line.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    #[inline]
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// A line including its line break, if any.
    #[must_use]
    pub fn line(&self, line: usize) -> Option<RopeSlice<'_>> {
        (line < self.rope.len_lines()).then(|| self.rope.line(line))
    }

    /// Chars in a line **excluding** its line break. A `\r` right before the
    /// `\n` belongs to the break, so CRLF files show the same lines.
    #[must_use]
    pub fn line_content_len(&self, line: usize) -> Option<usize> {
        self.line(line).map(|slice| {
            let total = slice.len_chars();
            match total.checked_sub(1).map(|last| slice.char(last)) {
                Some('\n') if total >= 2 && slice.char(total - 2) == '\r' => total - 2,
                Some('\n') => total - 1,
                _ => total,
            }
        })
    }

    /// The text of a line without its line break.
    #[must_use]
    pub fn line_text(&self, line: usize) -> Option<String> {
        let len = self.line_content_len(line)?;
        self.line(line).map(|slice| slice.slice(..len).to_string())
    }

    #[must_use]
    pub fn char_at(&self, pos: Position) -> Option<char> {
        let idx = self.pos_to_char_idx(pos)?;
        (idx < self.rope.len_chars()).then(|| self.rope.char(idx))
    }

    /// The full text.
    #[must_use]
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    // -- Coordinate conversion ----------------------------------------------

    /// `None` if the line does not exist or the column runs past the line
    /// (its break included). A column equal to the line's char count is
    /// valid.
    #[must_use]
    pub fn pos_to_char_idx(&self, pos: Position) -> Option<usize> {
        let line = self.line(pos.line)?;
        if pos.col > line.len_chars() {
            return None;
        }
        Some(self.rope.line_to_char(pos.line) + pos.col)
    }

    /// `None` if `char_idx > len_chars()`.
    #[must_use]
    pub fn char_idx_to_pos(&self, char_idx: usize) -> Option<Position> {
        if char_idx > self.rope.len_chars() {
            return None;
        }
        let line = self.rope.char_to_line(char_idx);
        Some(Position::new(line, char_idx - self.rope.line_to_char(line)))
    }

    /// The nearest position that sits on a line's content: the line is
    /// limited to the last one and the column to the content length.
    #[must_use]
    pub fn clamp_position(&self, pos: Position) -> Position {
        let line = pos.line.min(self.line_count().saturating_sub(1));
        let col = pos.col.min(self.line_content_len(line).unwrap_or(0));
        Position::new(line, col)
    }

    /// The position just after the last character.
    #[must_use]
    pub fn end_position(&self) -> Position {
        self.char_idx_to_pos(self.rope.len_chars())
            .unwrap_or(Position::ZERO)
    }

    // -- Editing ------------------------------------------------------------

    /// Insert `text` at `pos` and return the position right after it.
    /// `None` (nothing inserted) if `pos` is not in the buffer.
    pub fn insert(&mut self, pos: Position, text: &str) -> Option<Position> {
        let idx = self.pos_to_char_idx(pos)?;
        self.rope.insert(idx, text);
        self.modified = true;
        self.char_idx_to_pos(idx + text.chars().count())
    }

    /// Delete the text in `range`. Returns `false` (nothing deleted) if an
    /// endpoint is not in the buffer.
    pub fn delete(&mut self, range: Range) -> bool {
        let (Some(start), Some(end)) = (
            self.pos_to_char_idx(range.start),
            self.pos_to_char_idx(range.end),
        ) else {
            return false;
        };
        if start < end {
            self.rope.remove(start..end);
            self.modified = true;
        }
        true
    }

    // -- Search -------------------------------------------------------------

    /// Char index of the first literal, case-sensitive occurrence of
    /// `pattern` at or after `from`. An empty pattern never matches.
    ///
    /// Walks the rope from `from` and stops at the first match, so the cost
    /// is the distance to that match times the pattern length. Nothing past
    /// the match is copied.
    #[must_use]
    pub fn find(&self, pattern: &str, from: usize) -> Option<usize> {
        let pat: Vec<char> = pattern.chars().collect();
        let first = *pat.first()?;
        let last_start = self.rope.len_chars().checked_sub(pat.len())?;
        if from > last_start {
            return None;
        }
        self.rope
            .chars_at(from)
            .take(last_start - from + 1)
            .enumerate()
            .filter(|&(_, ch)| ch == first)
            .map(|(offset, _)| from + offset)
            .find(|&start| self.rope.chars_at(start).zip(&pat).all(|(a, &b)| a == b))
    }

    // -- File I/O and metadata ----------------------------------------------

    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// True after any edit since the buffer was created, read or written.
    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// Write the contents to `path`, replacing whatever is there, and
    /// remember the path.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Io`] if the write fails.
    pub fn write_to(&mut self, path: &Path) -> Result<(), EditorError> {
        let contents = self.contents();
        fs::write(path, &contents).map_err(|e| EditorError::io(path, e))?;
        tracing::info!(path = %path.display(), bytes = contents.len(), "wrote file");
        self.path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("lines", &self.line_count())
            .field("chars", &self.len_chars())
            .field("modified", &self.modified)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // -- Construction -------------------------------------------------------

    #[test]
    fn new_buffer_has_one_empty_line() {
        let buf = Buffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.end_position(), Position::ZERO);
        assert!(!buf.is_modified());
    }

    #[test]
    fn trailing_newline_makes_empty_last_line() {
        let buf = Buffer::from_text("hello\nworld\n");
        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.end_position(), Position::new(2, 0));
    }

    // -- Lines --------------------------------------------------------------

    #[test]
    fn content_len_excludes_breaks() {
        let buf = Buffer::from_text("ab\r\ncd\n\nef");
        assert_eq!(buf.line_content_len(0), Some(2));
        assert_eq!(buf.line_content_len(1), Some(2));
        assert_eq!(buf.line_content_len(2), Some(0));
        assert_eq!(buf.line_content_len(3), Some(2));
        assert_eq!(buf.line_content_len(4), None);
    }

    #[test]
    fn only_newline_splits_lines() {
        let buf = Buffer::from_text("a\rb\u{000B}c\u{000C}d\u{0085}e\u{2028}f\u{2029}g\nh");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_content_len(0), Some(13));
        assert_eq!(buf.line_text(1).as_deref(), Some("h"));
        assert_eq!(buf.char_idx_to_pos(13), Some(Position::new(0, 13)));
    }

    #[test]
    fn line_text_strips_break() {
        let buf = Buffer::from_text("first\nsecond");
        assert_eq!(buf.line_text(0).as_deref(), Some("first"));
        assert_eq!(buf.line_text(1).as_deref(), Some("second"));
        assert_eq!(buf.line_text(2), None);
    }

    #[test]
    fn char_at_counts_chars_not_bytes() {
        let buf = Buffer::from_text("café\nx");
        assert_eq!(buf.char_at(Position::new(0, 3)), Some('é'));
        assert_eq!(buf.char_at(Position::new(0, 4)), Some('\n'));
        assert_eq!(buf.char_at(Position::new(1, 1)), None);
    }

    // -- Conversion ---------------------------------------------------------

    #[test]
    fn pos_and_index_convert_both_ways() {
        let buf = Buffer::from_text("abc\ndef");
        assert_eq!(buf.pos_to_char_idx(Position::new(1, 2)), Some(6));
        assert_eq!(buf.char_idx_to_pos(6), Some(Position::new(1, 2)));
        assert_eq!(buf.pos_to_char_idx(Position::new(1, 3)), Some(7));
        assert_eq!(buf.pos_to_char_idx(Position::new(1, 4)), None);
        assert_eq!(buf.char_idx_to_pos(8), None);
    }

    #[test]
    fn clamp_limits_line_and_col() {
        let buf = Buffer::from_text("abc\nde");
        assert_eq!(buf.clamp_position(Position::new(0, 10)), Position::new(0, 3));
        assert_eq!(buf.clamp_position(Position::new(9, 9)), Position::new(1, 2));
    }

    // -- Editing ------------------------------------------------------------

    #[test]
    fn insert_returns_position_after_text() {
        let mut buf = Buffer::from_text("ac");
        assert_eq!(buf.insert(Position::new(0, 1), "b\n"), Some(Position::new(1, 0)));
        assert_eq!(buf.contents(), "ab\nc");
        assert!(buf.is_modified());
    }

    #[test]
    fn insert_out_of_bounds_is_refused() {
        let mut buf = Buffer::from_text("ab");
        assert_eq!(buf.insert(Position::new(3, 0), "x"), None);
        assert_eq!(buf.contents(), "ab");
        assert!(!buf.is_modified());
    }

    #[test]
    fn delete_joins_lines() {
        let mut buf = Buffer::from_text("ab\ncd");
        assert!(buf.delete(Range::new(Position::new(0, 2), Position::new(1, 0))));
        assert_eq!(buf.contents(), "abcd");
    }

    // -- Search -------------------------------------------------------------

    #[test]
    fn find_is_literal_and_case_sensitive() {
        let buf = Buffer::from_text("a.c Abc abc");
        assert_eq!(buf.find("abc", 0), Some(8));
        assert_eq!(buf.find("a.c", 1), None);
        assert_eq!(buf.find("", 0), None);
    }

    #[test]
    fn find_crosses_lines_and_stops_at_the_end() {
        let buf = Buffer::from_text("ab\ncd");
        assert_eq!(buf.find("b\nc", 0), Some(1));
        assert_eq!(buf.find("cd", 4), None);
        assert_eq!(buf.find("cd", 3), Some(3));
        assert_eq!(buf.find("cde", 0), None);
        assert_eq!(buf.find("x", 99), None);
    }

    #[test]
    fn find_walks_a_long_line_match_by_match() {
        let n = 50_000;
        let buf = Buffer::from_text(&"a ".repeat(n));
        let mut from = 0;
        let mut found = 0;
        while let Some(idx) = buf.find("a", from) {
            assert_eq!(idx, from);
            found += 1;
            from = idx + 2;
        }
        assert_eq!(found, n);
    }

    #[test]
    fn find_reports_char_index_after_multibyte_text() {
        let buf = Buffer::from_text("éé\nxé");
        assert_eq!(buf.find("xé", 0), Some(3));
        assert_eq!(buf.find("é", 1), Some(1));
        assert_eq!(buf.find("é", 5), None);
    }

    // -- File I/O -----------------------------------------------------------

    #[test]
    fn write_then_read_round_trips_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        for text in ["", "no newline", "one\ntwo\n", "crlf\r\nkept\r\n", "\n\n"] {
            let mut buf = Buffer::from_text(text);
            buf.write_to(&path).unwrap();
            let back = Buffer::from_file(&path).unwrap();
            assert_eq!(back.contents(), text);
            assert_eq!(back.path(), Some(path.as_path()));
        }
    }

    #[test]
    fn write_clears_modified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut buf = Buffer::new();
        buf.insert(Position::ZERO, "x");
        buf.write_to(&path).unwrap();
        assert!(!buf.is_modified());
        assert_eq!(buf.path(), Some(path.as_path()));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Buffer::from_file(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, EditorError::Io { .. }));
    }
}
