// SPDX-License-Identifier: MIT
//
// FrameWriter: the bytes of one frame, plus what the terminal looks like
// after them.
//
// It knows where the terminal cursor will be and which style is in
// effect, so a run of cells on one row with one style is a single move, a
// single SGR and then plain text.

use std::io::{self, Write};

use crate::ansi::{self, Command};
use crate::buffer::char_width;
use crate::cell::{Cell, Glyph};
use crate::style::Style;

// ─── FrameWriter ────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct FrameWriter {
    bytes: Vec<u8>,
    /// Where the next printed character lands, if known.
    cursor: Option<(u16, u16)>,
    /// The style in effect, if known.
    style: Option<Style>,
}

impl FrameWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a frame: drop the bytes and assume nothing about the terminal.
    pub fn begin(&mut self) {
        self.bytes.clear();
        self.cursor = None;
        self.style = None;
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn command(&mut self, command: Command) {
        // Writing into a Vec cannot fail.
        let _ = write!(self.bytes, "{command}");
        match command {
            Command::MoveTo { x, y } => self.cursor = Some((x, y)),
            Command::ResetStyle => self.style = None,
            Command::ClearScreen => self.cursor = None,
            _ => {}
        }
    }

    /// Print `cell` at `(x, y)`.
    pub fn put(&mut self, x: u16, y: u16, cell: &Cell) {
        let ch = match cell.glyph {
            // The character to the left already covered this column.
            Glyph::WideTail if self.cursor == Some((x.saturating_add(1), y)) => return,
            Glyph::WideTail => ' ',
            Glyph::Char(ch) if ch.is_control() => '?',
            Glyph::Char(ch) => ch,
        };
        if self.cursor != Some((x, y)) {
            self.command(Command::MoveTo { x, y });
        }
        if self.style != Some(cell.style) {
            let _ = ansi::set_style(&mut self.bytes, self.style, cell.style);
            self.style = Some(cell.style);
        }

        let mut utf8 = [0; 4];
        self.bytes.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
        let advance = u16::try_from(char_width(ch)).unwrap_or(1);
        self.cursor = Some((x.saturating_add(advance), y));
    }

    /// Send everything to `w` and flush it.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        w.write_all(&self.bytes)?;
        self.bytes.clear();
        w.flush()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
