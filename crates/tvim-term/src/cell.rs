// SPDX-License-Identifier: MIT
//
// One screen position.
//
// A double-width character (CJK, some emoji) occupies two cells: the left
// one holds the character, the right one is a `WideTail` carrying the same
// style so the background runs on under it.

use crate::style::Style;

// ─── Glyph ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    Char(char),
    /// Right half of the double-width character to the left.
    WideTail,
}

// ─── Cell ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub glyph: Glyph,
    pub style: Style,
}

impl Cell {
    /// What a cleared frame is filled with.
    pub const BLANK: Self = Self::new(' ', Style::PLAIN);

    #[must_use]
    pub const fn new(ch: char, style: Style) -> Self {
        Self {
            glyph: Glyph::Char(ch),
            style,
        }
    }

    #[must_use]
    pub const fn wide_tail(style: Style) -> Self {
        Self {
            glyph: Glyph::WideTail,
            style,
        }
    }

    #[must_use]
    pub const fn is_wide_tail(self) -> bool {
        matches!(self.glyph, Glyph::WideTail)
    }

    /// `None` for the right half of a wide character.
    #[must_use]
    pub const fn character(self) -> Option<char> {
        match self.glyph {
            Glyph::Char(ch) => Some(ch),
            Glyph::WideTail => None,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
