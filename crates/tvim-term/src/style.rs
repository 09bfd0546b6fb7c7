// SPDX-License-Identifier: MIT
//
// How a cell looks: two colors and a few text attributes.
//
// tvim has a small, fixed vocabulary here. Fonts map to bold and italic,
// menu mnemonics are underlined, the menu bar and status line are drawn
// inverse. Anything a theme can express fits in one `Style`.

use crate::color::CellColor;

// ─── Attributes ─────────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Text attributes, each one SGR parameter.
    ///
    /// ```
    /// use tvim_term::style::Attr;
    ///
    /// let status = Attr::BOLD | Attr::INVERSE;
    /// assert!(status.contains(Attr::INVERSE));
    /// assert_eq!(status.sgr_codes().collect::<Vec<_>>(), [1, 7]);
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        const BOLD      = 1 << 0;
        const ITALIC    = 1 << 1;
        /// Menu mnemonics.
        const UNDERLINE = 1 << 2;
        /// Menu bar and status line.
        const INVERSE   = 1 << 3;
    }
}

impl Attr {
    /// SGR parameters that switch these attributes on, in ascending order.
    pub fn sgr_codes(self) -> impl Iterator<Item = u8> {
        [(Self::BOLD, 1), (Self::ITALIC, 3), (Self::UNDERLINE, 4), (Self::INVERSE, 7)]
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, code)| code)
    }
}

// ─── Style ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    pub fg: CellColor,
    pub bg: CellColor,
    pub attrs: Attr,
}

impl Style {
    /// Terminal default colors, no attributes.
    pub const PLAIN: Self = Self::new(CellColor::Default, CellColor::Default, Attr::empty());

    #[must_use]
    pub const fn new(fg: CellColor, bg: CellColor, attrs: Attr) -> Self {
        Self { fg, bg, attrs }
    }

    #[must_use]
    pub const fn with_bg(self, bg: CellColor) -> Self {
        Self { bg, ..self }
    }

    /// Add attributes on top of the ones already set.
    #[must_use]
    pub const fn add_attrs(self, attrs: Attr) -> Self {
        Self {
            attrs: self.attrs.union(attrs),
            ..self
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sgr_codes_follow_flag_order() {
        assert_eq!(Attr::empty().sgr_codes().count(), 0);
        let all: Vec<u8> = Attr::all().sgr_codes().collect();
        assert_eq!(all, [1, 3, 4, 7]);
    }

    #[test]
    fn add_attrs_keeps_existing_ones() {
        let status = Style::PLAIN.add_attrs(Attr::INVERSE).add_attrs(Attr::BOLD);
        assert_eq!(status.attrs, Attr::BOLD | Attr::INVERSE);
        assert_eq!(status.fg, CellColor::Default);
    }

    #[test]
    fn with_bg_only_touches_background() {
        let text = Style::new(CellColor::Rgb(1, 1, 1), CellColor::Rgb(2, 2, 2), Attr::ITALIC);
        let tagged = text.with_bg(CellColor::Rgb(0, 0, 255));
        assert_eq!(tagged.fg, text.fg);
        assert_eq!(tagged.attrs, Attr::ITALIC);
        assert_eq!(tagged.bg, CellColor::Rgb(0, 0, 255));
    }
}
