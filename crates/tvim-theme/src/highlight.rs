//! Theme assembly: named highlight groups for every part of the screen.
//!
//! Colors are Tk names resolved to `CellColor` when the theme is built, so
//! painting only copies a `Style` into cells.

use tvim_term::color::CellColor;
use tvim_term::style::{Attr, Style};

use crate::builtin::ThemeKind;

// ---------------------------------------------------------------------------
// HighlightGroup
// ---------------------------------------------------------------------------

/// A resolved style for one UI element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighlightGroup {
    pub fg: CellColor,
    pub bg: CellColor,
    pub attrs: Attr,
}

impl HighlightGroup {
    #[must_use]
    pub const fn fg_bg(fg: CellColor, bg: CellColor) -> Self {
        Self {
            fg,
            bg,
            attrs: Attr::empty(),
        }
    }

    #[must_use]
    pub const fn attrs(attrs: Attr) -> Self {
        Self {
            fg: CellColor::Default,
            bg: CellColor::Default,
            attrs,
        }
    }

    #[must_use]
    pub const fn with_attrs(self, attrs: Attr) -> Self {
        Self { attrs, ..self }
    }

    /// The cell style this group paints with.
    #[must_use]
    pub const fn style(self) -> Style {
        Style::new(self.fg, self.bg, self.attrs)
    }
}

/// A Tk color name from the table `CellColor::named` knows.
fn tk(name: &str) -> CellColor {
    CellColor::named(name).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// Every style the view paints with.
///
/// Only `text` changes when a preset is picked from the Themes menu; the
/// chrome around it keeps the same fixed colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Document text.
    pub text: HighlightGroup,
    /// Background of the `gg` / `G` marker tag.
    pub highlight_tag: CellColor,
    /// Background of search matches.
    pub search_tag: CellColor,
    /// Top row with the menu titles.
    pub menu_bar: HighlightGroup,
    /// An open dropdown.
    pub menu: HighlightGroup,
    /// The selected dropdown entry or open title.
    pub menu_selected: HighlightGroup,
    pub status_line: HighlightGroup,
    pub command_line: HighlightGroup,
    /// Popup body and frame.
    pub popup: HighlightGroup,
    pub popup_title: HighlightGroup,
    /// Title of an error popup.
    pub error_title: HighlightGroup,
    /// Text entry inside a prompt popup.
    pub field: HighlightGroup,
}

impl Theme {
    /// Chrome in fixed Tk colors, document text in the preset's pair.
    #[must_use]
    pub fn preset(kind: ThemeKind) -> Self {
        let popup_bg = tk("gray19");

        Self {
            text: kind.text_style(),
            highlight_tag: tk("yellow"),
            search_tag: tk("blue"),
            menu_bar: HighlightGroup::attrs(Attr::INVERSE),
            menu: HighlightGroup::fg_bg(CellColor::Default, tk("gray23")),
            menu_selected: HighlightGroup::fg_bg(tk("black"), tk("dark cyan")).with_attrs(Attr::BOLD),
            status_line: HighlightGroup::attrs(Attr::BOLD.union(Attr::INVERSE)),
            command_line: HighlightGroup::default(),
            popup: HighlightGroup::fg_bg(CellColor::Default, popup_bg),
            popup_title: HighlightGroup::fg_bg(CellColor::Default, popup_bg).with_attrs(Attr::BOLD),
            error_title: HighlightGroup::fg_bg(tk("red"), popup_bg).with_attrs(Attr::BOLD),
            field: HighlightGroup::fg_bg(CellColor::Default, tk("gray35")),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::preset(ThemeKind::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_sets_text_only() {
        let normal = Theme::preset(ThemeKind::Normal);
        let beach = Theme::preset(ThemeKind::Beach);
        assert_ne!(normal.text, beach.text);
        assert_eq!(normal.status_line, beach.status_line);
        assert_eq!(normal.search_tag, beach.search_tag);
    }

    #[test]
    fn tag_colors_are_yellow_and_blue() {
        let theme = Theme::default();
        assert_eq!(theme.highlight_tag, CellColor::Rgb(255, 255, 0));
        assert_eq!(theme.search_tag, CellColor::Rgb(0, 0, 255));
    }

    #[test]
    fn chrome_colors_all_resolve() {
        let theme = Theme::default();
        for group in [theme.menu, theme.menu_selected, theme.popup, theme.error_title, theme.field] {
            assert!(matches!(group.bg, CellColor::Rgb(..)), "{group:?}");
        }
        assert_eq!(theme.error_title.fg, CellColor::Rgb(255, 0, 0));
        assert_eq!(theme.popup_title.bg, theme.popup.bg);
    }

    #[test]
    fn style_carries_every_field() {
        let status = Theme::default().status_line;
        let style = status.style();
        assert_eq!((style.fg, style.bg, style.attrs), (status.fg, status.bg, status.attrs));
    }

    #[test]
    fn default_is_normal() {
        assert_eq!(Theme::default().text, ThemeKind::Normal.text_style());
    }
}
