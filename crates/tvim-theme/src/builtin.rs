//! The eight preset color pairs offered by the Themes menu.
//!
//! Each preset is a background/foreground pair given as X11 color names.
//! Picking one recolors the document text area; nothing else about the
//! window changes.

use std::fmt;
use std::str::FromStr;

use tvim_term::color::CellColor;

use crate::error::{UnknownName, normalize};
use crate::highlight::HighlightGroup;

/// A preset from the Themes menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeKind {
    #[default]
    Normal,
    DarkMode,
    Gray,
    Sky,
    Evening,
    Beach,
    Ucsd,
    McDonalds,
}

impl ThemeKind {
    /// Every preset, in menu order.
    pub const ALL: [Self; 8] = [
        Self::Normal,
        Self::DarkMode,
        Self::Gray,
        Self::Sky,
        Self::Evening,
        Self::Beach,
        Self::Ucsd,
        Self::McDonalds,
    ];

    /// The menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::DarkMode => "Dark Mode",
            Self::Gray => "Gray",
            Self::Sky => "Sky",
            Self::Evening => "Evening",
            Self::Beach => "Beach",
            Self::Ucsd => "UCSD",
            Self::McDonalds => "McDonald's",
        }
    }

    /// `(background, foreground)` as X11 color names.
    #[must_use]
    pub const fn color_names(self) -> (&'static str, &'static str) {
        match self {
            Self::Normal => ("white", "black"),
            Self::DarkMode => ("gray17", "white"),
            Self::Gray => ("gray", "white"),
            Self::Sky => ("steel blue", "white"),
            Self::Evening => ("midnight blue", "white"),
            Self::Beach => ("papaya whip", "light sea green"),
            Self::Ucsd => ("dodger blue", "gold"),
            Self::McDonalds => ("red4", "gold"),
        }
    }

    /// The text-area style for this preset.
    #[must_use]
    pub fn text_style(self) -> HighlightGroup {
        let (bg, fg) = self.color_names();
        HighlightGroup::fg_bg(
            CellColor::named(fg).unwrap_or_default(),
            CellColor::named(bg).unwrap_or_default(),
        )
    }
}

impl fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ThemeKind {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Self::ALL
            .into_iter()
            .find(|kind| normalize(kind.label()) == key)
            .ok_or_else(|| UnknownName::new("theme", s, Self::ALL.iter().map(|k| k.label())))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
