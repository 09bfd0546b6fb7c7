// SPDX-License-Identifier: MIT
//
// Colors as tvim names them.
//
// Themes and tags use Tk color names ("steel blue", "gray17", "red4"),
// which are the X11 `rgb.txt` names. Every color resolves to 24-bit RGB
// when the theme is built; the only other value a cell can hold is the
// terminal's own default.

use std::fmt;

// ─── CellColor ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColor {
    Rgb(u8, u8, u8),
    /// Whatever the terminal uses when nothing is set.
    #[default]
    Default,
}

impl CellColor {
    /// Resolve a Tk color name or a `#rgb` / `#rrggbb` string.
    ///
    /// Case and spaces in names are ignored, as Tk does.
    ///
    /// ```
    /// use tvim_term::color::CellColor;
    ///
    /// assert_eq!(CellColor::named("Papaya Whip"), Some(CellColor::Rgb(255, 239, 213)));
    /// assert_eq!(CellColor::named("#f80"), Some(CellColor::Rgb(255, 136, 0)));
    /// assert_eq!(CellColor::named("octarine"), None);
    /// ```
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        if let Some(hex) = name.strip_prefix('#') {
            return from_hex(hex);
        }
        let key: String = name
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        TK_NAMES
            .iter()
            .find(|(n, _)| *n == key)
            .map(|&(_, [r, g, b])| Self::Rgb(r, g, b))
    }
}

impl fmt::Debug for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Default => f.write_str("default"),
        }
    }
}

// ─── Tk Names ───────────────────────────────────────────────────────────────

/// The names tvim's presets, tags and chrome use. Keys are lowercase with
/// spaces removed; `gray` and `grey` spell the same entries.
const TK_NAMES: &[(&str, [u8; 3])] = &[
    // Theme presets.
    ("white", [255, 255, 255]),
    ("black", [0, 0, 0]),
    ("gray", [190, 190, 190]),
    ("grey", [190, 190, 190]),
    ("gray17", [43, 43, 43]),
    ("grey17", [43, 43, 43]),
    ("steelblue", [70, 130, 180]),
    ("midnightblue", [25, 25, 112]),
    ("papayawhip", [255, 239, 213]),
    ("lightseagreen", [32, 178, 170]),
    ("dodgerblue", [30, 144, 255]),
    ("gold", [255, 215, 0]),
    ("red4", [139, 0, 0]),
    // Tags.
    ("yellow", [255, 255, 0]),
    ("blue", [0, 0, 255]),
    // Menus and popups.
    ("red", [255, 0, 0]),
    ("darkcyan", [0, 139, 139]),
    ("gray19", [48, 48, 48]),
    ("grey19", [48, 48, 48]),
    ("gray23", [59, 59, 59]),
    ("grey23", [59, 59, 59]),
    ("gray35", [89, 89, 89]),
    ("grey35", [89, 89, 89]),
];

fn from_hex(hex: &str) -> Option<CellColor> {
    let nibbles = hex
        .chars()
        .map(|c| c.to_digit(16).and_then(|d| u8::try_from(d).ok()))
        .collect::<Option<Vec<u8>>>()?;
    match *nibbles.as_slice() {
        [r, g, b] => Some(CellColor::Rgb(r * 17, g * 17, b * 17)),
        [r1, r2, g1, g2, b1, b2] => Some(CellColor::Rgb((r1 << 4) | r2, (g1 << 4) | g2, (b1 << 4) | b2)),
        _ => None,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
