//! Font settings of one editor window: family, size and style.
//!
//! A terminal cannot switch typefaces, so the family is informational
//! except for the Symbol face, which is emulated by mapping Latin letters
//! to the Greek letters that face draws in their place. Style maps to the
//! bold and italic cell attributes.

use std::fmt;
use std::str::FromStr;

use tvim_term::style::Attr;

use crate::error::{UnknownName, normalize};

/// Size every window starts with. Nothing changes it.
pub const DEFAULT_SIZE: u16 = 10;

// ---------------------------------------------------------------------------
// FontFamily
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    #[default]
    Courier,
    Times,
    Helvetica,
    ComicSans,
    /// Listed as "????" in the menu. It is the Symbol face.
    Mystery,
}

impl FontFamily {
    pub const ALL: [Self; 5] = [
        Self::Courier,
        Self::Times,
        Self::Helvetica,
        Self::ComicSans,
        Self::Mystery,
    ];

    /// The menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Courier => "Courier",
            Self::Times => "Times",
            Self::Helvetica => "Helvetica",
            Self::ComicSans => "Comic Sans",
            Self::Mystery => "????",
        }
    }

    /// The face name the family stands for.
    #[must_use]
    pub const fn face(self) -> &'static str {
        match self {
            Self::Courier => "Courier",
            Self::Times => "Times",
            Self::Helvetica => "Helvetica",
            Self::ComicSans => "Comic Sans MS",
            Self::Mystery => "Symbol",
        }
    }

    /// How `ch` is drawn in this family.
    #[must_use]
    pub const fn glyph(self, ch: char) -> char {
        match self {
            Self::Mystery => symbol_glyph(ch),
            _ => ch,
        }
    }
}

/// Adobe Symbol encoding for the ASCII letters.
const fn symbol_glyph(ch: char) -> char {
    match ch {
        'A' => 'Α',
        'B' => 'Β',
        'C' => 'Χ',
        'D' => 'Δ',
        'E' => 'Ε',
        'F' => 'Φ',
        'G' => 'Γ',
        'H' => 'Η',
        'I' => 'Ι',
        'J' => 'ϑ',
        'K' => 'Κ',
        'L' => 'Λ',
        'M' => 'Μ',
        'N' => 'Ν',
        'O' => 'Ο',
        'P' => 'Π',
        'Q' => 'Θ',
        'R' => 'Ρ',
        'S' => 'Σ',
        'T' => 'Τ',
        'U' => 'Υ',
        'V' => 'ς',
        'W' => 'Ω',
        'X' => 'Ξ',
        'Y' => 'Ψ',
        'Z' => 'Ζ',
        'a' => 'α',
        'b' => 'β',
        'c' => 'χ',
        'd' => 'δ',
        'e' => 'ε',
        'f' => 'φ',
        'g' => 'γ',
        'h' => 'η',
        'i' => 'ι',
        'j' => 'ϕ',
        'k' => 'κ',
        'l' => 'λ',
        'm' => 'μ',
        'n' => 'ν',
        'o' => 'ο',
        'p' => 'π',
        'q' => 'θ',
        'r' => 'ρ',
        's' => 'σ',
        't' => 'τ',
        'u' => 'υ',
        'v' => 'ϖ',
        'w' => 'ω',
        'x' => 'ξ',
        'y' => 'ψ',
        'z' => 'ζ',
        other => other,
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.face())
    }
}

impl FromStr for FontFamily {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Self::ALL
            .into_iter()
            .find(|family| normalize(family.label()) == key || normalize(family.face()) == key)
            .ok_or_else(|| UnknownName::new("font", s, Self::ALL.iter().map(|f| f.face())))
    }
}

// ---------------------------------------------------------------------------
// FontStyle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    Bold,
    Italic,
    BoldItalic,
    #[default]
    None,
}

impl FontStyle {
    /// Menu order.
    pub const ALL: [Self; 4] = [Self::Bold, Self::Italic, Self::BoldItalic, Self::None];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::BoldItalic => "Bold Italic",
            Self::None => "None",
        }
    }

    /// Cell attributes for text in this style.
    #[must_use]
    pub const fn attrs(self) -> Attr {
        match self {
            Self::Bold => Attr::BOLD,
            Self::Italic => Attr::ITALIC,
            Self::BoldItalic => Attr::BOLD.union(Attr::ITALIC),
            Self::None => Attr::empty(),
        }
    }
}

impl FromStr for FontStyle {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Self::ALL
            .into_iter()
            .find(|style| normalize(style.label()) == key)
            .ok_or_else(|| UnknownName::new("style", s, Self::ALL.iter().map(|st| st.label())))
    }
}

// ---------------------------------------------------------------------------
// Font
// ---------------------------------------------------------------------------

/// The three font fields of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    pub family: FontFamily,
    pub size: u16,
    pub style: FontStyle,
}

impl Font {
    #[must_use]
    pub const fn new(family: FontFamily, style: FontStyle) -> Self {
        Self {
            family,
            size: DEFAULT_SIZE,
            style,
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(FontFamily::default(), FontStyle::default())
    }
}

/// `Courier 10`, `Symbol 10 bold italic`.
impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.size)?;
        match self.style {
            FontStyle::None => Ok(()),
            style => write!(f, " {}", style.label().to_lowercase()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- family --

    #[test]
    fn default_font_is_courier_10_plain() {
        let font = Font::default();
        assert_eq!(font.family, FontFamily::Courier);
        assert_eq!(font.size, 10);
        assert_eq!(font.style, FontStyle::None);
        assert_eq!(font.to_string(), "Courier 10");
    }

    #[test]
    fn mystery_font_is_symbol() {
        assert_eq!(FontFamily::Mystery.face(), "Symbol");
        assert_eq!(FontFamily::Mystery.label(), "????");
        assert_eq!(FontFamily::Mystery.glyph('a'), 'α');
        assert_eq!(FontFamily::Mystery.glyph('W'), 'Ω');
        assert_eq!(FontFamily::Mystery.glyph('1'), '1');
    }

    #[test]
    fn other_families_keep_glyphs() {
        for family in [FontFamily::Courier, FontFamily::Times, FontFamily::ComicSans] {
            assert_eq!(family.glyph('a'), 'a');
        }
    }

    #[test]
    fn parse_family_by_label_or_face() {
        assert_eq!("comic sans".parse(), Ok(FontFamily::ComicSans));
        assert_eq!("Comic Sans MS".parse(), Ok(FontFamily::ComicSans));
        assert_eq!("symbol".parse(), Ok(FontFamily::Mystery));
        assert!("Papyrus".parse::<FontFamily>().is_err());
    }

    // -- style --

    #[test]
    fn style_attrs() {
        assert_eq!(FontStyle::Bold.attrs(), Attr::BOLD);
        assert_eq!(FontStyle::BoldItalic.attrs(), Attr::BOLD | Attr::ITALIC);
        assert!(FontStyle::None.attrs().is_empty());
    }

    #[test]
    fn parse_style() {
        assert_eq!("bold italic".parse(), Ok(FontStyle::BoldItalic));
        assert_eq!("bold-italic".parse(), Ok(FontStyle::BoldItalic));
        assert_eq!("none".parse(), Ok(FontStyle::None));
    }

    #[test]
    fn display_with_style() {
        let font = Font::new(FontFamily::Mystery, FontStyle::BoldItalic);
        assert_eq!(font.to_string(), "Symbol 10 bold italic");
    }
}
