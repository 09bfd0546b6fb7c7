//! # tvim-theme — colors and fonts for tvim windows
//!
//! - **[`builtin`]** — the eight Themes-menu presets as X11 color pairs
//! - **[`highlight`]** — `HighlightGroup` and the `Theme` the view paints with
//! - **[`font`]** — font family, size and style of a window
//!
//! Every preset, family and style parses from its menu label, which is
//! how the command line picks a starting look.

pub mod builtin;
pub mod error;
pub mod font;
pub mod highlight;

pub use builtin::ThemeKind;
pub use error::UnknownName;
pub use font::{Font, FontFamily, FontStyle};
pub use highlight::{HighlightGroup, Theme};
