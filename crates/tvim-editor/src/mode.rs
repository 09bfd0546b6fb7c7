//! Which widget receives keystrokes.
//!
//! | Mode    | Focus        | Cursor shape |
//! |---------|--------------|--------------|
//! | Insert  | text area    | Bar          |
//! | Command | command line | Block        |

use std::fmt;

use tvim_term::ansi::CursorShape;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Keys edit the document. Every window starts here.
    #[default]
    Insert,
    /// Keys go to the command line. Entered with Escape.
    Command,
}

impl Mode {
    /// Name for the status line.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Command => "COMMAND",
        }
    }

    #[must_use]
    pub const fn cursor_shape(self) -> CursorShape {
        match self {
            Self::Insert => CursorShape::SteadyBar,
            Self::Command => CursorShape::SteadyBlock,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
