//! Errors surfaced to the user.
//!
//! Every variant ends up in an error popup, so `Display` is the popup body.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    /// Reading or writing a document failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A `:` command other than `:w`, `:wq` or `:q`.
    #[error("Command not recognized.")]
    Unrecognized,

    /// A search that tagged nothing, including an empty pattern.
    #[error("No patterns in this file match the specified pattern.")]
    PatternNotFound,
}

impl EditorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
