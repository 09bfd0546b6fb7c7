//! Modal dialogs: messages, the quit question and file name prompts.
//!
//! A popup takes every key while it is open. [`Popup::handle_key`] reports
//! what happened as a [`PopupOutcome`]; the window acts on it and drops
//! the popup once it is no longer pending.

use std::path::{Path, PathBuf};

use tvim_term::input::{KeyCode, KeyEvent};

use crate::command::CommandLine;

// ---------------------------------------------------------------------------
// Fixed text
// ---------------------------------------------------------------------------

pub const ERROR_TITLE: &str = "Oh no, an error!";

pub const ABOUT_TITLE: &str = "About";
pub const ABOUT_MESSAGE: &str =
    "A Text Editor with basic Vim functionality.\n Implemented by Titan Ngo.";

pub const COMMANDS_TITLE: &str = "Commands";
pub const COMMANDS_MESSAGE: &str = "\
ESC  -> exit insert mode and enter command mode
---------------------------------------
COMMAND MODE:
gg   -> move cursor to beginning of file
G    -> move cursor to end of file
o    -> create a new line below the cursor and enter insert \t\tmode
O    -> create a new line below the cursor and enter insert \t\tmode
i    -> enter insert mode at the cursor
I    -> enter insert mode at the beginning of this line
A    -> enter insert mode at the end of this line
:w   -> save as
:wq  -> save as and quit
:q   -> quit without saving
?pattern  -> search for the 'pattern' in this file";

pub const QUIT_TITLE: &str = "Quit";
pub const QUIT_QUESTION: &str = "Are you sure you want to quit?";

pub const OPEN_TITLE: &str = "Open";
pub const SAVE_AS_TITLE: &str = "Save As";

/// Appended to a save name that has no extension.
pub const DEFAULT_EXTENSION: &str = "txt";

/// The path a Save As entry names, with [`DEFAULT_EXTENSION`] added when
/// the file name has none.
#[must_use]
pub fn save_path(input: &str) -> PathBuf {
    let path = Path::new(input);
    if path.extension().is_some() || path.file_name().is_none() {
        return path.to_path_buf();
    }
    path.with_extension(DEFAULT_EXTENSION)
}

// ---------------------------------------------------------------------------
// Popup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Why a file name is being asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPurpose {
    /// File → Open.
    Open,
    /// `:w`, `:wq` or File → Save.
    SaveAs { then_close: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Popup {
    Message {
        title: String,
        body: String,
        severity: Severity,
    },
    /// A yes/no question. `yes` is the highlighted button.
    Confirm {
        title: String,
        question: String,
        yes: bool,
    },
    /// A one-line file name entry.
    Prompt {
        title: String,
        field: CommandLine,
        purpose: PromptPurpose,
    },
}

/// Result of a key sent to a popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupOutcome {
    /// Still open.
    Pending,
    /// A message was acknowledged.
    Dismissed,
    /// The question was answered.
    Answered(bool),
    /// A file name was entered.
    Submitted { purpose: PromptPurpose, text: String },
    /// The prompt was cancelled with Escape.
    Cancelled(PromptPurpose),
}

impl Popup {
    #[must_use]
    pub fn info(title: &str, body: &str) -> Self {
        Self::Message {
            title: title.to_string(),
            body: body.to_string(),
            severity: Severity::Info,
        }
    }

    /// An error popup under the fixed error title.
    #[must_use]
    pub fn error(body: impl Into<String>) -> Self {
        Self::Message {
            title: ERROR_TITLE.to_string(),
            body: body.into(),
            severity: Severity::Error,
        }
    }

    /// The quit question. "No" starts highlighted.
    #[must_use]
    pub fn confirm_quit() -> Self {
        Self::Confirm {
            title: QUIT_TITLE.to_string(),
            question: QUIT_QUESTION.to_string(),
            yes: false,
        }
    }

    #[must_use]
    pub fn prompt(purpose: PromptPurpose) -> Self {
        let title = match purpose {
            PromptPurpose::Open => OPEN_TITLE,
            PromptPurpose::SaveAs { .. } => SAVE_AS_TITLE,
        };
        Self::Prompt {
            title: title.to_string(),
            field: CommandLine::new(),
            purpose,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Message { title, .. } | Self::Confirm { title, .. } | Self::Prompt { title, .. } => {
                title
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PopupOutcome {
        match self {
            Self::Message { .. } => match key.code {
                KeyCode::Enter | KeyCode::Escape | KeyCode::Char(' ') => PopupOutcome::Dismissed,
                _ => PopupOutcome::Pending,
            },
            Self::Confirm { yes, .. } => match key.code {
                KeyCode::Char('y' | 'Y') => PopupOutcome::Answered(true),
                KeyCode::Char('n' | 'N') | KeyCode::Escape => PopupOutcome::Answered(false),
                KeyCode::Enter => PopupOutcome::Answered(*yes),
                KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                    *yes = !*yes;
                    PopupOutcome::Pending
                }
                _ => PopupOutcome::Pending,
            },
            Self::Prompt { field, purpose, .. } => {
                if key.is_chord() {
                    return PopupOutcome::Pending;
                }
                match key.code {
                    KeyCode::Escape => PopupOutcome::Cancelled(*purpose),
                    KeyCode::Enter if field.text().trim().is_empty() => PopupOutcome::Pending,
                    KeyCode::Enter => PopupOutcome::Submitted {
                        purpose: *purpose,
                        text: field.text().trim().to_string(),
                    },
                    KeyCode::Char(ch) => {
                        field.insert_char(ch);
                        PopupOutcome::Pending
                    }
                    KeyCode::Backspace => {
                        field.backspace();
                        PopupOutcome::Pending
                    }
                    KeyCode::Delete => {
                        field.delete();
                        PopupOutcome::Pending
                    }
                    KeyCode::Left => {
                        field.move_left();
                        PopupOutcome::Pending
                    }
                    KeyCode::Right => {
                        field.move_right();
                        PopupOutcome::Pending
                    }
                    KeyCode::Home => {
                        field.move_home();
                        PopupOutcome::Pending
                    }
                    KeyCode::End => {
                        field.move_end();
                        PopupOutcome::Pending
                    }
                    _ => PopupOutcome::Pending,
                }
            }
        }
    }

    /// Pasted text goes into a prompt's field. Other popups ignore it.
    pub fn paste(&mut self, text: &str) {
        if let Self::Prompt { field, .. } = self {
            field.insert_str(text);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
