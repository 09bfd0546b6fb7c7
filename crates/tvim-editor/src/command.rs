//! The command line and its commands.
//!
//! The command line is a one-row input that receives keys in command mode.
//! After every keystroke its whole text is run through [`parse`]:
//!
//! | Text         | Fires on | Command                       |
//! |--------------|----------|-------------------------------|
//! | `o`          | any key  | open a line below, insert     |
//! | `O`          | any key  | open a line above, insert     |
//! | `gg`         | any key  | go to document start          |
//! | `G`          | any key  | go to document end            |
//! | `i`          | any key  | insert at the cursor          |
//! | `I`          | any key  | insert at line start          |
//! | `A`          | any key  | append at line end            |
//! | `?pattern`   | Enter    | tag every match of `pattern`  |
//! | `:wq`        | Enter    | save as, then close           |
//! | `:q`         | Enter    | ask, then close               |
//! | `:w`         | Enter    | save as                       |
//! | `:` + other  | Enter    | "not recognized" error        |
//!
//! Anything else parses to `None` and stays in the command line.

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `o`
    OpenBelow,
    /// `O`
    OpenAbove,
    /// `gg`
    GotoStart,
    /// `G`
    GotoEnd,
    /// `i`
    Insert,
    /// `I`
    InsertLineStart,
    /// `A`
    AppendLineEnd,
    /// `?pattern`, holding the pattern without the `?`.
    Search(String),
    /// `:wq`
    WriteQuit,
    /// `:q`
    Quit,
    /// `:w`
    Write,
    /// Any other `:` command, holding the full text.
    Unrecognized(String),
}

/// The keystroke that caused a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Enter,
    /// Any other key that changed or moved in the command line.
    Key,
}

/// Classify the command line text.
///
/// Line breaks are dropped first. Single-key commands match on any
/// trigger; `?` and `:` commands need [`Trigger::Enter`] and at least one
/// char after the prefix.
#[must_use]
pub fn parse(text: &str, trigger: Trigger) -> Option<Command> {
    let text: String = text.chars().filter(|&c| c != '\n' && c != '\r').collect();

    let command = match text.as_str() {
        "o" => Command::OpenBelow,
        "O" => Command::OpenAbove,
        "gg" => Command::GotoStart,
        "G" => Command::GotoEnd,
        "i" => Command::Insert,
        "I" => Command::InsertLineStart,
        "A" => Command::AppendLineEnd,
        _ if trigger != Trigger::Enter => return None,
        ":wq" => Command::WriteQuit,
        ":q" => Command::Quit,
        ":w" => Command::Write,
        other => {
            let mut chars = other.chars();
            let prefix = chars.next();
            let rest = chars.as_str();
            if rest.is_empty() {
                return None;
            }
            match prefix {
                Some('?') => Command::Search(rest.to_string()),
                Some(':') => Command::Unrecognized(other.to_string()),
                _ => return None,
            }
        }
    };
    Some(command)
}

// ---------------------------------------------------------------------------
// CommandLine
// ---------------------------------------------------------------------------

/// A single-line text input with a cursor.
///
/// Used for the command line and for the file name field of prompts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    input: String,
    /// Char offset into `input`.
    cursor: usize,
}

impl CommandLine {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            input: String::new(),
            cursor: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.input
    }

    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    pub fn insert_char(&mut self, ch: char) {
        let byte_idx = self.char_to_byte(self.cursor);
        self.input.insert(byte_idx, ch);
        self.cursor += 1;
    }

    /// Insert pasted text. Line breaks are dropped; the input is one line.
    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars().filter(|&c| c != '\n' && c != '\r') {
            self.insert_char(ch);
        }
    }

    /// Returns `true` if a char was deleted.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let byte_idx = self.char_to_byte(self.cursor);
        self.input.remove(byte_idx);
        true
    }

    /// Returns `true` if a char was deleted.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.input.chars().count() {
            return false;
        }
        let byte_idx = self.char_to_byte(self.cursor);
        self.input.remove(byte_idx);
        true
    }

    pub const fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.input.chars().count() {
            self.cursor += 1;
        }
    }

    pub const fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.input.chars().count();
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_idx)
            .map_or(self.input.len(), |(byte_idx, _)| byte_idx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
