//! Run commands against a text surface.
//!
//! [`dispatch`] is called after every command-line keystroke. It parses the
//! command line, clears it when a command matched, applies the command and
//! hands back an [`Effect`] for the things only the window can do: change
//! mode, show dialogs, close.

use crate::command::{Command, CommandLine, Trigger, parse};
use crate::error::EditorError;
use crate::position::Range;
use crate::search;
use crate::surface::TextSurface;
use crate::tag::Tag;

/// What the window must do after a command ran.
#[derive(Debug)]
pub enum Effect {
    /// Nothing matched, or the command was fully handled.
    None,
    /// Switch to insert mode.
    EnterInsert,
    /// Ask for a file name and save; close the window afterwards if
    /// `then_close`.
    SaveAs { then_close: bool },
    /// Ask whether to quit without saving.
    ConfirmQuit,
    /// Show an error popup.
    Error(EditorError),
}

/// Parse `line` and run the command it holds, if any.
///
/// The command line is cleared only when a command matched.
pub fn dispatch(
    surface: &mut impl TextSurface,
    line: &mut CommandLine,
    trigger: Trigger,
) -> Effect {
    let Some(command) = parse(line.text(), trigger) else {
        return Effect::None;
    };
    line.clear();
    execute(surface, command)
}

/// Apply one command.
pub fn execute(surface: &mut impl TextSurface, command: Command) -> Effect {
    tracing::debug!(?command, cursor = ?surface.cursor(), "execute");

    match command {
        Command::OpenBelow => {
            surface.tag_clear(Tag::Highlight);
            let end = surface.line_end(surface.cursor());
            surface.set_cursor(end);
            surface.insert_at_cursor("\n");
            enter_insert(surface)
        }
        Command::OpenAbove => {
            surface.tag_clear(Tag::Highlight);
            let start = surface.line_start(surface.cursor());
            surface.set_cursor(start);
            surface.insert_at_cursor("\n");
            let above = surface.previous_line(surface.cursor());
            surface.set_cursor(above);
            enter_insert(surface)
        }
        Command::GotoStart => {
            surface.tag_clear(Tag::Highlight);
            let start = surface.start();
            surface.set_cursor(start);
            let marked = Range::new(start, surface.offset(start, 1));
            surface.tag_add(Tag::Highlight, marked);
            Effect::None
        }
        Command::GotoEnd => {
            surface.tag_clear(Tag::Highlight);
            let end = surface.end();
            surface.set_cursor(end);
            let marked = Range::new(surface.offset(end, -1), end);
            surface.tag_add(Tag::Highlight, marked);
            Effect::None
        }
        Command::Insert => enter_insert(surface),
        Command::InsertLineStart => {
            let start = surface.line_start(surface.cursor());
            surface.set_cursor(start);
            enter_insert(surface)
        }
        Command::AppendLineEnd => {
            let end = surface.line_end(surface.cursor());
            surface.set_cursor(end);
            enter_insert(surface)
        }
        Command::Search(pattern) => match search::tag_matches(surface, &pattern) {
            Ok(_) => Effect::None,
            Err(err) => Effect::Error(err),
        },
        Command::WriteQuit => Effect::SaveAs { then_close: true },
        Command::Write => Effect::SaveAs { then_close: false },
        Command::Quit => Effect::ConfirmQuit,
        Command::Unrecognized(text) => {
            tracing::warn!(command = %text, "unrecognized command");
            Effect::Error(EditorError::Unrecognized)
        }
    }
}

/// Drop every tag and switch to insert mode. The cursor stays put.
pub fn enter_insert(surface: &mut impl TextSurface) -> Effect {
    surface.tag_clear(Tag::Highlight);
    surface.tag_clear(Tag::Search);
    Effect::EnterInsert
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
