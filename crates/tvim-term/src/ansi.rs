// SPDX-License-Identifier: MIT
//
// The escape sequences tvim sends.
//
// Terminal modes and cursor control are `Command` values that print
// themselves. Styles go out as one SGR sequence per change, carrying only
// what differs from the style already in effect. Coordinates are
// 0-indexed here and 1-indexed on the wire.

use std::fmt::{self, Write as _};
use std::io::{self, Write};

use crate::color::CellColor;
use crate::style::{Attr, Style};

// ─── Cursor Shape ───────────────────────────────────────────────────────────

/// DECSCUSR shape: a bar while typing into the document, a block while
/// typing a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    /// Whatever the user had before tvim started.
    #[default]
    Default,
    SteadyBlock,
    SteadyBar,
}

impl CursorShape {
    const fn param(self) -> u8 {
        match self {
            Self::Default => 0,
            Self::SteadyBlock => 2,
            Self::SteadyBar => 6,
        }
    }
}

// ─── Commands ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveTo { x: u16, y: u16 },
    ShowCursor,
    HideCursor,
    SetCursorShape(CursorShape),
    ClearScreen,
    /// SGR 0. Anything tracking the current style has to forget it.
    ResetStyle,
    /// DEC 1049: the user's screen comes back when this is switched off.
    AlternateScreen(bool),
    /// DEC 2004: pasted text arrives between `ESC[200~` and `ESC[201~`.
    BracketedPaste(bool),
    /// DEC 2026: the terminal holds output until this is switched off.
    SynchronizedUpdate(bool),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = |f: &mut fmt::Formatter<'_>, n: u16, on: bool| write!(f, "\x1b[?{n}{}", if on { 'h' } else { 'l' });
        match *self {
            Self::MoveTo { x, y } => write!(f, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1),
            Self::ShowCursor => mode(f, 25, true),
            Self::HideCursor => mode(f, 25, false),
            Self::SetCursorShape(shape) => write!(f, "\x1b[{} q", shape.param()),
            Self::ClearScreen => f.write_str("\x1b[2J"),
            Self::ResetStyle => f.write_str("\x1b[0m"),
            Self::AlternateScreen(on) => mode(f, 1049, on),
            Self::BracketedPaste(on) => mode(f, 2004, on),
            Self::SynchronizedUpdate(on) => mode(f, 2026, on),
        }
    }
}

/// Write several commands in order.
///
/// # Errors
///
/// Returns an error if writing to `w` fails.
pub fn queue(w: &mut impl Write, commands: &[Command]) -> io::Result<()> {
    commands.iter().try_for_each(|command| write!(w, "{command}"))
}

// ─── SGR ────────────────────────────────────────────────────────────────────

/// Switch the terminal from `current` (or an unknown state) to `next` in a
/// single SGR sequence. Writes nothing when they already match.
///
/// Attributes cannot be switched off one by one portably, so dropping any
/// of them starts the sequence with a reset and then sets everything.
///
/// # Errors
///
/// Returns an error if writing to `w` fails.
pub fn set_style(w: &mut impl Write, current: Option<Style>, next: Style) -> io::Result<()> {
    let base = match current {
        Some(style) if style == next => return Ok(()),
        Some(style) if next.attrs.contains(style.attrs) => Some(style),
        _ => None,
    };

    let mut params = String::new();
    if base.is_none() {
        params.push('0');
    }
    let old_attrs = base.map_or(Attr::empty(), |s| s.attrs);
    for code in next.attrs.difference(old_attrs).sgr_codes() {
        push_param(&mut params, format_args!("{code}"));
    }
    if base.is_none_or(|s| s.fg != next.fg) {
        push_color(&mut params, 38, next.fg);
    }
    if base.is_none_or(|s| s.bg != next.bg) {
        push_color(&mut params, 48, next.bg);
    }
    write!(w, "\x1b[{params}m")
}

fn push_param(params: &mut String, value: fmt::Arguments<'_>) {
    if !params.is_empty() {
        params.push(';');
    }
    let _ = params.write_fmt(value);
}

/// `layer` is 38 for the foreground, 48 for the background.
fn push_color(params: &mut String, layer: u8, color: CellColor) {
    match color {
        CellColor::Rgb(r, g, b) => push_param(params, format_args!("{layer};2;{r};{g};{b}")),
        CellColor::Default => push_param(params, format_args!("{}", layer + 1)),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sgr(current: Option<Style>, next: Style) -> String {
        let mut out = Vec::new();
        set_style(&mut out, current, next).unwrap();
        String::from_utf8(out).unwrap()
    }

    const GOLD: CellColor = CellColor::Rgb(255, 215, 0);
    const RED4: CellColor = CellColor::Rgb(139, 0, 0);

    // ── Commands ────────────────────────────────────────────────────────

    #[test]
    fn move_to_is_one_indexed() {
        assert_eq!(Command::MoveTo { x: 0, y: 0 }.to_string(), "\x1b[1;1H");
        assert_eq!(Command::MoveTo { x: 10, y: 20 }.to_string(), "\x1b[21;11H");
        assert_eq!(Command::MoveTo { x: u16::MAX, y: 0 }.to_string(), "\x1b[1;65536H");
    }

    #[test]
    fn private_modes() {
        assert_eq!(Command::HideCursor.to_string(), "\x1b[?25l");
        assert_eq!(Command::ShowCursor.to_string(), "\x1b[?25h");
        assert_eq!(Command::AlternateScreen(true).to_string(), "\x1b[?1049h");
        assert_eq!(Command::BracketedPaste(false).to_string(), "\x1b[?2004l");
        assert_eq!(Command::SynchronizedUpdate(true).to_string(), "\x1b[?2026h");
    }

    #[test]
    fn cursor_shapes() {
        assert_eq!(Command::SetCursorShape(CursorShape::SteadyBar).to_string(), "\x1b[6 q");
        assert_eq!(Command::SetCursorShape(CursorShape::SteadyBlock).to_string(), "\x1b[2 q");
        assert_eq!(Command::SetCursorShape(CursorShape::Default).to_string(), "\x1b[0 q");
    }

    #[test]
    fn queue_keeps_order() {
        let mut out = Vec::new();
        queue(&mut out, &[Command::ClearScreen, Command::ResetStyle]).unwrap();
        assert_eq!(out, b"\x1b[2J\x1b[0m");
    }

    // ── SGR ─────────────────────────────────────────────────────────────

    #[test]
    fn unknown_state_sets_everything_after_a_reset() {
        let style = Style::new(GOLD, RED4, Attr::BOLD);
        assert_eq!(sgr(None, style), "\x1b[0;1;38;2;255;215;0;48;2;139;0;0m");
        assert_eq!(sgr(None, Style::PLAIN), "\x1b[0;39;49m");
    }

    #[test]
    fn unchanged_style_writes_nothing() {
        let style = Style::new(GOLD, RED4, Attr::ITALIC);
        assert_eq!(sgr(Some(style), style), "");
    }

    #[test]
    fn background_change_sends_only_background() {
        let text = Style::new(GOLD, RED4, Attr::empty());
        let tagged = text.with_bg(CellColor::Rgb(0, 0, 255));
        assert_eq!(sgr(Some(text), tagged), "\x1b[48;2;0;0;255m");
        assert_eq!(sgr(Some(tagged), text.with_bg(CellColor::Default)), "\x1b[49m");
    }

    #[test]
    fn added_attribute_is_sent_alone() {
        let plain = Style::PLAIN;
        assert_eq!(sgr(Some(plain), plain.add_attrs(Attr::UNDERLINE)), "\x1b[4m");
    }

    #[test]
    fn dropped_attribute_resets_first() {
        let status = Style::PLAIN.add_attrs(Attr::BOLD | Attr::INVERSE);
        let menu = Style::PLAIN.add_attrs(Attr::INVERSE);
        assert_eq!(sgr(Some(status), menu), "\x1b[0;7;39;49m");
    }
}
