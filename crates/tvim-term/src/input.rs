// SPDX-License-Identifier: MIT
//
// Terminal input parser.
//
// Turns raw stdin bytes into key and paste events:
//
// - control characters and ASCII / UTF-8 text
// - Alt+key (ESC followed by a printable byte)
// - legacy CSI sequences (arrows, editing keys, function keys, modifiers)
// - SS3 sequences (the F1-F4 / arrow encoding some terminals use)
// - bracketed paste, delivered as one event
//
// Escape sequences can span several reads, so the parser keeps a small
// byte buffer. A lone ESC stays pending until the caller decides no more
// bytes are coming and calls `flush`, which emits it as the Escape key.

use bitflags::bitflags;

// ─── Event Types ────────────────────────────────────────────────────────────

/// A parsed terminal input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    /// Bracketed paste content, delivered whole.
    Paste(String),
}

/// A key with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key with no modifiers.
    #[inline]
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn with(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// Whether Ctrl or Alt is held. Such keys are never text input.
    #[inline]
    #[must_use]
    pub const fn is_chord(&self) -> bool {
        self.modifiers.intersects(Modifiers::CTRL.union(Modifiers::ALT))
    }
}

impl From<KeyCode> for Event {
    fn from(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code))
    }
}

/// Identity of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// F1 through F20.
    F(u8),
}

bitflags! {
    /// Keyboard modifiers, in xterm's `param = 1 + bitmask` order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
    }
}

// ─── Parser ─────────────────────────────────────────────────────────────────

const PASTE_START: &[u8] = b"\x1b[200~";
const PASTE_END: &[u8] = b"\x1b[201~";

/// Incremental input parser.
///
/// ```
/// use tvim_term::input::{Event, KeyCode, Parser};
///
/// let mut parser = Parser::new();
/// let events = parser.advance(b"o\x1b[A");
/// assert_eq!(events, vec![Event::from(KeyCode::Char('o')), Event::from(KeyCode::Up)]);
/// ```
pub struct Parser {
    buf: Vec<u8>,
    in_paste: bool,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(64),
            in_paste: false,
        }
    }

    /// Feed bytes and return every event they complete. Incomplete
    /// sequences stay buffered for the next call.
    pub fn advance(&mut self, data: &[u8]) -> Vec<Event> {
        self.buf.extend_from_slice(data);
        let mut events = Vec::new();
        let mut pos = 0;

        while pos < self.buf.len() {
            let remaining = &self.buf[pos..];

            if self.in_paste {
                let Some(end) = find_subsequence(remaining, PASTE_END) else {
                    break;
                };
                let text = String::from_utf8_lossy(&remaining[..end]).into_owned();
                events.push(Event::Paste(text));
                pos += end + PASTE_END.len();
                self.in_paste = false;
                continue;
            }

            if remaining.starts_with(PASTE_START) {
                self.in_paste = true;
                pos += PASTE_START.len();
                continue;
            }
            // A prefix of the paste opener might still become one.
            if remaining.len() < PASTE_START.len()
                && remaining.starts_with(b"\x1b[")
                && PASTE_START.starts_with(remaining)
            {
                break;
            }

            match try_parse(remaining) {
                Parsed::Event(event, consumed) => {
                    events.push(event);
                    pos += consumed;
                }
                Parsed::Incomplete => break,
                Parsed::Skip(n) => pos += n,
            }
        }

        self.buf.drain(..pos);
        events
    }

    /// Whether bytes are waiting for more input.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Emit buffered bytes as literal keys. A lone ESC becomes Escape.
    /// An unterminated paste is delivered as-is.
    pub fn flush(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if self.in_paste {
            events.push(Event::Paste(String::from_utf8_lossy(&self.buf).into_owned()));
            self.in_paste = false;
        } else {
            for &byte in &self.buf {
                let key = match byte {
                    0x1B => KeyEvent::new(KeyCode::Escape),
                    0x7F => KeyEvent::new(KeyCode::Backspace),
                    b @ 0x01..=0x1A => ctrl(b),
                    b @ 0x20..=0x7E => KeyEvent::new(KeyCode::Char(b as char)),
                    _ => continue,
                };
                events.push(Event::Key(key));
            }
        }
        self.buf.clear();
        events
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Stateless Parsing ──────────────────────────────────────────────────────

enum Parsed {
    /// An event and the number of bytes it used.
    Event(Event, usize),
    Incomplete,
    /// Unrecognized bytes to drop.
    Skip(usize),
}

fn try_parse(buf: &[u8]) -> Parsed {
    match buf[0] {
        0x1B => parse_escape(buf),
        0x08 | 0x7F => key(KeyEvent::new(KeyCode::Backspace), 1),
        0x09 => key(KeyEvent::new(KeyCode::Tab), 1),
        0x0A | 0x0D => key(KeyEvent::new(KeyCode::Enter), 1),
        b @ 0x01..=0x1A => key(ctrl(b), 1),
        b @ 0x20..=0x7E => key(KeyEvent::new(KeyCode::Char(b as char)), 1),
        0xC0..=0xFF => parse_utf8(buf),
        _ => Parsed::Skip(1),
    }
}

fn parse_escape(buf: &[u8]) -> Parsed {
    if buf.len() < 2 {
        return Parsed::Incomplete;
    }

    match buf[1] {
        b'[' => parse_csi(buf),
        b'O' => parse_ss3(buf),
        b @ 0x20..=0x7E => key(KeyEvent::with(KeyCode::Char(b as char), Modifiers::ALT), 2),
        // ESC ESC: the first one was a real Escape.
        _ => key(KeyEvent::new(KeyCode::Escape), 1),
    }
}

// ── CSI ─────────────────────────────────────────────────────────────────────

fn parse_csi(buf: &[u8]) -> Parsed {
    // Final byte is 0x40..=0x7E; parameters and intermediates are 0x20..=0x3F.
    let mut end = 2;
    while end < buf.len() {
        let b = buf[end];
        if (0x40..=0x7E).contains(&b) {
            break;
        }
        if !(0x20..=0x3F).contains(&b) {
            return Parsed::Skip(end + 1);
        }
        end += 1;
    }
    if end >= buf.len() {
        return Parsed::Incomplete;
    }

    let final_byte = buf[end];
    let params = parse_params(&buf[2..end]);
    let consumed = end + 1;
    let modifiers = params.get(1).copied().map_or(Modifiers::empty(), decode_modifiers);

    let code = match final_byte {
        b'~' => tilde_key(params.first().copied().unwrap_or(0)),
        b'Z' => return key(KeyEvent::with(KeyCode::Tab, Modifiers::SHIFT), consumed),
        letter => letter_key(letter),
    };
    code.map_or(Parsed::Skip(consumed), |code| key(KeyEvent::with(code, modifiers), consumed))
}

// ── SS3 ─────────────────────────────────────────────────────────────────────

/// `ESC O <letter>`: what some terminals send for arrows and F1-F4.
fn parse_ss3(buf: &[u8]) -> Parsed {
    match buf.get(2) {
        None => Parsed::Incomplete,
        Some(&letter) => letter_key(letter).map_or(Parsed::Skip(3), |code| key(KeyEvent::new(code), 3)),
    }
}

// ── Key Tables ──────────────────────────────────────────────────────────────

/// Final letters shared by CSI and SS3.
const fn letter_key(letter: u8) -> Option<KeyCode> {
    Some(match letter {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'P' => KeyCode::F(1),
        b'Q' => KeyCode::F(2),
        b'R' => KeyCode::F(3),
        b'S' => KeyCode::F(4),
        _ => return None,
    })
}

/// `ESC [ n ~` keys. Function key numbers skip 16, 22, 27 and 30.
const fn tilde_key(n: u16) -> Option<KeyCode> {
    let f = match n {
        1 | 7 => return Some(KeyCode::Home),
        3 => return Some(KeyCode::Delete),
        4 | 8 => return Some(KeyCode::End),
        5 => return Some(KeyCode::PageUp),
        6 => return Some(KeyCode::PageDown),
        11..=15 => n - 10,
        17..=21 => n - 11,
        23..=26 => n - 12,
        28..=29 => n - 13,
        31..=34 => n - 14,
        _ => return None,
    };
    Some(KeyCode::F(fkey(f)))
}

// ── UTF-8 ───────────────────────────────────────────────────────────────────

fn parse_utf8(buf: &[u8]) -> Parsed {
    let expected = match buf[0] {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => return Parsed::Skip(1),
    };
    if buf.len() < expected {
        return Parsed::Incomplete;
    }

    std::str::from_utf8(&buf[..expected])
        .ok()
        .and_then(|s| s.chars().next())
        .map_or(Parsed::Skip(1), |ch| key(KeyEvent::new(KeyCode::Char(ch)), expected))
}

// ─── Helpers ────────────────────────────────────────────────────────────────

const fn key(event: KeyEvent, consumed: usize) -> Parsed {
    Parsed::Event(Event::Key(event), consumed)
}

/// Ctrl+letter from its control byte (0x01 = Ctrl+A).
const fn ctrl(byte: u8) -> KeyEvent {
    KeyEvent::with(KeyCode::Char((byte + b'a' - 1) as char), Modifiers::CTRL)
}

#[allow(clippy::cast_possible_truncation)]
const fn fkey(n: u16) -> u8 {
    n as u8
}

/// Semicolon-separated decimal parameters. Empty fields read as 0.
fn parse_params(raw: &[u8]) -> Vec<u16> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(|&b| b == b';')
        .map(|field| {
            field
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .fold(0u16, |acc, &b| acc.saturating_mul(10).saturating_add(u16::from(b - b'0')))
        })
        .collect()
}

/// xterm modifier parameter: `1 + bitmask`.
#[allow(clippy::cast_possible_truncation)]
const fn decode_modifiers(param: u16) -> Modifiers {
    let bits = param.saturating_sub(1);
    Modifiers::from_bits_truncate(bits as u8)
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
