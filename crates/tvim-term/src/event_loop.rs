// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Event loop.
//
// One thread: wait on stdin with a short deadline, parse what arrived,
// hand each event to the app, repaint if anything happened. The deadline
// is what turns a lone ESC into the Escape key.
//
// A resize arrives as SIGWINCH. The handler only sets a flag; the signal
// also cuts the stdin wait short, so the redraw follows immediately.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::ansi::CursorShape;
use crate::buffer::FrameBuffer;
use crate::diff::DiffRenderer;
use crate::input::{Event, Parser};
use crate::reader::{Input, StdinReader};
use crate::terminal::{Size, Terminal};

// ─── SIGWINCH ───────────────────────────────────────────────────────────────

static RESIZED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
extern "C" fn on_sigwinch(_: libc::c_int) {
    RESIZED.store(true, Ordering::Relaxed);
}

/// Without `SA_RESTART`, so the signal interrupts `poll`.
#[cfg(unix)]
fn watch_resize() {
    unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        action.sa_sigaction = on_sigwinch as *const () as libc::sighandler_t;
        libc::sigemptyset(&raw mut action.sa_mask);
        libc::sigaction(libc::SIGWINCH, &raw const action, std::ptr::null_mut());
    }
}

#[cfg(not(unix))]
const fn watch_resize() {}

// ─── App ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// A full-screen program driven by [`EventLoop`].
pub trait App {
    /// Handle one event. [`Action::Quit`] ends the loop.
    fn on_event(&mut self, event: &Event) -> Action;

    /// Paint everything into `frame`, which starts out blank.
    fn paint(&mut self, frame: &mut FrameBuffer);

    /// Where the hardware cursor goes after [`paint`](App::paint), if
    /// anywhere.
    fn cursor(&self) -> Option<(u16, u16, CursorShape)> {
        None
    }
}

// ─── EventLoop ──────────────────────────────────────────────────────────────

pub struct EventLoop {
    terminal: Terminal,
    reader: StdinReader,
    parser: Parser,
    renderer: DiffRenderer,
    frame: FrameBuffer,
    escape_timeout: Duration,
}

impl EventLoop {
    /// How long a lone ESC waits for the rest of a key sequence.
    pub const ESCAPE_TIMEOUT: Duration = Duration::from_millis(25);

    #[must_use]
    pub fn new() -> Self {
        let terminal = Terminal::new();
        let size = terminal.size();
        Self {
            terminal,
            reader: StdinReader::new(),
            parser: Parser::new(),
            renderer: DiffRenderer::new(),
            frame: FrameBuffer::new(size.cols, size.rows),
            escape_timeout: Self::ESCAPE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_escape_timeout(mut self, timeout: Duration) -> Self {
        self.escape_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn size(&self) -> Size {
        self.terminal.size()
    }

    /// Take over the terminal and run `app` until it quits or stdin
    /// closes. The terminal is handed back even if the loop fails.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup, input or output fails.
    pub fn run(&mut self, app: &mut impl App) -> io::Result<()> {
        self.terminal.enter()?;
        watch_resize();
        let result = self.pump(app);
        let left = self.terminal.leave();
        result.and(left)
    }

    fn pump(&mut self, app: &mut impl App) -> io::Result<()> {
        self.present(app, &mut io::stdout().lock())?;
        loop {
            let events = match self.reader.read(self.escape_timeout)? {
                Input::Bytes(bytes) => self.parser.advance(bytes),
                Input::Timeout => self.parser.flush(),
                Input::Interrupted => Vec::new(),
                Input::Closed => {
                    tracing::info!("stdin closed");
                    return Ok(());
                }
            };

            let mut dirty = !events.is_empty();
            if deliver(app, &events) == Action::Quit {
                return Ok(());
            }
            if RESIZED.swap(false, Ordering::Relaxed) {
                let size = self.terminal.refresh_size();
                tracing::debug!(cols = size.cols, rows = size.rows, "resized");
                self.frame.resize(size.cols, size.rows);
                self.renderer.force_redraw();
                dirty = true;
            }
            if dirty {
                self.present(app, &mut io::stdout().lock())?;
            }
        }
    }

    /// Paint a fresh frame and write the difference to `out`.
    fn present(&mut self, app: &mut impl App, out: &mut impl Write) -> io::Result<()> {
        self.frame.clear();
        app.paint(&mut self.frame);
        self.renderer.render(&self.frame, app.cursor());
        self.renderer.flush_to(out)
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

/// Hand events to the app in order, stopping at the first quit.
fn deliver(app: &mut impl App, events: &[Event]) -> Action {
    events
        .iter()
        .map(|event| app.on_event(event))
        .find(|&action| action == Action::Quit)
        .unwrap_or(Action::Continue)
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;
    use crate::style::Style;

    /// Shows the last key typed in the corner, quits on `q`.
    #[derive(Default)]
    struct Echo {
        seen: Vec<Event>,
    }

    impl App for Echo {
        fn on_event(&mut self, event: &Event) -> Action {
            self.seen.push(event.clone());
            if *event == Event::from(KeyCode::Char('q')) {
                Action::Quit
            } else {
                Action::Continue
            }
        }

        fn paint(&mut self, frame: &mut FrameBuffer) {
            if let Some(Event::Key(key)) = self.seen.last() {
                frame.paint_text(0, 0, frame.width(), &format!("{:?}", key.code), Style::PLAIN);
            }
        }

        fn cursor(&self) -> Option<(u16, u16, CursorShape)> {
            Some((1, 0, CursorShape::SteadyBlock))
        }
    }

    fn test_loop() -> EventLoop {
        let mut event_loop = EventLoop::new();
        event_loop.frame = FrameBuffer::new(20, 2);
        event_loop
    }

    #[test]
    fn escape_timeout_defaults_and_overrides() {
        assert_eq!(EventLoop::new().escape_timeout, Duration::from_millis(25));
        let slow = EventLoop::new().with_escape_timeout(Duration::from_millis(100));
        assert_eq!(slow.escape_timeout, Duration::from_millis(100));
    }

    #[test]
    fn events_are_delivered_until_quit() {
        let mut app = Echo::default();
        let events = Parser::new().advance(b"aqb");
        assert_eq!(deliver(&mut app, &events), Action::Quit);
        assert_eq!(app.seen.len(), 2);
        assert_eq!(deliver(&mut app, &[]), Action::Continue);
    }

    #[test]
    fn present_paints_then_places_cursor() {
        let mut event_loop = test_loop();
        let mut app = Echo::default();
        deliver(&mut app, &Parser::new().advance(b"x"));

        let mut out = Vec::new();
        event_loop.present(&mut app, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Char('x')"));
        assert!(text.ends_with("\x1b[1;2H\x1b[2 q\x1b[?25h\x1b[?2026l"));
    }

    #[test]
    fn unchanged_frame_sends_only_the_cursor() {
        let mut event_loop = test_loop();
        let mut app = Echo::default();
        let mut out = Vec::new();
        event_loop.present(&mut app, &mut out).unwrap();
        out.clear();
        event_loop.present(&mut app, &mut out).unwrap();
        assert_eq!(out, b"\x1b[?2026h\x1b[0m\x1b[1;2H\x1b[2 q\x1b[?25h\x1b[?2026l");
    }

    #[test]
    fn resize_flag_is_consumed_once() {
        RESIZED.store(true, Ordering::Relaxed);
        assert!(RESIZED.swap(false, Ordering::Relaxed));
        assert!(!RESIZED.load(Ordering::Relaxed));
    }
}
