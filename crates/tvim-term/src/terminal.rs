// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Full-screen session: raw mode, alternate screen, and getting out again.
//
// termios, TIOCGWINSZ and isatty have no safe wrappers in std, hence the
// `unsafe`; each block is one libc call.
//
// Leaving must work even when tvim panics mid-frame. The panic hook writes
// the leave sequence straight to fd 1, because the stdout lock may still
// be held by the frame that panicked, and restores termios from a copy
// kept in a static.

use std::io::{self, Write};
#[cfg(unix)]
use std::sync::Mutex;
use std::sync::Once;

use crate::ansi::{self, Command, CursorShape};

/// Sent when the session starts.
pub const ENTER: [Command; 4] = [
    Command::AlternateScreen(true),
    Command::HideCursor,
    Command::ClearScreen,
    Command::BracketedPaste(true),
];

/// Sent when the session ends, normally or from the panic hook. Leaving
/// the alternate screen comes last so everything before it applies to
/// tvim's screen, not the user's.
pub const LEAVE: [Command; 6] = [
    Command::SynchronizedUpdate(false),
    Command::BracketedPaste(false),
    Command::ResetStyle,
    Command::SetCursorShape(CursorShape::Default),
    Command::ShowCursor,
    Command::AlternateScreen(false),
];

// ─── Size ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub cols: u16,
    pub rows: u16,
}

impl Size {
    /// Used when stdout is not a terminal.
    pub const FALLBACK: Self = Self { cols: 80, rows: 24 };

    /// The window size of stdout, if it is a terminal.
    #[cfg(unix)]
    #[must_use]
    pub fn query() -> Option<Self> {
        let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
        let ok = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &raw mut ws) } == 0;
        (ok && ws.ws_col > 0 && ws.ws_row > 0).then_some(Self {
            cols: ws.ws_col,
            rows: ws.ws_row,
        })
    }

    #[cfg(not(unix))]
    #[must_use]
    pub const fn query() -> Option<Self> {
        None
    }
}

// ─── Raw Mode ───────────────────────────────────────────────────────────────

/// termios as it was before raw mode, for the panic hook.
#[cfg(unix)]
static SAVED_TERMIOS: Mutex<Option<libc::termios>> = Mutex::new(None);

/// Raw mode on stdin for as long as this value lives.
#[cfg(unix)]
struct RawMode {
    original: libc::termios,
}

#[cfg(unix)]
impl RawMode {
    /// `None` when stdin is not a terminal, which is fine: there is
    /// nothing to put in raw mode.
    fn enable() -> io::Result<Option<Self>> {
        if unsafe { libc::isatty(libc::STDIN_FILENO) } == 0 {
            return Ok(None);
        }

        let mut original: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(libc::STDIN_FILENO, &raw mut original) } != 0 {
            return Err(io::Error::last_os_error());
        }
        let mut termios = original;
        unsafe { libc::cfmakeraw(&raw mut termios) };
        termios.c_cc[libc::VMIN] = 1;
        termios.c_cc[libc::VTIME] = 0;
        if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &raw const termios) } != 0 {
            return Err(io::Error::last_os_error());
        }

        if let Ok(mut saved) = SAVED_TERMIOS.lock() {
            *saved = Some(original);
        }
        Ok(Some(Self { original }))
    }
}

#[cfg(unix)]
impl Drop for RawMode {
    fn drop(&mut self) {
        unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &raw const self.original) };
        if let Ok(mut saved) = SAVED_TERMIOS.lock() {
            *saved = None;
        }
    }
}

#[cfg(not(unix))]
struct RawMode;

#[cfg(not(unix))]
impl RawMode {
    #[allow(clippy::unnecessary_wraps)]
    const fn enable() -> io::Result<Option<Self>> {
        Ok(None)
    }
}

// ─── Panic Hook ─────────────────────────────────────────────────────────────

static PANIC_HOOK: Once = Once::new();

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_after_panic();
            previous(info);
        }));
    });
}

fn restore_after_panic() {
    let mut bytes = Vec::new();
    let _ = ansi::queue(&mut bytes, &LEAVE);

    #[cfg(unix)]
    unsafe {
        libc::write(libc::STDOUT_FILENO, bytes.as_ptr().cast(), bytes.len());
        if let Ok(saved) = SAVED_TERMIOS.lock() {
            if let Some(original) = saved.as_ref() {
                libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, original);
            }
        }
    }

    #[cfg(not(unix))]
    {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(&bytes);
        let _ = stdout.flush();
    }
}

// ─── Terminal ───────────────────────────────────────────────────────────────

/// Full-screen session handle. Dropping it leaves the session.
///
/// ```no_run
/// use tvim_term::terminal::Terminal;
///
/// let mut term = Terminal::new();
/// term.enter()?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct Terminal {
    size: Size,
    /// `Some` while a session is running.
    session: Option<Option<RawMode>>,
}

impl Terminal {
    /// Does not touch the terminal beyond asking its size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            size: Size::query().unwrap_or(Size::FALLBACK),
            session: None,
        }
    }

    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Ask the size again, after a resize signal.
    pub fn refresh_size(&mut self) -> Size {
        if let Some(size) = Size::query() {
            self.size = size;
        }
        self.size
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Raw mode plus [`ENTER`]. Does nothing if already active.
    ///
    /// # Errors
    ///
    /// Returns an error if termios or writing to the terminal fails.
    pub fn enter(&mut self) -> io::Result<()> {
        if self.is_active() {
            return Ok(());
        }
        install_panic_hook();
        let raw = RawMode::enable()?;

        let mut stdout = io::stdout().lock();
        ansi::queue(&mut stdout, &ENTER)?;
        stdout.flush()?;

        self.session = Some(raw);
        tracing::debug!(cols = self.size.cols, rows = self.size.rows, "terminal entered");
        Ok(())
    }

    /// [`LEAVE`] plus the original termios. Does nothing if not active.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails. termios is
    /// restored either way.
    pub fn leave(&mut self) -> io::Result<()> {
        let Some(raw) = self.session.take() else {
            return Ok(());
        };
        let written = {
            let mut stdout = io::stdout().lock();
            ansi::queue(&mut stdout, &LEAVE).and_then(|()| stdout.flush())
        };
        drop(raw);
        tracing::debug!("terminal restored");
        written
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
