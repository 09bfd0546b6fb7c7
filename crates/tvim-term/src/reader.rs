// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Stdin, read with a deadline.
//
// The event loop needs to wait for a key but give up after a few
// milliseconds so a lone ESC can be taken as the Escape key. `poll(2)`
// gives exactly that on the loop's own thread. A resize signal interrupts
// the wait, which lets the loop redraw right away.

use std::io;
use std::time::Duration;

const READ_BUF_SIZE: usize = 4096;

/// What one wait on stdin produced.
#[derive(Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Bytes(&'a [u8]),
    /// Nothing arrived before the deadline.
    Timeout,
    /// A signal arrived first.
    Interrupted,
    /// End of input.
    Closed,
}

pub struct StdinReader {
    buf: Box<[u8; READ_BUF_SIZE]>,
}

impl StdinReader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Box::new([0; READ_BUF_SIZE]),
        }
    }

    /// Wait up to `timeout` and read whatever is available.
    ///
    /// # Errors
    ///
    /// Returns an error if polling or reading stdin fails.
    #[cfg(unix)]
    pub fn read(&mut self, timeout: Duration) -> io::Result<Input<'_>> {
        let mut pfd = libc::pollfd {
            fd: libc::STDIN_FILENO,
            events: libc::POLLIN,
            revents: 0,
        };
        let millis = libc::c_int::try_from(timeout.as_millis()).unwrap_or(libc::c_int::MAX);
        let ready = unsafe { libc::poll(&raw mut pfd, 1, millis) };
        match ready {
            0 => return Ok(Input::Timeout),
            n if n < 0 => return interrupted_or(io::Error::last_os_error()),
            _ => {}
        }

        let n = unsafe { libc::read(libc::STDIN_FILENO, self.buf.as_mut_ptr().cast(), self.buf.len()) };
        match usize::try_from(n) {
            Ok(0) => Ok(Input::Closed),
            Ok(n) => Ok(Input::Bytes(&self.buf[..n])),
            Err(_) => interrupted_or(io::Error::last_os_error()),
        }
    }

    /// Without `poll` there is no deadline: this blocks until input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading stdin fails.
    #[cfg(not(unix))]
    pub fn read(&mut self, _timeout: Duration) -> io::Result<Input<'_>> {
        use std::io::Read;

        match io::stdin().read(&mut self.buf[..]) {
            Ok(0) => Ok(Input::Closed),
            Ok(n) => Ok(Input::Bytes(&self.buf[..n])),
            Err(err) => interrupted_or(err),
        }
    }
}

impl Default for StdinReader {
    fn default() -> Self {
        Self::new()
    }
}

fn interrupted_or<'a>(err: io::Error) -> io::Result<Input<'a>> {
    if err.kind() == io::ErrorKind::Interrupted {
        Ok(Input::Interrupted)
    } else {
        Err(err)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eintr_is_not_an_error() {
        let err = io::Error::from(io::ErrorKind::Interrupted);
        assert_eq!(interrupted_or(err).unwrap(), Input::Interrupted);
    }

    #[test]
    fn other_errors_propagate() {
        let err = io::Error::from(io::ErrorKind::BrokenPipe);
        assert_eq!(interrupted_or(err).unwrap_err().kind(), io::ErrorKind::BrokenPipe);
    }
}
