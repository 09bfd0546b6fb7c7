// SPDX-License-Identifier: MIT
//
// Differential renderer.
//
// Each frame is compared with the one before and only cells that changed
// are written. Whole rows that match are skipped with one slice compare.
// The frame is sent as a synchronized update so a half-drawn screen is
// never visible. The first frame, and the first after a resize, is drawn
// in full on a cleared screen.

use std::io::{self, Write};

use crate::ansi::{Command, CursorShape};
use crate::buffer::FrameBuffer;
use crate::writer::FrameWriter;

// ─── DiffRenderer ───────────────────────────────────────────────────────────

/// ```
/// use tvim_term::buffer::FrameBuffer;
/// use tvim_term::diff::DiffRenderer;
///
/// let mut renderer = DiffRenderer::new();
/// let frame = FrameBuffer::new(80, 24);
/// assert_eq!(renderer.render(&frame, None), 80 * 24);
/// assert_eq!(renderer.render(&frame, None), 0);
/// ```
#[derive(Debug, Default)]
pub struct DiffRenderer {
    writer: FrameWriter,
    previous: Option<FrameBuffer>,
}

impl DiffRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the bytes that turn the last frame into `frame`, then place
    /// the hardware cursor (`None` hides it). Returns how many cells were
    /// written.
    pub fn render(&mut self, frame: &FrameBuffer, cursor: Option<(u16, u16, CursorShape)>) -> usize {
        self.writer.begin();
        self.writer.command(Command::SynchronizedUpdate(true));

        let previous = self
            .previous
            .take()
            .filter(|prev| (prev.width(), prev.height()) == (frame.width(), frame.height()));
        if previous.is_none() {
            self.writer.command(Command::ClearScreen);
        }

        let mut written = 0;
        for y in 0..frame.height() {
            let row = frame.row(y).unwrap_or_default();
            let old = previous.as_ref().and_then(|p| p.row(y));
            if old == Some(row) {
                continue;
            }
            for (x, cell) in (0..).zip(row) {
                if old.and_then(|o| o.get(usize::from(x))) != Some(cell) {
                    self.writer.put(x, y, cell);
                    written += 1;
                }
            }
        }

        self.writer.command(Command::ResetStyle);
        match cursor {
            Some((x, y, shape)) => {
                self.writer.command(Command::MoveTo { x, y });
                self.writer.command(Command::SetCursorShape(shape));
                self.writer.command(Command::ShowCursor);
            }
            None => self.writer.command(Command::HideCursor),
        }
        self.writer.command(Command::SynchronizedUpdate(false));

        self.previous = Some(frame.clone());
        written
    }

    /// The bytes queued by the last [`render`](Self::render).
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        self.writer.bytes()
    }

    /// Send the queued bytes to `w`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        self.writer.flush_to(w)
    }

    /// Forget the last frame so the next one is drawn in full.
    pub fn force_redraw(&mut self) {
        self.previous = None;
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::CellColor;
    use crate::style::Style;

    fn output(r: &DiffRenderer) -> String {
        String::from_utf8_lossy(r.bytes()).into_owned()
    }

    // ── Diffing ─────────────────────────────────────────────────────────

    #[test]
    fn first_frame_clears_and_draws_everything() {
        let mut r = DiffRenderer::new();
        assert_eq!(r.render(&FrameBuffer::new(3, 2), None), 6);
        assert!(output(&r).contains("\x1b[2J"));
    }

    #[test]
    fn same_frame_again_draws_nothing() {
        let mut r = DiffRenderer::new();
        let frame = FrameBuffer::new(3, 2);
        r.render(&frame, None);
        assert_eq!(r.render(&frame, None), 0);
        assert!(!output(&r).contains("\x1b[2J"));
    }

    #[test]
    fn a_moved_search_tag_rewrites_only_its_cells() {
        let blue = Style::PLAIN.with_bg(CellColor::Rgb(0, 0, 255));
        let mut r = DiffRenderer::new();
        let mut frame = FrameBuffer::new(6, 2);
        frame.paint_text(0, 1, 6, "abcabc", Style::PLAIN);
        frame.paint_text(0, 1, 3, "abc", blue);
        r.render(&frame, None);

        frame.paint_text(0, 1, 6, "abcabc", Style::PLAIN);
        frame.paint_text(3, 1, 6, "abc", blue);
        assert_eq!(r.render(&frame, None), 6);
        assert!(output(&r).contains("\x1b[2;1H"));
    }

    #[test]
    fn resize_and_force_redraw_draw_everything() {
        let mut r = DiffRenderer::new();
        r.render(&FrameBuffer::new(2, 2), None);
        assert_eq!(r.render(&FrameBuffer::new(3, 2), None), 6);
        r.force_redraw();
        assert_eq!(r.render(&FrameBuffer::new(3, 2), None), 6);
    }

    // ── Framing ─────────────────────────────────────────────────────────

    #[test]
    fn frame_is_one_synchronized_update() {
        let mut r = DiffRenderer::new();
        r.render(&FrameBuffer::new(1, 1), None);
        let s = output(&r);
        assert!(s.starts_with("\x1b[?2026h"));
        assert!(s.ends_with("\x1b[0m\x1b[?25l\x1b[?2026l"));
    }

    #[test]
    fn cursor_is_placed_after_the_cells() {
        let mut r = DiffRenderer::new();
        r.render(&FrameBuffer::new(4, 4), Some((2, 3, CursorShape::SteadyBar)));
        assert!(output(&r).ends_with("\x1b[0m\x1b[4;3H\x1b[6 q\x1b[?25h\x1b[?2026l"));
    }

    #[test]
    fn flush_sends_and_empties() {
        let mut r = DiffRenderer::new();
        r.render(&FrameBuffer::new(1, 1), None);
        let mut sink = Vec::new();
        r.flush_to(&mut sink).unwrap();
        assert!(sink.starts_with(b"\x1b[?2026h"));
        assert!(r.bytes().is_empty());
    }
}
