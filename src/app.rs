// SPDX-License-Identifier: MIT
//
// The workbench: every open window and which one has the keyboard.
//
// Only the active window is painted. F6 and Shift+F6 cycle through the
// windows; closing the last one ends the program.

use anyhow::Context;
use tracing::{debug, info};

use tvim_editor::buffer::Buffer;
use tvim_term::ansi::CursorShape;
use tvim_term::buffer::FrameBuffer;
use tvim_term::event_loop::{Action, App};
use tvim_term::input::{Event, KeyCode, KeyEvent, Modifiers};

use crate::config::Config;
use crate::window::{Request, Window};

// ─── Workbench ──────────────────────────────────────────────────────────────

pub struct Workbench {
    windows: Vec<Window>,
    active: usize,
    config: Config,
    /// Hardware cursor computed by the last paint.
    cursor: Option<(u16, u16, CursorShape)>,
}

impl Workbench {
    /// One window per file in `config.files`, or a single blank window.
    ///
    /// # Errors
    ///
    /// Fails if a named file cannot be read.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let mut windows = Vec::with_capacity(config.files.len().max(1));
        for path in &config.files {
            let buffer = Buffer::from_file(path)
                .with_context(|| format!("cannot open {}", path.display()))?;
            windows.push(Window::with_buffer(buffer, &config));
        }
        if windows.is_empty() {
            windows.push(Window::new(&config));
        }
        info!(windows = windows.len(), "workbench ready");

        Ok(Self {
            windows,
            active: 0,
            config,
            cursor: None,
        })
    }

    /// Route one event to the window at `index` and act on its request.
    pub fn dispatch(&mut self, index: usize, event: &Event) -> Action {
        if let Event::Key(key) = event {
            if self.cycle(*key) {
                return Action::Continue;
            }
        }

        let Some(window) = self.windows.get_mut(index) else {
            return Action::Continue;
        };
        match window.handle_event(event) {
            Request::Stay => {}
            Request::Close => self.close(index),
            Request::NewWindow => self.push(Window::new(&self.config)),
            Request::Open(buffer) => {
                let window = Window::with_buffer(buffer, &self.config);
                self.push(window);
            }
        }

        if self.windows.is_empty() {
            info!("last window closed");
            Action::Quit
        } else {
            Action::Continue
        }
    }

    /// F6 / Shift+F6 switch windows. Returns whether the key was F6.
    fn cycle(&mut self, key: KeyEvent) -> bool {
        if key.code != KeyCode::F(6) {
            return false;
        }
        let count = self.windows.len();
        if count < 2 {
            return true;
        }
        self.active = if key.modifiers.contains(Modifiers::SHIFT) {
            (self.active + count - 1) % count
        } else {
            (self.active + 1) % count
        };
        debug!(active = self.active, "switched window");
        true
    }

    fn push(&mut self, window: Window) {
        self.windows.push(window);
        self.active = self.windows.len() - 1;
        info!(windows = self.windows.len(), "window opened");
    }

    fn close(&mut self, index: usize) {
        if index >= self.windows.len() {
            return;
        }
        self.windows.remove(index);
        if self.active >= self.windows.len() {
            self.active = self.windows.len().saturating_sub(1);
        } else if index < self.active {
            self.active -= 1;
        }
        info!(windows = self.windows.len(), "window closed");
    }
}

// ─── App implementation ─────────────────────────────────────────────────────

impl App for Workbench {
    fn on_event(&mut self, event: &Event) -> Action {
        self.dispatch(self.active, event)
    }

    fn paint(&mut self, frame: &mut FrameBuffer) {
        let count = self.windows.len();
        self.cursor = self
            .windows
            .get_mut(self.active)
            .and_then(|window| window.paint(frame, self.active, count));
    }

    fn cursor(&self) -> Option<(u16, u16, CursorShape)> {
        self.cursor
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
