// SPDX-License-Identifier: MIT
//
// tvim — a small modal text editor for the terminal.
//
// This is the main binary that wires together all the crates:
//
//   tvim-term   → terminal control, rendering, input parsing, event loop
//   tvim-theme  → color themes, font families and styles
//   tvim-editor → document, command parser and dispatcher, popups, menus, view
//
// The Workbench implements tvim-term's App trait and owns every window.
// Each keypress flows through:
//
//   stdin → parser → on_event → window → popup / menu / mode → dispatcher
//   paint → view.render → framebuffer → diff renderer → terminal
//
// Layout of a window:
//
//   ┌──────────────────────────────┐
//   │ menu bar                     │  ← 1 row
//   ├──────────────────────────────┤
//   │ text area                    │  ← h - 3 rows
//   ├──────────────────────────────┤
//   │ status line                  │  ← 1 row
//   ├──────────────────────────────┤
//   │ command line                 │  ← 1 row
//   └──────────────────────────────┘

mod app;
mod config;
mod logging;
mod window;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use tvim_term::event_loop::EventLoop;

use crate::app::Workbench;
use crate::config::{Cli, Config};

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let guard = logging::init(cli.log_file.clone()).context("failed to set up logging")?;
    info!(log_file = %guard.log_file.display(), "tvim starting");

    let config = Config::from(cli);
    let mut workbench = Workbench::from_config(config)?;

    EventLoop::new()
        .run(&mut workbench)
        .context("terminal failure")?;

    info!("tvim exiting");
    Ok(())
}
