// SPDX-License-Identifier: MIT
//
// Command-line arguments and the runtime configuration built from them.
//
// Nothing is persisted: every run starts from these flags (or their TVIM_*
// environment variables) and the built-in defaults.

use std::path::PathBuf;

use clap::Parser;
use tvim_theme::{Font, FontFamily, FontStyle, ThemeKind};

// ─── Cli ────────────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "tvim", version, about = "A small modal text editor")]
pub struct Cli {
    /// Files to open, each in its own window.
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Color theme of new windows, e.g. "dark-mode" or "McDonald's".
    #[arg(long, env = "TVIM_THEME", default_value = "Normal")]
    pub theme: ThemeKind,

    /// Font family shown for new windows.
    #[arg(long, env = "TVIM_FONT", default_value = "Courier")]
    pub font: FontFamily,

    /// Font style of new windows.
    #[arg(long, env = "TVIM_STYLE", default_value = "None")]
    pub style: FontStyle,

    /// Close the window after `:wq` even when the Save As prompt was
    /// cancelled.
    #[arg(long, env = "TVIM_CLOSE_ON_CANCELLED_WQ")]
    pub close_on_cancelled_wq: bool,

    /// Log file, or a directory to put `tvim-<pid>.log` in.
    #[arg(long, env = "TVIM_LOG_FILE", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

// ─── Config ─────────────────────────────────────────────────────────────────

/// Everything the workbench needs to know at startup.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub files: Vec<PathBuf>,
    /// Look given to every new window.
    pub theme: ThemeKind,
    pub font: Font,
    pub close_on_cancelled_wq: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            files: cli.files,
            theme: cli.theme,
            font: Font::new(cli.font, cli.style),
            close_on_cancelled_wq: cli.close_on_cancelled_wq,
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
