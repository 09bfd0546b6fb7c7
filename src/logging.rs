// SPDX-License-Identifier: MIT
//
// Logging to a file. The terminal is the editor's screen, so nothing is
// ever written to stdout or stderr while the editor runs.
//
// Filter precedence: TVIM_LOG, then RUST_LOG, then "warn".
//
// Default location: <data_local_dir>/tvim/logs/tvim-<pid>.log
//   Linux: ~/.local/share/tvim/logs/tvim-12345.log
//   macOS: ~/Library/Application Support/tvim/logs/tvim-12345.log

use std::env;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

const DEFAULT_FILTER: &str = "warn";

/// Keeps the background writer alive. Dropping it flushes the file.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

/// Install the global subscriber.
///
/// `log_file` is either a file path (it has an extension) or a directory
/// for the default file name.
///
/// # Errors
///
/// Fails if the log directory cannot be created, a filter directive is
/// malformed, or a subscriber is already installed.
pub fn init(log_file: Option<PathBuf>) -> anyhow::Result<LogGuard> {
    let (dir, filename) = resolve_log_path(log_file, std::process::id());
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("cannot create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, &filename);
    let (writer, file_guard) = tracing_appender::non_blocking(appender);

    let directives = filter_directives(env::var("TVIM_LOG").ok(), env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directives)
        .with_context(|| format!("bad log filter `{directives}`"))?;

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_filter(filter);

    Registry::default().with(file_layer).try_init()?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: dir.join(filename),
    })
}

fn filter_directives(tvim_log: Option<String>, rust_log: Option<String>) -> String {
    tvim_log
        .or(rust_log)
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

fn resolve_log_path(override_path: Option<PathBuf>, pid: u32) -> (PathBuf, String) {
    let filename = format!("tvim-{pid}.log");

    if let Some(path) = override_path {
        if path.extension().is_some() {
            let dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
            let name = path
                .file_name()
                .map_or(filename, |n| n.to_string_lossy().into_owned());
            return (dir, name);
        }
        return (path, filename);
    }

    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tvim")
        .join("logs");
    (dir, filename)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
