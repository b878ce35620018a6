//! File logging setup
//!
//! The terminal belongs to the UI, so logs go to
//! `~/.gameid-tui/logs/gameid-tui.log` with daily rotation.
//! Filtering follows `RUST_LOG` (default `info`), e.g.
//! `RUST_LOG=gameid_tui::model=debug`.

use crate::config::Config;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber
///
/// The returned guard flushes buffered lines when dropped and must be kept
/// alive for the lifetime of the program. Returns `None` when no log
/// directory is available; the app then runs without logs.
pub fn init() -> Option<WorkerGuard> {
    let logs_dir = Config::config_dir()?.join("logs");
    if let Err(e) = fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: Could not create log directory: {}", e);
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(logs_dir, "gameid-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();

    Some(guard)
}
