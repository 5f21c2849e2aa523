//! Tracing subscriber setup.
//!
//! The interactive screen owns the terminal, so its logs go to
//! `anuncios-tui.log` through a non-blocking file writer. Headless runs log
//! to stderr and keep stdout for the dump.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "anuncios-tui.log";
pub const DEFAULT_FILTER: &str = "anuncios_tui=info,anuncios_backend_client=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to `log_dir/anuncios-tui.log`. Keep the guard alive until exit or
/// buffered lines are lost.
pub fn init_file_logging(log_dir: &Path) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;
    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init();
    Ok(guard)
}

pub fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}
