//! Tracing setup
//!
//! The terminal belongs to the TUI, so logs go to a file through a
//! non-blocking writer. Filter comes from `LEXZIG_LOG` (default `info`).

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::cli::{Error, Result};

pub const LOG_ENV: &str = "LEXZIG_LOG";

/// Install the global subscriber writing to `log_file`
///
/// Keep the returned guard alive for the whole run; dropping it flushes
/// and stops the writer thread.
pub fn init_logging(log_file: &Path) -> Result<WorkerGuard> {
    let directory = match log_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };
    let file_name = log_file
        .file_name()
        .ok_or_else(|| Error::Logging(format!("not a file path: {}", log_file.display())))?;

    std::fs::create_dir_all(&directory)?;
    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    Ok(guard)
}
