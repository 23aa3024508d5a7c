//! Tracing setup.
//!
//! The TUI owns stdout/stderr, so log output goes to a daily rolling file.
//! The filter comes from `IMAGINGIQ_LOG` (standard `EnvFilter` syntax) and
//! defaults to `info`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "IMAGINGIQ_LOG";

const LOG_FILE_PREFIX: &str = "imagingiq.log";

/// Installs the global subscriber writing to `dir`.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes and stops the background writer.
pub fn init_file_logging(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to install tracing subscriber: {err}"))?;

    Ok(guard)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}
