//! Diagnostic logging initialization.
//!
//! Logs go to stdout by default; setting `LOG_FILE` redirects them to an
//! append-only file through a non-blocking writer. Format is `text` or
//! `json` per `LOG_FORMAT`.

use crate::config::Config;
use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber from the configuration.
///
/// Returns a guard that must be kept alive for the lifetime of the process
/// when a log file is configured; dropping it flushes and stops the
/// background writer.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init(config: &Config) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match &config.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);

            let builder = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false);

            if config.log_format == "json" {
                builder.json().try_init()
            } else {
                builder.try_init()
            }
            .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

            Ok(Some(guard))
        }
        None => {
            let builder = tracing_subscriber::fmt().with_env_filter(filter);

            if config.log_format == "json" {
                builder.json().try_init()
            } else {
                builder.try_init()
            }
            .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

            Ok(None)
        }
    }
}
