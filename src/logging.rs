//! Tracing subscriber setup

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when neither `--log-level` nor `RUST_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Name of the per-run log file, e.g. `scan_2024-03-01_14-05-09.log`
pub fn log_file_name() -> String {
    format!("scan_{}.log", chrono::Local::now().format("%Y-%m-%d_%H-%M-%S"))
}

/// Install the global subscriber: stdout always, plus a plain-text file in
/// `log_dir` when given.
///
/// Hold the returned guard until exit; dropping it flushes the log file.
pub fn init_logger(level: Option<&str>, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter_layer = match level {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log level filter: {}", level))?,
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };

    let (file_layer, guard, log_path) = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let file_name = log_file_name();
            let file_appender = tracing_appender::rolling::never(dir, &file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().with_writer(non_blocking).with_ansi(false);
            (Some(layer), Some(guard), Some(dir.join(file_name)))
        }
        None => (None, None, None),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(false)
                .without_time(),
        )
        .with(file_layer)
        .with(filter_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if let Some(path) = &log_path {
        tracing::info!("Logging details to: {}", path.display());
    }

    Ok(guard)
}
