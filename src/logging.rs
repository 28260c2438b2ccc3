//! Log file setup. The terminal belongs to the game, so everything goes to a
//! file; filter with `RUST_LOG` (defaults to `info`).

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Keeps the background writer alive; dropping it flushes the log.
#[allow(dead_code)]
pub struct LogGuard(WorkerGuard);

/// Installs the global subscriber writing plain text to `path`.
pub fn init(path: &Path) -> Result<LogGuard> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .wrap_err("failed to install log subscriber")?;

    Ok(LogGuard(guard))
}
