//! File logging for the CLI.
//!
//! Events go to `<data dir>/logs/streakr.<date>.log`, rotated daily. The
//! filter comes from `STREAKR_LOG` (EnvFilter syntax) or the configured
//! level. Nothing is written to the terminal.

use std::path::Path;

use streakr_core::storage::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

pub const LOG_ENV: &str = "STREAKR_LOG";

fn filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global subscriber.
///
/// The returned guard flushes buffered lines when dropped, so it must live
/// until the command finishes.
pub fn init(data_dir: &Path, config: &LoggingConfig) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    let log_dir = data_dir.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("streakr")
        .filename_suffix("log")
        .max_log_files(config.max_files as usize)
        .build(&log_dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);
    let subscriber = Registry::default().with(layer).with(filter(config));
    tracing::subscriber::set_global_default(subscriber)?;

    tracing::debug!(log_dir = %log_dir.display(), "logger initialized");
    Ok(guard)
}
