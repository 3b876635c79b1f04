mod config;
pub mod database;
mod intervals;
pub mod migrations;
pub mod traits;

pub use config::{Config, DisplayConfig, LoggingConfig, WeekStart};
pub use database::Database;
pub use traits::{HabitRegistry, IntervalStore};

use std::path::PathBuf;

use crate::error::CoreError;

/// Returns the streakr data directory, creating it if needed.
///
/// `STREAKR_HOME` wins when set. Otherwise `~/.config/streakr[-dev]/`,
/// with the `-dev` suffix when `STREAKR_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let dir = match std::env::var_os("STREAKR_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("STREAKR_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("streakr-dev")
            } else {
                base_dir.join("streakr")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
