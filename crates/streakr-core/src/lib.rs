//! # Streakr Core Library
//!
//! This library provides the core logic for the streakr habit tracker.
//! Everything the `streakr` binary does goes through this crate; the CLI only
//! parses arguments and renders results.
//!
//! ## Architecture
//!
//! - **Streaks**: Habits own closed date intervals. Logging a habit either
//!   extends the latest interval or opens a new one (see [`streak::plan_log`])
//! - **Habit types**: An *improve* habit is logged on the days it was done; a
//!   *quit* habit is logged on the days of a slip-up, and every other day
//!   counts as clean
//! - **Statistics**: Month heatmaps and all-time summaries are rebuilt from the
//!   stored intervals on demand
//! - **Storage**: SQLite for habits and intervals, TOML for configuration
//!
//! ## Key Components
//!
//! - [`Tracker`]: Logging, registry operations and statistics
//! - [`Database`]: Habit and interval persistence
//! - [`Config`]: Application configuration management
//! - [`Clock`]: Source of "today"

pub mod clock;
pub mod date;
pub mod error;
pub mod habit;
pub mod service;
pub mod stats;
pub mod storage;
pub mod streak;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError, Result, ValidationError};
pub use habit::{Habit, HabitType, NewHabit};
pub use service::{LogAction, LogEntry, LogReport, Tracker};
pub use stats::{HabitInfo, HabitStatsForRange};
pub use storage::{Config, Database, HabitRegistry, IntervalStore};
pub use streak::StreakInterval;
