//! Statistics module for streakr
//!
//! Range statistics rebuild a per-day heatmap for calendar views; the
//! summary condenses a habit's whole history into current/best streak and
//! performed/missed totals for the overview.

mod range;
mod summary;

pub use range::{eligible_days_in, eligible_window, range_stats, HabitStatsForRange};
pub use summary::{summarize, HabitHistory, HabitInfo};
