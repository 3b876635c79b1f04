//! Streak intervals and the transition rules that grow them.
//!
//! An interval is a closed date range `[start, end]` owned by one habit.
//! For Improve habits every day in it was performed. For Quit habits every
//! day except `end` was clean, and `end` marks the slip-up.

mod transition;

pub use transition::{current_streak, max_streak, plan_log, Transition};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::day_diff;
use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakInterval {
    pub id: i64,
    pub habit_id: i64,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl StreakInterval {
    /// Inclusive number of calendar days covered.
    pub fn len_days(&self) -> i64 {
        day_diff(self.start, self.end) + 1
    }

    /// Reject intervals that could not have been produced by [`plan_log`].
    pub fn check(&self) -> Result<(), CoreError> {
        if self.start > self.end {
            return Err(CoreError::Invariant(format!(
                "interval {} of habit {} starts ({}) after it ends ({})",
                self.id, self.habit_id, self.start, self.end
            )));
        }
        Ok(())
    }
}
