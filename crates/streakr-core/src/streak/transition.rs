//! Daily log transitions and streak lengths.
//!
//! These functions are pure: they take the habit, its latest interval and
//! the current date, and decide. Persisting the decision is the caller's job.

use chrono::NaiveDate;

use super::StreakInterval;
use crate::date::{day_diff, next_day, prev_day};
use crate::habit::{Habit, HabitType};

/// What a log event does to the interval store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The habit was already logged today.
    Skip,
    /// Insert a new interval.
    Create { start: NaiveDate, end: NaiveDate },
    /// Move the end of an existing interval.
    Extend { interval_id: i64, new_end: NaiveDate },
}

/// Decide how logging `habit` on `today` changes its intervals.
pub fn plan_log(habit: &Habit, latest: Option<&StreakInterval>, today: NaiveDate) -> Transition {
    let yesterday = prev_day(today);

    let Some(latest) = latest else {
        return match habit.habit_type {
            HabitType::Improve => Transition::Create {
                start: today,
                end: today,
            },
            // No clean day has fully elapsed yet.
            HabitType::Quit if habit.created_date >= yesterday => Transition::Create {
                start: today,
                end: today,
            },
            HabitType::Quit => Transition::Create {
                start: next_day(habit.created_date),
                end: today,
            },
        };
    };

    if latest.end == today {
        return Transition::Skip;
    }

    match habit.habit_type {
        HabitType::Improve if latest.end == yesterday => Transition::Extend {
            interval_id: latest.id,
            new_end: today,
        },
        HabitType::Improve => Transition::Create {
            start: today,
            end: today,
        },
        // Back-to-back slip-ups: each one is its own marker.
        HabitType::Quit if latest.end == yesterday => Transition::Create {
            start: today,
            end: today,
        },
        HabitType::Quit => Transition::Create {
            start: next_day(latest.end),
            end: today,
        },
    }
}

/// Length of the streak in progress on `today`.
pub fn current_streak(habit: &Habit, latest: Option<&StreakInterval>, today: NaiveDate) -> i64 {
    let yesterday = prev_day(today);
    match (habit.habit_type, latest) {
        (HabitType::Improve, None) => 0,
        (HabitType::Improve, Some(iv)) if iv.end == today || iv.end == yesterday => {
            iv.len_days()
        }
        (HabitType::Improve, Some(_)) => 0,
        // Today has not elapsed, so it never counts as clean.
        (HabitType::Quit, None) if today == habit.created_date => 0,
        (HabitType::Quit, None) => (day_diff(habit.created_date, today) - 1).max(0),
        (HabitType::Quit, Some(iv)) => (day_diff(iv.end, today) - 1).max(0),
    }
}

/// Best streak ever, given the longest stored interval (inclusive length) and
/// the streak in progress.
pub fn max_streak(habit_type: HabitType, longest_interval_days: i64, current: i64) -> i64 {
    let past = match habit_type {
        HabitType::Improve => longest_interval_days,
        HabitType::Quit => longest_interval_days - 1,
    };
    past.max(current).max(0)
}
