//! All-time streak summary for a single habit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::range::{eligible_days_in, eligible_window};
use crate::habit::{Habit, HabitType};
use crate::streak::{current_streak, max_streak, StreakInterval};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitInfo {
    pub habit: Habit,
    pub current_streak: i64,
    pub max_streak: i64,
    pub total_performed_days: i64,
    pub total_missed_days: i64,
}

/// Aggregates read from the interval store for one habit.
#[derive(Debug, Clone, Default)]
pub struct HabitHistory {
    pub latest: Option<StreakInterval>,
    pub longest_interval_days: i64,
    pub total_days_covered: i64,
    pub total_clean_days: i64,
    pub slip_up_on_creation: bool,
}

pub fn summarize(habit: &Habit, history: &HabitHistory, today: NaiveDate) -> HabitInfo {
    let current = current_streak(habit, history.latest.as_ref(), today);
    let performed = match habit.habit_type {
        HabitType::Improve => history.total_days_covered,
        HabitType::Quit => history.total_clean_days + current,
    };
    let slip_up_today = habit.is_quit() && history.latest.is_some_and(|iv| iv.end == today);
    let window = eligible_window(habit, history.slip_up_on_creation, slip_up_today, today);
    let eligible = eligible_days_in(window, habit.created_date, today);

    HabitInfo {
        habit: habit.clone(),
        current_streak: current,
        max_streak: max_streak(habit.habit_type, history.longest_interval_days, current),
        total_performed_days: performed,
        total_missed_days: (eligible - performed).max(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, day).unwrap()
    }

    fn habit(habit_type: HabitType, created: NaiveDate) -> Habit {
        Habit {
            id: 1,
            name: "h".into(),
            aliases: Vec::new(),
            description: None,
            habit_type,
            created_date: created,
        }
    }

    fn iv(start: NaiveDate, end: NaiveDate) -> StreakInterval {
        StreakInterval {
            id: 1,
            habit_id: 1,
            start,
            end,
        }
    }

    #[test]
    fn improve_counts_covered_days_and_misses() {
        let h = habit(HabitType::Improve, d(1));
        let history = HabitHistory {
            latest: Some(iv(d(8), d(10))),
            longest_interval_days: 4,
            total_days_covered: 7,
            ..HabitHistory::default()
        };
        let info = summarize(&h, &history, d(10));
        assert_eq!(info.current_streak, 3);
        assert_eq!(info.max_streak, 4);
        assert_eq!(info.total_performed_days, 7);
        assert_eq!(info.total_missed_days, 3);
    }

    #[test]
    fn quit_without_logs_is_all_clean() {
        let h = habit(HabitType::Quit, d(1));
        let info = summarize(&h, &HabitHistory::default(), d(10));
        assert_eq!(info.current_streak, 8);
        assert_eq!(info.max_streak, 8);
        assert_eq!(info.total_performed_days, 8);
        assert_eq!(info.total_missed_days, 0);
    }

    #[test]
    fn quit_with_slip_up_today() {
        let h = habit(HabitType::Quit, d(1));
        let history = HabitHistory {
            latest: Some(iv(d(2), d(10))),
            longest_interval_days: 9,
            total_days_covered: 9,
            total_clean_days: 8,
            slip_up_on_creation: false,
        };
        let info = summarize(&h, &history, d(10));
        assert_eq!(info.current_streak, 0);
        assert_eq!(info.max_streak, 8);
        assert_eq!(info.total_performed_days, 8);
        assert_eq!(info.total_missed_days, 1);
    }
}
