//! Per-day heatmap and totals for a date range.
//!
//! Read-only: the heatmap is rebuilt from stored intervals every time and
//! nothing is written back.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::{day_diff, days_between, next_day, prev_day};
use crate::error::{CoreError, ValidationError};
use crate::habit::{Habit, HabitType};
use crate::streak::StreakInterval;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitStatsForRange {
    pub habit: Habit,
    /// One entry per day of `[range_start, range_end]`; `true` = performed/clean.
    pub heatmap: Vec<bool>,
    pub total_streak_days_in_range: i64,
    pub total_misses_in_range: i64,
    pub range_start: NaiveDate,
    pub range_end: NaiveDate,
    /// Days that can be performed or missed at all, before clamping to the range.
    pub eligible_window: (NaiveDate, NaiveDate),
}

impl HabitStatsForRange {
    pub fn day(&self, date: NaiveDate) -> Option<bool> {
        let idx = usize::try_from(day_diff(self.range_start, date)).ok()?;
        self.heatmap.get(idx).copied()
    }

    /// Whether `date` was eligible but not performed. `None` outside the range.
    pub fn missed(&self, date: NaiveDate) -> Option<bool> {
        let done = self.day(date)?;
        let (from, to) = self.eligible_window;
        Some(!done && from <= date && date <= to)
    }
}

/// First and last day on which a habit can be performed or missed, before
/// clamping to a query range.
///
/// Quit habits start counting the day after creation unless a slip-up was
/// recorded on the creation day itself. Today only counts for a Quit habit
/// once a slip-up is recorded on it; until then the day has not elapsed.
pub fn eligible_window(
    habit: &Habit,
    slip_up_on_creation: bool,
    slip_up_today: bool,
    today: NaiveDate,
) -> (NaiveDate, NaiveDate) {
    match habit.habit_type {
        HabitType::Improve => (habit.created_date, today),
        HabitType::Quit => {
            let start = if slip_up_on_creation {
                habit.created_date
            } else {
                next_day(habit.created_date)
            };
            let end = if slip_up_today { today } else { prev_day(today) };
            (start, end)
        }
    }
}

/// Number of eligible days inside `[range_start, range_end]`.
pub fn eligible_days_in(
    window: (NaiveDate, NaiveDate),
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> i64 {
    let start = window.0.max(range_start);
    let end = window.1.min(range_end);
    if start > end {
        0
    } else {
        day_diff(start, end) + 1
    }
}

/// Build the heatmap for `habit` over `[range_start, range_end]` from the
/// intervals that overlap it.
///
/// For Quit habits the days after the last recorded slip-up, up to
/// yesterday, count as clean.
pub fn range_stats(
    habit: &Habit,
    intervals: &[StreakInterval],
    range_start: NaiveDate,
    range_end: NaiveDate,
    today: NaiveDate,
) -> Result<HabitStatsForRange, CoreError> {
    if range_end < range_start {
        return Err(ValidationError::InvalidDateRange {
            start: range_start,
            end: range_end,
        }
        .into());
    }
    for interval in intervals {
        interval.check()?;
    }

    let len = usize::try_from(day_diff(range_start, range_end) + 1)
        .map_err(|_| CoreError::Invariant("range length overflow".into()))?;
    let mut heatmap = vec![false; len];
    let mut streak_days = 0i64;
    let mut mark = |date: NaiveDate| {
        if date < range_start || date > range_end {
            return;
        }
        // in range, so the offset is non-negative and below `len`
        let idx = day_diff(range_start, date) as usize;
        if !heatmap[idx] {
            heatmap[idx] = true;
            streak_days += 1;
        }
    };

    let slip_up_on_creation = intervals.iter().any(|iv| iv.end == habit.created_date);
    let slip_up_today = intervals.iter().any(|iv| iv.end == today);
    let window = eligible_window(habit, slip_up_on_creation, slip_up_today, today);

    for interval in intervals {
        let from = interval.start.max(range_start);
        let to = interval.end.min(range_end);
        for date in days_between(from, to) {
            match habit.habit_type {
                HabitType::Quit if date == interval.end => continue,
                HabitType::Improve if date == today && interval.end < today => continue,
                _ => mark(date),
            }
        }
    }

    if habit.habit_type == HabitType::Quit {
        // Days after the last recorded slip-up are clean until one is logged.
        let tail_start = intervals
            .iter()
            .map(|iv| next_day(iv.end))
            .max()
            .unwrap_or(window.0)
            .max(window.0);
        let tail_end = prev_day(today).min(range_end);
        for date in days_between(tail_start.max(range_start), tail_end) {
            mark(date);
        }
    }

    let eligible = eligible_days_in(window, range_start, range_end);
    Ok(HabitStatsForRange {
        habit: habit.clone(),
        heatmap,
        total_streak_days_in_range: streak_days,
        total_misses_in_range: (eligible - streak_days).max(0),
        range_start,
        range_end,
        eligible_window: window,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
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
            id: 0,
            habit_id: 1,
            start,
            end,
        }
    }

    #[test]
    fn improve_month_with_two_runs() {
        let h = habit(HabitType::Improve, d(11, 1));
        let ivs = [iv(d(11, 1), d(11, 5)), iv(d(11, 10), d(11, 12))];
        let stats = range_stats(&h, &ivs, d(11, 1), d(11, 30), d(12, 15)).unwrap();

        assert_eq!(stats.heatmap.len(), 30);
        assert_eq!(stats.total_streak_days_in_range, 8);
        assert_eq!(stats.total_misses_in_range, 22);
        assert_eq!(stats.day(d(11, 5)), Some(true));
        assert_eq!(stats.day(d(11, 6)), Some(false));
        assert_eq!(stats.day(d(11, 10)), Some(true));
    }

    #[test]
    fn quit_slip_ups_are_misses() {
        let h = habit(HabitType::Quit, d(11, 1));
        let ivs = [iv(d(11, 2), d(11, 5)), iv(d(11, 6), d(11, 10))];
        let stats = range_stats(&h, &ivs, d(11, 1), d(11, 10), d(12, 1)).unwrap();

        assert_eq!(stats.total_streak_days_in_range, 7);
        assert_eq!(stats.total_misses_in_range, 2);
        // creation day is neither clean nor missed
        assert_eq!(stats.day(d(11, 1)), Some(false));
        assert_eq!(stats.day(d(11, 5)), Some(false));
        assert_eq!(stats.missed(d(11, 1)), Some(false));
        assert_eq!(stats.missed(d(11, 5)), Some(true));
        assert_eq!(stats.missed(d(12, 5)), None);
    }

    #[test]
    fn quit_without_slip_ups_is_clean_through_yesterday() {
        let h = habit(HabitType::Quit, d(11, 14));
        let today = d(11, 20);
        let stats = range_stats(&h, &[], d(11, 1), d(11, 30), today).unwrap();

        assert_eq!(stats.total_streak_days_in_range, 5); // 15th..19th
        assert_eq!(stats.total_misses_in_range, 0);
        assert_eq!(stats.day(d(11, 14)), Some(false));
        assert_eq!(stats.day(d(11, 19)), Some(true));
        assert_eq!(stats.day(today), Some(false));
    }

    #[test]
    fn quit_slip_up_on_creation_day_counts_as_miss() {
        let h = habit(HabitType::Quit, d(11, 3));
        let ivs = [iv(d(11, 3), d(11, 3))];
        let stats = range_stats(&h, &ivs, d(11, 1), d(11, 5), d(11, 6)).unwrap();

        assert_eq!(stats.day(d(11, 3)), Some(false));
        // 3rd is a miss, 4th and 5th are clean
        assert_eq!(stats.total_streak_days_in_range, 2);
        assert_eq!(stats.total_misses_in_range, 1);
    }

    #[test]
    fn quit_days_after_last_slip_up_stay_clean() {
        let h = habit(HabitType::Quit, d(11, 1));
        let ivs = [iv(d(11, 2), d(11, 5))];
        let stats = range_stats(&h, &ivs, d(11, 1), d(11, 30), d(11, 9)).unwrap();

        // clean 2..4, slip 5, clean 6..8, today (9th) not yet counted
        assert_eq!(stats.total_streak_days_in_range, 6);
        assert_eq!(stats.total_misses_in_range, 1);
        assert_eq!(stats.day(d(11, 8)), Some(true));
        assert_eq!(stats.day(d(11, 9)), Some(false));
    }

    #[test]
    fn quit_slip_up_today_counts_today() {
        let h = habit(HabitType::Quit, d(11, 1));
        let ivs = [iv(d(11, 2), d(11, 9))];
        let stats = range_stats(&h, &ivs, d(11, 1), d(11, 30), d(11, 9)).unwrap();

        assert_eq!(stats.total_streak_days_in_range, 7);
        assert_eq!(stats.total_misses_in_range, 1);
    }

    #[test]
    fn days_before_creation_are_not_counted() {
        let h = habit(HabitType::Improve, d(11, 15));
        let stats = range_stats(&h, &[], d(11, 1), d(11, 30), d(12, 5)).unwrap();
        assert_eq!(stats.total_streak_days_in_range, 0);
        assert_eq!(stats.total_misses_in_range, 16);
    }

    #[test]
    fn improve_future_days_are_not_eligible() {
        let h = habit(HabitType::Improve, d(11, 1));
        let ivs = [iv(d(11, 1), d(11, 10))];
        let stats = range_stats(&h, &ivs, d(11, 1), d(11, 30), d(11, 10)).unwrap();
        assert_eq!(stats.total_streak_days_in_range, 10);
        assert_eq!(stats.total_misses_in_range, 0);
    }

    #[test]
    fn intervals_are_clipped_to_the_range() {
        let h = habit(HabitType::Improve, d(10, 1));
        let ivs = [iv(d(10, 25), d(11, 3))];
        let stats = range_stats(&h, &ivs, d(11, 1), d(11, 30), d(12, 1)).unwrap();
        assert_eq!(stats.total_streak_days_in_range, 3);
        assert!(stats.heatmap[..3].iter().all(|b| *b));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let h = habit(HabitType::Improve, d(11, 1));
        let err = range_stats(&h, &[], d(11, 5), d(11, 4), d(11, 10)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn malformed_interval_is_an_invariant_error() {
        let h = habit(HabitType::Improve, d(11, 1));
        let ivs = [iv(d(11, 5), d(11, 4))];
        let err = range_stats(&h, &ivs, d(11, 1), d(11, 30), d(11, 10)).unwrap_err();
        assert!(matches!(err, CoreError::Invariant(_)));
    }

    #[test]
    fn eligible_window_by_type() {
        let improve = habit(HabitType::Improve, d(11, 1));
        assert_eq!(eligible_window(&improve, false, false, d(11, 9)), (d(11, 1), d(11, 9)));

        let quit = habit(HabitType::Quit, d(11, 1));
        assert_eq!(eligible_window(&quit, false, false, d(11, 9)), (d(11, 2), d(11, 8)));
        assert_eq!(eligible_window(&quit, true, true, d(11, 9)), (d(11, 1), d(11, 9)));
        assert_eq!(eligible_days_in((d(11, 2), d(11, 8)), d(11, 5), d(11, 30)), 4);
        assert_eq!(eligible_days_in((d(11, 2), d(11, 1)), d(11, 1), d(11, 30)), 0);
    }
}
