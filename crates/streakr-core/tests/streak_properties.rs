//! Property tests for the streak engine.
//!
//! Histories are generated as a set of day offsets on which a habit was
//! logged, replayed day by day through a `Tracker`.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use streakr_core::date::month_bounds;
use streakr_core::{Database, FixedClock, HabitType, IntervalStore, NewHabit, Tracker};

const HORIZON: i64 = 60;

fn origin() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
}

fn habit_type() -> impl Strategy<Value = HabitType> {
    prop_oneof![Just(HabitType::Improve), Just(HabitType::Quit)]
}

/// Replay `log_days` (offsets from the origin) and return the database.
fn replay(habit_type: HabitType, log_days: &[i64]) -> Database {
    let db = Database::open_memory().unwrap();
    Tracker::with_clock(&db, FixedClock(origin()))
        .add_habit(NewHabit::new("habit", habit_type))
        .unwrap();
    for &offset in log_days {
        Tracker::with_clock(&db, FixedClock(origin() + Duration::days(offset)))
            .log_today(&["habit"])
            .unwrap();
    }
    db
}

fn sorted_days() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::btree_set(0..HORIZON, 0..40).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn heatmap_has_one_entry_per_day(
        t in habit_type(),
        days in sorted_days(),
        start in 0..HORIZON,
        len in 1..45i64,
    ) {
        let db = replay(t, &days);
        let tracker = Tracker::with_clock(&db, FixedClock(origin() + Duration::days(HORIZON)));
        let range_start = origin() + Duration::days(start);
        let range_end = range_start + Duration::days(len - 1);

        let stats = tracker.stats_for_range("habit", range_start, range_end).unwrap();
        prop_assert_eq!(stats.heatmap.len() as i64, len);
        let marked = stats.heatmap.iter().filter(|d| **d).count() as i64;
        prop_assert_eq!(marked, stats.total_streak_days_in_range);
        prop_assert!(stats.total_misses_in_range >= 0);
    }

    #[test]
    fn max_streak_never_below_current(t in habit_type(), days in sorted_days(), now in 0..HORIZON + 10) {
        let db = replay(t, &days);
        let today = origin() + Duration::days(now.max(days.last().copied().unwrap_or(0)));
        let tracker = Tracker::with_clock(&db, FixedClock(today));

        let (current, max) = tracker.current_and_max_streak("habit").unwrap();
        prop_assert!(current >= 0);
        prop_assert!(max >= current);
    }

    #[test]
    fn relogging_the_last_day_is_a_no_op(t in habit_type(), days in sorted_days()) {
        prop_assume!(!days.is_empty());
        let db = replay(t, &days);
        let last = origin() + Duration::days(*days.last().unwrap());
        let before = db.intervals_in_range(1, origin(), last).unwrap();

        Tracker::with_clock(&db, FixedClock(last)).log_today(&["habit"]).unwrap();

        prop_assert_eq!(db.intervals_in_range(1, origin(), last).unwrap(), before);
    }

    #[test]
    fn intervals_never_overlap(t in habit_type(), days in sorted_days()) {
        let db = replay(t, &days);
        let end = origin() + Duration::days(HORIZON);
        let intervals = db.intervals_in_range(1, origin(), end).unwrap();
        for pair in intervals.windows(2) {
            prop_assert!(pair[0].end < pair[1].start);
        }
        for iv in &intervals {
            prop_assert!(iv.start <= iv.end);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Logging an improve habit every day of a month fills that month.
    #[test]
    fn daily_logging_covers_the_whole_month(month in 1u32..=12) {
        let (first, last) = month_bounds(2024, month).unwrap();
        let db = Database::open_memory().unwrap();
        Tracker::with_clock(&db, FixedClock(first))
            .add_habit(NewHabit::new("daily", HabitType::Improve))
            .unwrap();
        let mut day = first;
        while day <= last {
            Tracker::with_clock(&db, FixedClock(day)).log_today(&["daily"]).unwrap();
            day += Duration::days(1);
        }

        let tracker = Tracker::with_clock(&db, FixedClock(last));
        let stats = tracker.stats_for_range("daily", first, last).unwrap();
        prop_assert!(stats.heatmap.iter().all(|d| *d));
        prop_assert_eq!(stats.total_misses_in_range, 0);
        prop_assert_eq!(db.interval_count(1).unwrap(), 1);
    }
}
