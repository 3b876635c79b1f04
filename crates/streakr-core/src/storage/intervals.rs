//! Streak interval queries on [`Database`].
//!
//! Interval lengths are computed in SQL with `julianday`, which treats the
//! stored `YYYY-MM-DD` text as a calendar date.

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};

use super::database::{date_column, Database};
use super::traits::IntervalStore;
use crate::date::format_date;
use crate::error::DatabaseError;
use crate::streak::StreakInterval;

const INTERVAL_COLUMNS: &str = "id, habit_id, streak_start, streak_end";

/// Inclusive day count of a stored interval.
const INTERVAL_DAYS: &str =
    "(CAST(julianday(streak_end) - julianday(streak_start) AS INTEGER) + 1)";

fn row_to_interval(row: &Row) -> rusqlite::Result<StreakInterval> {
    Ok(StreakInterval {
        id: row.get(0)?,
        habit_id: row.get(1)?,
        start: date_column(row, 2)?,
        end: date_column(row, 3)?,
    })
}

impl IntervalStore for Database {
    fn latest_interval(&self, habit_id: i64) -> Result<Option<StreakInterval>, DatabaseError> {
        let latest = self
            .conn()
            .query_row(
                &format!(
                    "SELECT {INTERVAL_COLUMNS} FROM streaks
                     WHERE habit_id = ?1
                     ORDER BY streak_end DESC, id DESC
                     LIMIT 1"
                ),
                params![habit_id],
                row_to_interval,
            )
            .optional()?;
        Ok(latest)
    }

    fn create_interval(
        &self,
        habit_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<StreakInterval, DatabaseError> {
        self.conn().execute(
            "INSERT INTO streaks (habit_id, streak_start, streak_end) VALUES (?1, ?2, ?3)",
            params![habit_id, format_date(start), format_date(end)],
        )?;
        Ok(StreakInterval {
            id: self.conn().last_insert_rowid(),
            habit_id,
            start,
            end,
        })
    }

    fn extend_interval_end(
        &self,
        interval_id: i64,
        new_end: NaiveDate,
    ) -> Result<(), DatabaseError> {
        let updated = self.conn().execute(
            "UPDATE streaks SET streak_end = ?1 WHERE id = ?2",
            params![format_date(new_end), interval_id],
        )?;
        if updated == 0 {
            return Err(DatabaseError::QueryFailed(format!(
                "streak interval {interval_id} does not exist"
            )));
        }
        Ok(())
    }

    fn intervals_in_range(
        &self,
        habit_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<StreakInterval>, DatabaseError> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {INTERVAL_COLUMNS} FROM streaks
             WHERE habit_id = ?1 AND streak_end >= ?2 AND streak_start <= ?3
             ORDER BY streak_start, id"
        ))?;
        let intervals = stmt
            .query_map(
                params![habit_id, format_date(start), format_date(end)],
                row_to_interval,
            )?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(intervals)
    }

    fn max_interval_length(&self, habit_id: i64) -> Result<i64, DatabaseError> {
        let len = self.conn().query_row(
            &format!("SELECT COALESCE(MAX({INTERVAL_DAYS}), 0) FROM streaks WHERE habit_id = ?1"),
            params![habit_id],
            |row| row.get(0),
        )?;
        Ok(len)
    }

    fn total_days_covered(&self, habit_id: i64) -> Result<i64, DatabaseError> {
        let total = self.conn().query_row(
            &format!("SELECT COALESCE(SUM({INTERVAL_DAYS}), 0) FROM streaks WHERE habit_id = ?1"),
            params![habit_id],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    fn interval_count(&self, habit_id: i64) -> Result<i64, DatabaseError> {
        let count = self.conn().query_row(
            "SELECT COUNT(*) FROM streaks WHERE habit_id = ?1",
            params![habit_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::{HabitType, NewHabit};
    use crate::storage::HabitRegistry;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    fn setup() -> (Database, i64) {
        let db = Database::open_memory().unwrap();
        let habit = db
            .insert_habit(&NewHabit::new("read", HabitType::Improve), d(10, 1))
            .unwrap();
        (db, habit.id)
    }

    #[test]
    fn empty_store_aggregates_to_zero() {
        let (db, id) = setup();
        assert!(db.latest_interval(id).unwrap().is_none());
        assert_eq!(db.max_interval_length(id).unwrap(), 0);
        assert_eq!(db.total_days_covered(id).unwrap(), 0);
        assert_eq!(db.interval_count(id).unwrap(), 0);
        assert_eq!(db.total_clean_days_excluding_current(id).unwrap(), 0);
    }

    #[test]
    fn latest_is_highest_end_date() {
        let (db, id) = setup();
        db.create_interval(id, d(11, 5), d(11, 9)).unwrap();
        db.create_interval(id, d(11, 1), d(11, 2)).unwrap();

        let latest = db.latest_interval(id).unwrap().unwrap();
        assert_eq!((latest.start, latest.end), (d(11, 5), d(11, 9)));
    }

    #[test]
    fn extend_moves_end_date() {
        let (db, id) = setup();
        let iv = db.create_interval(id, d(11, 1), d(11, 1)).unwrap();
        db.extend_interval_end(iv.id, d(11, 2)).unwrap();

        assert_eq!(db.latest_interval(id).unwrap().unwrap().end, d(11, 2));
        assert!(db.extend_interval_end(9999, d(11, 3)).is_err());
    }

    #[test]
    fn lengths_span_month_boundaries() {
        let (db, id) = setup();
        db.create_interval(id, d(10, 30), d(11, 2)).unwrap();
        db.create_interval(id, d(11, 10), d(11, 10)).unwrap();

        assert_eq!(db.max_interval_length(id).unwrap(), 4);
        assert_eq!(db.total_days_covered(id).unwrap(), 5);
        assert_eq!(db.interval_count(id).unwrap(), 2);
        assert_eq!(db.total_clean_days_excluding_current(id).unwrap(), 3);
    }

    #[test]
    fn range_query_returns_overlapping_intervals_in_order() {
        let (db, id) = setup();
        db.create_interval(id, d(11, 20), d(12, 3)).unwrap();
        db.create_interval(id, d(10, 28), d(11, 2)).unwrap();
        db.create_interval(id, d(10, 1), d(10, 5)).unwrap();
        db.create_interval(id, d(11, 10), d(11, 12)).unwrap();

        let found = db.intervals_in_range(id, d(11, 1), d(11, 30)).unwrap();
        let starts: Vec<_> = found.iter().map(|iv| iv.start).collect();
        assert_eq!(starts, [d(10, 28), d(11, 10), d(11, 20)]);
    }

    #[test]
    fn intervals_are_scoped_to_their_habit() {
        let (db, id) = setup();
        let other = db
            .insert_habit(&NewHabit::new("gym", HabitType::Improve), d(10, 1))
            .unwrap();
        db.create_interval(id, d(11, 1), d(11, 3)).unwrap();

        assert_eq!(db.interval_count(other.id).unwrap(), 0);
        assert!(db.latest_interval(other.id).unwrap().is_none());
    }
}
