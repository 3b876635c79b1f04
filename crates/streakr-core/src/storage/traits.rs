use chrono::NaiveDate;

use crate::error::DatabaseError;
use crate::habit::{Habit, NewHabit};
use crate::streak::StreakInterval;

/// Habit records, looked up by name or alias.
///
/// Names and aliases are compared case-insensitively. Deleting a habit
/// removes its aliases and intervals with it.
pub trait HabitRegistry {
    fn insert_habit(&self, habit: &NewHabit, created: NaiveDate) -> Result<Habit, DatabaseError>;

    /// Resolve `query` against names first, then aliases.
    fn find_habit(&self, query: &str) -> Result<Option<Habit>, DatabaseError>;

    fn list_habits(&self) -> Result<Vec<Habit>, DatabaseError>;

    fn rename_habit(&self, habit_id: i64, new_name: &str) -> Result<(), DatabaseError>;

    fn add_alias(&self, habit_id: i64, alias: &str) -> Result<(), DatabaseError>;

    /// Returns false when the habit had no such alias.
    fn remove_alias(&self, habit_id: i64, alias: &str) -> Result<bool, DatabaseError>;

    fn delete_habit(&self, habit_id: i64) -> Result<(), DatabaseError>;

    /// Whether `word` is taken by any habit name or alias.
    fn is_name_taken(&self, word: &str) -> Result<bool, DatabaseError> {
        Ok(self.find_habit(word)?.is_some())
    }
}

/// Append-mostly storage of streak intervals.
pub trait IntervalStore {
    /// The interval with the highest end date, if any.
    fn latest_interval(&self, habit_id: i64) -> Result<Option<StreakInterval>, DatabaseError>;

    fn create_interval(
        &self,
        habit_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<StreakInterval, DatabaseError>;

    fn extend_interval_end(&self, interval_id: i64, new_end: NaiveDate)
        -> Result<(), DatabaseError>;

    /// Intervals overlapping `[start, end]`, ordered by start date.
    fn intervals_in_range(
        &self,
        habit_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<StreakInterval>, DatabaseError>;

    /// Inclusive day length of the longest interval, 0 when there is none.
    fn max_interval_length(&self, habit_id: i64) -> Result<i64, DatabaseError>;

    /// Sum of inclusive day lengths over all intervals.
    fn total_days_covered(&self, habit_id: i64) -> Result<i64, DatabaseError>;

    /// Clean days of a Quit habit's closed intervals: every covered day except
    /// each interval's slip-up marker. The run in progress is not included.
    fn total_clean_days_excluding_current(&self, habit_id: i64) -> Result<i64, DatabaseError> {
        Ok(self.total_days_covered(habit_id)? - self.interval_count(habit_id)?)
    }

    fn interval_count(&self, habit_id: i64) -> Result<i64, DatabaseError>;
}

impl<T: HabitRegistry + ?Sized> HabitRegistry for &T {
    fn insert_habit(&self, habit: &NewHabit, created: NaiveDate) -> Result<Habit, DatabaseError> {
        (**self).insert_habit(habit, created)
    }

    fn find_habit(&self, query: &str) -> Result<Option<Habit>, DatabaseError> {
        (**self).find_habit(query)
    }

    fn list_habits(&self) -> Result<Vec<Habit>, DatabaseError> {
        (**self).list_habits()
    }

    fn rename_habit(&self, habit_id: i64, new_name: &str) -> Result<(), DatabaseError> {
        (**self).rename_habit(habit_id, new_name)
    }

    fn add_alias(&self, habit_id: i64, alias: &str) -> Result<(), DatabaseError> {
        (**self).add_alias(habit_id, alias)
    }

    fn remove_alias(&self, habit_id: i64, alias: &str) -> Result<bool, DatabaseError> {
        (**self).remove_alias(habit_id, alias)
    }

    fn delete_habit(&self, habit_id: i64) -> Result<(), DatabaseError> {
        (**self).delete_habit(habit_id)
    }
}

impl<T: IntervalStore + ?Sized> IntervalStore for &T {
    fn latest_interval(&self, habit_id: i64) -> Result<Option<StreakInterval>, DatabaseError> {
        (**self).latest_interval(habit_id)
    }

    fn create_interval(
        &self,
        habit_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<StreakInterval, DatabaseError> {
        (**self).create_interval(habit_id, start, end)
    }

    fn extend_interval_end(&self, interval_id: i64, new_end: NaiveDate)
        -> Result<(), DatabaseError> {
        (**self).extend_interval_end(interval_id, new_end)
    }

    fn intervals_in_range(
        &self,
        habit_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<StreakInterval>, DatabaseError> {
        (**self).intervals_in_range(habit_id, start, end)
    }

    fn max_interval_length(&self, habit_id: i64) -> Result<i64, DatabaseError> {
        (**self).max_interval_length(habit_id)
    }

    fn total_days_covered(&self, habit_id: i64) -> Result<i64, DatabaseError> {
        (**self).total_days_covered(habit_id)
    }

    fn interval_count(&self, habit_id: i64) -> Result<i64, DatabaseError> {
        (**self).interval_count(habit_id)
    }
}
