//! Habit tracking engine.
//!
//! [`Tracker`] ties the registry, the interval store and a [`Clock`]
//! together. It is the only place that turns the pure transition and
//! statistics functions into reads and writes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::error::{CoreError, Result, ValidationError};
use crate::habit::{normalize_alias, normalize_name, Habit, HabitType, NewHabit, MAX_ALIASES};
use crate::stats::{range_stats, summarize, HabitHistory, HabitInfo, HabitStatsForRange};
use crate::storage::{HabitRegistry, IntervalStore};
use crate::streak::{current_streak, max_streak, plan_log, Transition};

/// What a log call did to one habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogAction {
    Created,
    Extended,
    AlreadyLogged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub name: String,
    pub habit_type: HabitType,
    pub action: LogAction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogReport {
    /// Every logged habit is a Quit habit.
    pub all_quit: bool,
    pub entries: Vec<LogEntry>,
}

/// Habit tracker over a store `S` and a clock `C`.
pub struct Tracker<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S> Tracker<S, SystemClock>
where
    S: HabitRegistry + IntervalStore,
{
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S, C> Tracker<S, C>
where
    S: HabitRegistry + IntervalStore,
    C: Clock,
{
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the store back, e.g. to close it explicitly.
    pub fn into_store(self) -> S {
        self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // ── Registry ─────────────────────────────────────────────────────────

    /// Resolve a name or alias.
    ///
    /// Names and aliases are stored lower-cased, and SQLite's NOCASE only
    /// folds ASCII, so the query is lower-cased here.
    pub fn habit(&self, query: &str) -> Result<Habit> {
        let query = query.trim();
        self.store
            .find_habit(&query.to_lowercase())?
            .ok_or_else(|| CoreError::NotFound {
                name: query.to_string(),
            })
    }

    pub fn list_habits(&self) -> Result<Vec<Habit>> {
        Ok(self.store.list_habits()?)
    }

    /// Validate and store a new habit created today.
    pub fn add_habit(&self, habit: NewHabit) -> Result<Habit> {
        let habit = habit.validate()?;
        self.ensure_free("habit name", &habit.name)?;
        for alias in &habit.aliases {
            self.ensure_free("alias", alias)?;
        }

        let created = self.store.insert_habit(&habit, self.today())?;
        tracing::info!(
            habit = %created.name,
            habit_type = %created.habit_type,
            aliases = created.aliases.len(),
            "habit added"
        );
        Ok(created)
    }

    pub fn rename_habit(&self, query: &str, new_name: &str) -> Result<Habit> {
        let habit = self.habit(query)?;
        let new_name = normalize_name(new_name)?;
        if new_name == habit.name {
            return Ok(habit);
        }
        self.ensure_free("habit name", &new_name)?;

        self.store.rename_habit(habit.id, &new_name)?;
        tracing::info!(from = %habit.name, to = %new_name, "habit renamed");
        Ok(Habit {
            name: new_name,
            ..habit
        })
    }

    pub fn add_alias(&self, query: &str, alias: &str) -> Result<Habit> {
        let mut habit = self.habit(query)?;
        let alias = normalize_alias(alias)?;
        if habit.aliases.len() >= MAX_ALIASES {
            return Err(ValidationError::TooMany {
                field: "aliases".into(),
                max: MAX_ALIASES,
            }
            .into());
        }
        self.ensure_free("alias", &alias)?;

        self.store.add_alias(habit.id, &alias)?;
        tracing::info!(habit = %habit.name, alias = %alias, "alias added");
        habit.aliases.push(alias);
        Ok(habit)
    }

    pub fn remove_alias(&self, query: &str, alias: &str) -> Result<Habit> {
        let mut habit = self.habit(query)?;
        let alias = alias.trim().to_lowercase();
        if !self.store.remove_alias(habit.id, &alias)? {
            return Err(ValidationError::invalid(
                "alias",
                format!("'{alias}' does not belong to {}", habit.name),
            )
            .into());
        }
        tracing::info!(habit = %habit.name, alias = %alias, "alias removed");
        habit.aliases.retain(|a| *a != alias);
        Ok(habit)
    }

    /// Delete every named habit with its history.
    ///
    /// All queries are resolved before anything is deleted, so an unknown
    /// name leaves the registry untouched.
    pub fn delete_habits<Q: AsRef<str>>(&self, queries: &[Q]) -> Result<Vec<Habit>> {
        let habits = self.resolve_all(queries)?;
        for habit in &habits {
            self.store.delete_habit(habit.id)?;
            tracing::info!(habit = %habit.name, "habit deleted");
        }
        Ok(habits)
    }

    // ── Logging ──────────────────────────────────────────────────────────

    /// Log today for each named habit.
    ///
    /// Names are resolved up front. Writes then happen in order; if one
    /// fails, the rest are skipped and earlier ones stay committed.
    /// Logging a habit twice on one day is a no-op.
    pub fn log_today<Q: AsRef<str>>(&self, queries: &[Q]) -> Result<LogReport> {
        let habits = self.resolve_all(queries)?;
        let today = self.today();

        let mut entries = Vec::with_capacity(habits.len());
        for habit in &habits {
            let latest = self.store.latest_interval(habit.id)?;
            let action = match plan_log(habit, latest.as_ref(), today) {
                Transition::Skip => LogAction::AlreadyLogged,
                Transition::Create { start, end } => {
                    self.store.create_interval(habit.id, start, end)?;
                    LogAction::Created
                }
                Transition::Extend {
                    interval_id,
                    new_end,
                } => {
                    self.store.extend_interval_end(interval_id, new_end)?;
                    LogAction::Extended
                }
            };
            tracing::info!(habit = %habit.name, ?action, %today, "habit logged");
            entries.push(LogEntry {
                name: habit.name.clone(),
                habit_type: habit.habit_type,
                action,
            });
        }

        Ok(LogReport {
            all_quit: !habits.is_empty() && habits.iter().all(Habit::is_quit),
            entries,
        })
    }

    /// `(logged today, total)` over Improve habits.
    pub fn logged_today_count(&self) -> Result<(usize, usize)> {
        let today = self.today();
        let mut logged = 0;
        let mut total = 0;
        for habit in self.store.list_habits()? {
            if habit.is_quit() {
                continue;
            }
            total += 1;
            if self
                .store
                .latest_interval(habit.id)?
                .is_some_and(|iv| iv.end == today)
            {
                logged += 1;
            }
        }
        Ok((logged, total))
    }

    // ── Statistics ───────────────────────────────────────────────────────

    pub fn current_and_max_streak(&self, query: &str) -> Result<(i64, i64)> {
        let habit = self.habit(query)?;
        let latest = self.store.latest_interval(habit.id)?;
        if let Some(iv) = &latest {
            iv.check()?;
        }
        let current = current_streak(&habit, latest.as_ref(), self.today());
        let longest = self.store.max_interval_length(habit.id)?;
        Ok((current, max_streak(habit.habit_type, longest, current)))
    }

    pub fn stats_for_range(
        &self,
        query: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HabitStatsForRange> {
        let habit = self.habit(query)?;
        if end < start {
            return Err(ValidationError::InvalidDateRange { start, end }.into());
        }
        let intervals = self.store.intervals_in_range(habit.id, start, end)?;
        tracing::debug!(
            habit = %habit.name,
            %start,
            %end,
            intervals = intervals.len(),
            "building range stats"
        );
        range_stats(&habit, &intervals, start, end, self.today())
    }

    pub fn habit_info(&self, habit: &Habit) -> Result<HabitInfo> {
        let latest = self.store.latest_interval(habit.id)?;
        if let Some(iv) = &latest {
            iv.check()?;
        }
        let slip_up_on_creation = habit.is_quit()
            && self
                .store
                .intervals_in_range(habit.id, habit.created_date, habit.created_date)?
                .iter()
                .any(|iv| iv.end == habit.created_date);

        let history = HabitHistory {
            latest,
            longest_interval_days: self.store.max_interval_length(habit.id)?,
            total_days_covered: self.store.total_days_covered(habit.id)?,
            total_clean_days: match habit.habit_type {
                HabitType::Improve => 0,
                HabitType::Quit => self.store.total_clean_days_excluding_current(habit.id)?,
            },
            slip_up_on_creation,
        };
        Ok(summarize(habit, &history, self.today()))
    }

    /// One summary per habit, in registry order.
    pub fn overall_stats(&self) -> Result<Vec<HabitInfo>> {
        self.store
            .list_habits()?
            .iter()
            .map(|habit| self.habit_info(habit))
            .collect()
    }

    // ── Helpers ──────────────────────────────────────────────────────────

    fn ensure_free(&self, field: &str, word: &str) -> Result<()> {
        if self.store.is_name_taken(word)? {
            return Err(ValidationError::Duplicate {
                field: field.to_string(),
                value: word.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Resolve every query, failing on the first unknown one. Repeats of
    /// the same habit collapse to one entry.
    fn resolve_all<Q: AsRef<str>>(&self, queries: &[Q]) -> Result<Vec<Habit>> {
        let mut habits: Vec<Habit> = Vec::with_capacity(queries.len());
        for query in queries {
            let habit = self.habit(query.as_ref())?;
            if !habits.iter().any(|h| h.id == habit.id) {
                habits.push(habit);
            }
        }
        Ok(habits)
    }
}
