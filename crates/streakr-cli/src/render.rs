//! Plain-text rendering of habits, month calendars and overview tables.
//!
//! Every function returns a `String` so output can be checked in tests
//! without capturing stdout.

use std::fmt::Write as _;

use chrono::{Datelike, NaiveDate};
use streakr_core::date::days_between;
use streakr_core::storage::WeekStart;
use streakr_core::{Habit, HabitInfo, HabitStatsForRange, HabitType};

const DONE: char = '●';
const MISSED: char = '○';
const BLANK: char = ' ';

const MONDAY_HEADER: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];
const SUNDAY_HEADER: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

fn day_mark(stats: &HabitStatsForRange, date: NaiveDate) -> char {
    match (stats.day(date), stats.missed(date)) {
        (Some(true), _) => DONE,
        (_, Some(true)) => MISSED,
        _ => BLANK,
    }
}

/// Month grid with one marked cell per day.
pub fn month_calendar(stats: &HabitStatsForRange, week_start: WeekStart) -> String {
    let first = stats.range_start;
    let (header, offset) = match week_start {
        WeekStart::Monday => (MONDAY_HEADER, first.weekday().num_days_from_monday()),
        WeekStart::Sunday => (SUNDAY_HEADER, first.weekday().num_days_from_sunday()),
    };

    let mut out = String::new();
    let _ = writeln!(out, "{} · {}", stats.habit.name, first.format("%B %Y"));
    let _ = writeln!(
        out,
        "{}",
        header.map(|d| format!(" {d} ")).concat().trim_end()
    );

    let mut row = "    ".repeat(offset as usize);
    let mut col = offset;
    for date in days_between(stats.range_start, stats.range_end) {
        let _ = write!(row, "{:>3}{}", date.day(), day_mark(stats, date));
        col += 1;
        if col == 7 {
            let _ = writeln!(out, "{}", row.trim_end());
            row.clear();
            col = 0;
        }
    }
    if !row.is_empty() {
        let _ = writeln!(out, "{}", row.trim_end());
    }

    let legend = match stats.habit.habit_type {
        HabitType::Improve => format!("{DONE} done  {MISSED} missed"),
        HabitType::Quit => format!("{DONE} clean  {MISSED} slip-up"),
    };
    let _ = writeln!(out, "{legend}");
    out
}

/// Totals for the month plus the all-time streaks.
pub fn month_summary(stats: &HabitStatsForRange, current: i64, max: i64) -> String {
    let (done, missed) = match stats.habit.habit_type {
        HabitType::Improve => ("performed", "missed"),
        HabitType::Quit => ("clean days", "slip-ups"),
    };
    format!(
        "{done}: {}  {missed}: {}\ncurrent streak: {current}  best: {max}\n",
        stats.total_streak_days_in_range, stats.total_misses_in_range
    )
}

/// One row per habit, in the order given.
pub fn overview_table(infos: &[HabitInfo]) -> String {
    let width = infos
        .iter()
        .map(|i| i.habit.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("HABIT".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<width$}  {:<7}  {:>7}  {:>4}  {:>4}  {:>6}",
        "HABIT", "TYPE", "CURRENT", "BEST", "DONE", "MISSED"
    );
    for info in infos {
        let _ = writeln!(
            out,
            "{:<width$}  {:<7}  {:>7}  {:>4}  {:>4}  {:>6}",
            info.habit.name,
            info.habit.habit_type.as_str(),
            info.current_streak,
            info.max_streak,
            info.total_performed_days,
            info.total_missed_days,
        );
    }
    out
}

pub fn habit_table(habits: &[Habit]) -> String {
    let width = habits
        .iter()
        .map(|h| h.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:<width$}  {:<7}  {:<15}  DESCRIPTION", "NAME", "TYPE", "ALIASES");
    for habit in habits {
        let aliases = if habit.aliases.is_empty() {
            "-".to_string()
        } else {
            habit.aliases.join(",")
        };
        let line = format!(
            "{:<width$}  {:<7}  {:<15}  {}",
            habit.name,
            habit.habit_type.as_str(),
            aliases,
            habit.description.as_deref().unwrap_or("")
        );
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}
