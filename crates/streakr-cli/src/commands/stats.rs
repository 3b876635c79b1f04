use chrono::{Datelike, NaiveDate};
use clap::Args;
use streakr_core::date::{at_least_one_calendar_month_apart, month_bounds, next_day, parse_month, prev_day};
use streakr_core::Config;

use super::{close_tracker, open_tracker, CmdResult};
use crate::render;

const MIN_YEAR: i32 = 1900;

#[derive(Args)]
pub struct StatsArgs {
    /// Habit to show a month calendar for; omit for an overview of all habits
    pub habit: Option<String>,
    /// Month to show, as 1-12 or a month name (default: current month)
    #[arg(short, long, requires = "habit")]
    pub month: Option<String>,
    /// Year of the month to show (default: current year)
    #[arg(short, long, requires = "habit")]
    pub year: Option<i32>,
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

/// First and last day of the requested month, checked against the habit's
/// lifetime.
pub fn resolve_month(
    month: Option<&str>,
    year: Option<i32>,
    created: NaiveDate,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), String> {
    let year = year.unwrap_or(today.year());
    if year < MIN_YEAR || year > today.year() {
        return Err(format!(
            "invalid year {year}: must be between {MIN_YEAR} and {}",
            today.year()
        ));
    }
    let month = match month {
        Some(raw) => parse_month(raw)
            .ok_or_else(|| format!("invalid month '{raw}': must be 1-12 or month name"))?,
        None => today.month(),
    };
    let (first, last) =
        month_bounds(year, month).ok_or_else(|| format!("invalid month {month}/{year}"))?;

    if (year, month) < (created.year(), created.month()) {
        return Err("cannot get stats before habit creation date".into());
    }
    if (year, month) > (today.year(), today.month()) {
        return Err("cannot get stats for a month that has not started".into());
    }
    Ok((first, last))
}

pub fn run(args: StatsArgs) -> CmdResult {
    let config = Config::load_or_default();
    let json = args.json || config.display.json;
    let tracker = open_tracker()?;
    let today = tracker.today();

    let Some(query) = args.habit.as_deref() else {
        let mut infos = tracker.overall_stats()?;
        close_tracker(tracker);
        infos.sort_by(|a, b| {
            b.current_streak
                .cmp(&a.current_streak)
                .then_with(|| a.habit.name.cmp(&b.habit.name))
        });

        if json {
            println!("{}", serde_json::to_string_pretty(&infos)?);
        } else if infos.is_empty() {
            println!("no habits yet, add one with `streakr add <name>`");
        } else {
            print!("{}", render::overview_table(&infos));
        }
        return Ok(());
    };

    let habit = tracker.habit(query)?;
    let (first, last) = resolve_month(args.month.as_deref(), args.year, habit.created_date, today)?;
    let stats = tracker.stats_for_range(query, first, last)?;
    let (current, max) = tracker.current_and_max_streak(query)?;
    close_tracker(tracker);

    let has_previous = at_least_one_calendar_month_apart(first, habit.created_date);
    let has_next = at_least_one_calendar_month_apart(today, first);

    if json {
        let report = serde_json::json!({
            "stats": stats,
            "current_streak": current,
            "max_streak": max,
            "has_previous_month": has_previous,
            "has_next_month": has_next,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{}", render::month_calendar(&stats, config.display.week_start));
    print!("{}", render::month_summary(&stats, current, max));
    if has_previous {
        let prev = prev_day(first);
        println!(
            "previous: streakr stats {} -m {} -y {}",
            habit.name,
            prev.month(),
            prev.year()
        );
    }
    if has_next {
        let next = next_day(last);
        println!(
            "next: streakr stats {} -m {} -y {}",
            habit.name,
            next.month(),
            next.year()
        );
    }
    Ok(())
}
