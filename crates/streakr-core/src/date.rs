//! Calendar-date arithmetic.
//!
//! Everything here works on [`NaiveDate`]: time of day and time zone never
//! enter the streak math. Ordering follows `std::cmp::Ordering`, so an
//! earlier date compares `Less` than a later one.

use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate};

/// Storage and display format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn is_same_date(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}

/// Whole calendar days from `older` to `newer`. Negative when `newer`
/// precedes `older`.
pub fn day_diff(older: NaiveDate, newer: NaiveDate) -> i64 {
    newer.signed_duration_since(older).num_days()
}

pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(NaiveDate::MAX)
}

pub fn prev_day(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(NaiveDate::MIN)
}

pub fn compare_date(a: NaiveDate, b: NaiveDate) -> Ordering {
    a.cmp(&b)
}

/// True when `later` lies in a strictly later month-year than `earlier`.
///
/// Used to gate navigation: a previous month exists when the viewed month is
/// at least one calendar month after the habit's creation, a next month
/// exists when today is at least one calendar month after the viewed month.
pub fn at_least_one_calendar_month_apart(later: NaiveDate, earlier: NaiveDate) -> bool {
    if compare_date(later, earlier) != Ordering::Greater {
        return false;
    }
    (later.year(), later.month()) != (earlier.year(), earlier.month())
}

/// First and last day of the given month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, prev_day(next_first)))
}

/// Inclusive iterator over `[start, end]`. Empty when `end < start`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Parse a month given as `1..=12`, a full English name or a three-letter
/// abbreviation.
pub fn parse_month(s: &str) -> Option<u32> {
    let s = s.trim().to_ascii_lowercase();
    if let Ok(n) = s.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }
    const NAMES: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    NAMES
        .iter()
        .position(|name| *name == s || (s.len() == 3 && name.starts_with(s.as_str())))
        .map(|idx| idx as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn day_diff_is_signed_and_zero_for_same_day() {
        assert_eq!(day_diff(d(2025, 11, 1), d(2025, 11, 1)), 0);
        assert_eq!(day_diff(d(2025, 11, 1), d(2025, 11, 30)), 29);
        assert_eq!(day_diff(d(2025, 11, 30), d(2025, 11, 1)), -29);
        assert_eq!(day_diff(d(2024, 12, 31), d(2025, 1, 1)), 1);
    }

    #[test]
    fn next_and_prev_cross_month_and_leap_day() {
        assert_eq!(next_day(d(2024, 2, 28)), d(2024, 2, 29));
        assert_eq!(next_day(d(2024, 2, 29)), d(2024, 3, 1));
        assert_eq!(prev_day(d(2025, 1, 1)), d(2024, 12, 31));
    }

    #[test]
    fn compare_uses_earlier_is_less() {
        assert_eq!(compare_date(d(2025, 1, 1), d(2025, 1, 2)), Ordering::Less);
        assert_eq!(compare_date(d(2025, 1, 2), d(2025, 1, 1)), Ordering::Greater);
        assert_eq!(compare_date(d(2025, 1, 2), d(2025, 1, 2)), Ordering::Equal);
        assert!(is_same_date(d(2025, 1, 2), d(2025, 1, 2)));
    }

    #[test]
    fn month_apart_requires_later_month_year() {
        // same month, later day
        assert!(!at_least_one_calendar_month_apart(d(2025, 3, 31), d(2025, 3, 1)));
        // next month, even by a single day
        assert!(at_least_one_calendar_month_apart(d(2025, 4, 1), d(2025, 3, 31)));
        // earlier never counts
        assert!(!at_least_one_calendar_month_apart(d(2025, 2, 1), d(2025, 3, 1)));
        // same month number in a later year
        assert!(at_least_one_calendar_month_apart(d(2026, 3, 1), d(2025, 3, 15)));
    }

    #[test]
    fn month_bounds_handles_december_and_february() {
        assert_eq!(month_bounds(2025, 12), Some((d(2025, 12, 1), d(2025, 12, 31))));
        assert_eq!(month_bounds(2024, 2), Some((d(2024, 2, 1), d(2024, 2, 29))));
        assert_eq!(month_bounds(2025, 13), None);
    }

    #[test]
    fn days_between_is_inclusive() {
        let days: Vec<_> = days_between(d(2025, 1, 30), d(2025, 2, 2)).collect();
        assert_eq!(days.len(), 4);
        assert_eq!(days[3], d(2025, 2, 2));
        assert_eq!(days_between(d(2025, 2, 2), d(2025, 2, 1)).count(), 0);
    }

    #[test]
    fn parse_month_accepts_numbers_names_and_abbreviations() {
        assert_eq!(parse_month("3"), Some(3));
        assert_eq!(parse_month("September"), Some(9));
        assert_eq!(parse_month("dec"), Some(12));
        assert_eq!(parse_month("0"), None);
        assert_eq!(parse_month("ju"), None);
        assert_eq!(parse_month("smarch"), None);
    }

    #[test]
    fn storage_format_round_trips() {
        assert_eq!(format_date(d(2025, 7, 4)), "2025-07-04");
        assert_eq!(parse_date("2025-07-04"), Some(d(2025, 7, 4)));
        assert_eq!(parse_date("07/04/2025"), None);
    }
}
