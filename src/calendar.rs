// 📅 Calendar - Month boundary arithmetic
// Last day of a month and first Sunday of a month, nothing more.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use std::fmt;

// ============================================================================
// MONTH BOUNDARIES
// ============================================================================

/// Last calendar day of `year-month`.
///
/// Day 28 exists in every month; four days later is always in the next
/// month, and stepping back by that date's day-of-month lands on the last
/// day of the original month. Leap years fall out for free.
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let day_28 = NaiveDate::from_ymd_opt(year, month, 28)?;
    let next_month = day_28.checked_add_days(Days::new(4))?;
    next_month.checked_sub_days(Days::new(next_month.day() as u64))
}

/// Day-of-month of the first Sunday, always in `[1, 7]`.
pub fn first_sunday(first_of_month: NaiveDate) -> u32 {
    1 + (6 - first_of_month.weekday().num_days_from_monday())
}

// ============================================================================
// YEAR-MONTH KEY
// ============================================================================

/// A validated `YYYY-MM` ledger key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Build from numeric parts. `None` when the month does not exist
    /// or its last day falls outside chrono's date range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)?;
        last_day_of_month(year, month)?;
        Some(YearMonth { year, month })
    }

    /// Parse a `YYYY-MM` key: exactly two integer fields separated by `-`.
    pub fn parse(key: &str) -> Option<Self> {
        let (year, month) = key.split_once('-')?;
        if month.contains('-') {
            return None;
        }

        let year: i32 = year.trim().parse().ok()?;
        let month: u32 = month.trim().parse().ok()?;
        YearMonth::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // Checked in `new`
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last valid day-of-month (28..=31)
    pub fn last_day(&self) -> u32 {
        last_day_of_month(self.year, self.month)
            .map(|d| d.day())
            .unwrap_or(28)
    }

    /// Day-of-month of the first Sunday
    pub fn first_sunday(&self) -> u32 {
        first_sunday(self.first_day())
    }

    pub fn first_sunday_date(&self) -> NaiveDate {
        self.first_day()
            .with_day(self.first_sunday())
            .unwrap_or_else(|| self.first_day())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ============================================================================
// TESTS
// ============================================================================
