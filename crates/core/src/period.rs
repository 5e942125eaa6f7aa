//! Monthly period keys.
//!
//! Budgets are grouped by calendar month. A [`PeriodKey`] is the canonical
//! `YYYY-MM` form of that month.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::expense::ExpenseRecord;
use crate::validation::ValidationError;

/// A calendar month, displayed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeriodKey {
    first_day: NaiveDate,
}

/// Earliest month with a four-digit key (`0000-01`).
pub const EARLIEST_MONTH: NaiveDate = match NaiveDate::from_ymd_opt(0, 1, 1) {
    Some(day) => day,
    None => NaiveDate::MIN,
};

/// Latest month with a four-digit key (`9999-12`).
pub const LATEST_MONTH: NaiveDate = match NaiveDate::from_ymd_opt(9999, 12, 1) {
    Some(day) => day,
    None => NaiveDate::MAX,
};

/// Derives the period key of the month containing `date`.
///
/// Dates outside years 0000 to 9999 clamp to the nearest keyable month.
#[must_use]
pub fn format_period_key(date: NaiveDate) -> PeriodKey {
    let first_day = date - Days::new(u64::from(date.day0()));
    PeriodKey {
        first_day: first_day.clamp(EARLIEST_MONTH, LATEST_MONTH),
    }
}

impl PeriodKey {
    /// Calendar year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// Calendar month, 1-indexed.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// First day of the month.
    #[must_use]
    pub const fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Inclusive bounds of the month: the first instant and the last millisecond.
    #[must_use]
    pub fn bounds(&self) -> (NaiveDateTime, NaiveDateTime) {
        let start = self.first_day.and_time(NaiveTime::MIN);
        let next = (self.first_day + Months::new(1)).and_time(NaiveTime::MIN);
        (start, next - TimeDelta::milliseconds(1))
    }

    /// Returns true if the wall-clock instant falls inside this month.
    #[must_use]
    pub fn contains(&self, instant: &NaiveDateTime) -> bool {
        instant.year() == self.year() && instant.month() == self.month()
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for PeriodKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidPeriod(s.to_string());

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4
            || month.len() != 2
            || !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for PeriodKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PeriodKey> for String {
    fn from(key: PeriodKey) -> Self {
        key.to_string()
    }
}

/// Keeps the expenses whose date falls inside `period`, in input order.
#[must_use]
pub fn filter_by_period(expenses: &[ExpenseRecord], period: &PeriodKey) -> Vec<ExpenseRecord> {
    expenses
        .iter()
        .filter(|expense| period.contains(&expense.date))
        .cloned()
        .collect()
}
