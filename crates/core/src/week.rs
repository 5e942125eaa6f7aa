//! Monday-to-Sunday week windows and the expense filter built on them.

use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::expense::ExpenseRecord;
use crate::validation::ValidationError;

/// Largest `weeks_back` value offered to users.
pub const MAX_WEEKS_BACK: u32 = 4;

/// An inclusive Monday 00:00:00.000 to Sunday 23:59:59.999 window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRange {
    /// Monday at midnight.
    pub start: NaiveDateTime,
    /// Sunday at the last millisecond of the day.
    pub end: NaiveDateTime,
}

impl WeekRange {
    /// Returns true if `instant` lies within the window, bounds included.
    #[must_use]
    pub fn contains(&self, instant: &NaiveDateTime) -> bool {
        self.start <= *instant && *instant <= self.end
    }
}

/// Computes the week `weeks_back` weeks before the one containing `reference`.
///
/// `weeks_back = 0` is the current week. Windows that would leave the
/// representable date range saturate at its first or last millisecond.
#[must_use]
pub fn week_range(reference: NaiveDateTime, weeks_back: u32) -> WeekRange {
    let days_to_monday = u64::from(reference.weekday().num_days_from_monday());
    let offset = Days::new(days_to_monday + 7 * u64::from(weeks_back));

    let monday = reference
        .date()
        .checked_sub_days(offset)
        .unwrap_or(NaiveDate::MIN);
    let start = monday.and_time(NaiveTime::MIN);
    let end = start
        .checked_add_signed(TimeDelta::days(7) - TimeDelta::milliseconds(1))
        .or_else(|| NaiveDate::MAX.and_hms_milli_opt(23, 59, 59, 999))
        .unwrap_or(NaiveDateTime::MAX);

    WeekRange { start, end }
}

/// Keeps the expenses dated inside `range`, preserving input order.
#[must_use]
pub fn filter_by_week(expenses: &[ExpenseRecord], range: &WeekRange) -> Vec<ExpenseRecord> {
    expenses
        .iter()
        .filter(|expense| range.contains(&expense.date))
        .cloned()
        .collect()
}

/// A user-facing week selection: `current` or 0 to [`MAX_WEEKS_BACK`] weeks ago.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeekFilter(u32);

impl WeekFilter {
    /// The current week.
    pub const CURRENT: Self = Self(0);

    /// Creates a filter, rejecting offsets beyond [`MAX_WEEKS_BACK`].
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidWeekFilter` for out-of-range offsets.
    pub fn new(weeks_back: u32) -> Result<Self, ValidationError> {
        if weeks_back > MAX_WEEKS_BACK {
            return Err(ValidationError::InvalidWeekFilter(weeks_back.to_string()));
        }
        Ok(Self(weeks_back))
    }

    /// Number of whole weeks before the current one.
    #[must_use]
    pub const fn weeks_back(self) -> u32 {
        self.0
    }

    /// Display label for the selection.
    #[must_use]
    pub fn label(self) -> String {
        match self.0 {
            0 => "This Week".to_string(),
            1 => "Last Week".to_string(),
            n => format!("{n} Weeks Ago"),
        }
    }

    /// Resolves the selection against a reference instant.
    #[must_use]
    pub fn range(self, reference: NaiveDateTime) -> WeekRange {
        week_range(reference, self.0)
    }
}

impl FromStr for WeekFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("current") {
            return Ok(Self::CURRENT);
        }
        s.parse::<u32>()
            .map_err(|_| ValidationError::InvalidWeekFilter(s.to_string()))
            .and_then(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::ExpenseRecord;
    use chrono::Weekday;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use xpensify_shared::types::{ExpenseId, UserId};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn expense(date: NaiveDateTime, description: &str) -> ExpenseRecord {
        ExpenseRecord {
            id: ExpenseId::new(),
            owner_id: UserId::new(),
            amount: dec!(10),
            description: description.to_string(),
            date,
        }
    }

    #[test]
    fn test_wednesday_current_week() {
        // 2025-05-28 is a Wednesday.
        let range = week_range(at(2025, 5, 28, 15, 30), 0);

        assert_eq!(range.start, at(2025, 5, 26, 0, 0));
        assert_eq!(
            range.end,
            NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_milli_opt(23, 59, 59, 999)
                .unwrap()
        );
    }

    #[rstest]
    #[case(at(2025, 5, 26, 0, 0))]
    #[case(at(2025, 6, 1, 23, 59))]
    #[case(at(2025, 5, 29, 8, 0))]
    fn test_every_day_of_week_maps_to_same_monday(#[case] reference: NaiveDateTime) {
        assert_eq!(week_range(reference, 0).start, at(2025, 5, 26, 0, 0));
    }

    #[test]
    fn test_weeks_back_steps_whole_weeks() {
        let reference = at(2025, 5, 28, 12, 0);
        assert_eq!(week_range(reference, 1).start, at(2025, 5, 19, 0, 0));
        assert_eq!(week_range(reference, 4).start, at(2025, 4, 28, 0, 0));
    }

    #[test]
    fn test_huge_offset_saturates() {
        let range = week_range(at(2025, 5, 28, 12, 0), u32::MAX);
        assert_eq!(range.start.date(), NaiveDate::MIN);
    }

    #[test]
    fn test_last_representable_week_saturates() {
        let reference = NaiveDate::MAX.and_hms_opt(12, 0, 0).unwrap();
        let range = week_range(reference, 0);

        assert!(range.contains(&reference));
        assert_eq!(range.start.weekday(), Weekday::Mon);
        assert_eq!(
            range.end,
            NaiveDate::MAX.and_hms_milli_opt(23, 59, 59, 999).unwrap()
        );
    }

    #[test]
    fn test_filter_keeps_bounds_and_order() {
        let range = week_range(at(2025, 5, 28, 12, 0), 0);
        let expenses = vec![
            expense(at(2025, 5, 30, 9, 0), "friday"),
            expense(at(2025, 5, 25, 23, 59), "previous sunday"),
            expense(range.start, "monday midnight"),
            expense(range.end, "sunday end"),
            expense(at(2025, 6, 2, 0, 0), "next monday"),
        ];

        let kept: Vec<_> = filter_by_week(&expenses, &range)
            .into_iter()
            .map(|e| e.description)
            .collect();

        assert_eq!(kept, vec!["friday", "monday midnight", "sunday end"]);
    }

    #[test]
    fn test_filter_empty_when_nothing_matches() {
        let range = week_range(at(2025, 5, 28, 12, 0), 3);
        let expenses = vec![expense(at(2025, 5, 28, 9, 0), "today")];
        assert!(filter_by_week(&expenses, &range).is_empty());
    }

    #[rstest]
    #[case("current", 0)]
    #[case("CURRENT", 0)]
    #[case("0", 0)]
    #[case("1", 1)]
    #[case(" 4 ", 4)]
    fn test_week_filter_parse(#[case] input: &str, #[case] weeks_back: u32) {
        assert_eq!(input.parse::<WeekFilter>().unwrap().weeks_back(), weeks_back);
    }

    #[rstest]
    #[case("5")]
    #[case("-1")]
    #[case("last")]
    #[case("")]
    fn test_week_filter_rejects(#[case] input: &str) {
        assert!(matches!(
            input.parse::<WeekFilter>(),
            Err(ValidationError::InvalidWeekFilter(_))
        ));
    }

    #[test]
    fn test_week_filter_labels() {
        assert_eq!(WeekFilter::CURRENT.label(), "This Week");
        assert_eq!(WeekFilter::new(1).unwrap().label(), "Last Week");
        assert_eq!(WeekFilter::new(3).unwrap().label(), "3 Weeks Ago");
    }

    proptest! {
        /// The window always spans exactly 6 days 23:59:59.999, starting on a Monday,
        /// and each extra week back moves the start by exactly seven days.
        #[test]
        fn prop_week_range_shape(
            days in 0i64..40_000,
            seconds in 0i64..86_400,
            weeks_back in 0u32..60,
        ) {
            let reference = at(1970, 1, 1, 0, 0)
                + TimeDelta::days(days)
                + TimeDelta::seconds(seconds);

            let range = week_range(reference, weeks_back);
            let previous = week_range(reference, weeks_back + 1);

            prop_assert_eq!(range.start.weekday(), Weekday::Mon);
            prop_assert_eq!(range.start.time(), NaiveTime::MIN);
            prop_assert_eq!(
                range.end - range.start,
                TimeDelta::days(7) - TimeDelta::milliseconds(1)
            );
            prop_assert_eq!(previous.start, range.start - TimeDelta::days(7));
            if weeks_back == 0 {
                prop_assert!(range.contains(&reference));
            }
        }

        /// Filtering twice by the same range changes nothing.
        #[test]
        fn prop_filter_is_idempotent(offsets in proptest::collection::vec(0i64..30, 0..20)) {
            let base = at(2025, 5, 12, 10, 0);
            let expenses: Vec<_> = offsets
                .iter()
                .map(|d| expense(base + TimeDelta::days(*d), "x"))
                .collect();
            let range = week_range(at(2025, 5, 21, 0, 0), 0);

            let once = filter_by_week(&expenses, &range);
            let twice = filter_by_week(&once, &range);
            prop_assert_eq!(once, twice);
        }
    }
}
