//! Input validation for user-submitted amounts, text, and dates.
//!
//! Request bodies arrive as loosely-typed JSON. Everything in here turns a raw
//! field into a typed value or a [`ValidationError`]; nothing is persisted
//! until these checks pass.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use thiserror::Error;

/// Decimal places kept by the `NUMERIC(19,4)` money columns.
pub const AMOUNT_SCALE: u32 = 4;

/// Smallest amount the money columns cannot hold (10^15).
pub const AMOUNT_LIMIT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Validation errors for submitted expenses and budgets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Amount is missing, not a number, not greater than zero, or does not
    /// fit four decimal places below 10^15.
    #[error("Amount must be a number greater than zero")]
    InvalidAmount,

    /// Date could not be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Required field is absent or blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Month key is not a valid `YYYY-MM` value.
    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidPeriod(String),

    /// Week selector is outside the supported choices.
    #[error("Invalid week filter '{0}', expected 'current' or 0-4")]
    InvalidWeekFilter(String),
}

/// Validates a raw JSON amount.
///
/// Accepts JSON numbers and numeric strings (scientific notation included).
/// The result must fit the money columns: at most four decimal places and
/// below [`AMOUNT_LIMIT`].
///
/// # Errors
///
/// Returns `ValidationError::InvalidAmount` when the value is missing, `null`,
/// non-numeric, not strictly positive, or not storable.
pub fn validate_amount(raw: Option<&Value>) -> Result<Decimal, ValidationError> {
    let parsed = match raw {
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_decimal(s.trim()),
        _ => None,
    };

    parsed
        .ok_or(ValidationError::InvalidAmount)
        .and_then(ensure_positive)
        .and_then(ensure_storable)
}

/// Checks that an already-typed amount is strictly positive.
///
/// # Errors
///
/// Returns `ValidationError::InvalidAmount` for zero or negative amounts.
pub fn ensure_positive(amount: Decimal) -> Result<Decimal, ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::InvalidAmount);
    }
    Ok(amount)
}

/// Checks that an amount fits `NUMERIC(19,4)` without rounding.
///
/// # Errors
///
/// Returns `ValidationError::InvalidAmount` for more than four decimal places
/// or for amounts of [`AMOUNT_LIMIT`] and above.
pub fn ensure_storable(amount: Decimal) -> Result<Decimal, ValidationError> {
    if amount.normalize().scale() > AMOUNT_SCALE || amount.abs() >= AMOUNT_LIMIT {
        return Err(ValidationError::InvalidAmount);
    }
    Ok(amount)
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    // Decimal::from_str tolerates digit separators
    if s.is_empty() || s.contains('_') {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Returns the trimmed text of a required field.
///
/// # Errors
///
/// Returns `ValidationError::MissingField` when the field is absent or blank.
pub fn require_text(raw: Option<&str>, field: &'static str) -> Result<String, ValidationError> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .ok_or(ValidationError::MissingField(field))
}

/// Parses the date of a submitted expense into a UTC instant.
///
/// Accepted forms:
/// - RFC 3339 (`2025-05-27T10:30:00+05:30`)
/// - naive date-time (`2025-05-27T10:30:00`, `2025-05-27T10:30`), read as UTC
/// - date only (`2025-05-27`), read as UTC midnight
///
/// # Errors
///
/// Returns `ValidationError::MissingField("date")` for an absent or blank
/// value and `ValidationError::InvalidDate` for anything unparsable.
pub fn parse_expense_date(raw: Option<&str>) -> Result<DateTime<Utc>, ValidationError> {
    let raw = require_text(raw, "date")?;

    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&raw, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| ValidationError::InvalidDate(raw))
}
