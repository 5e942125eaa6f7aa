//! Expense data types.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use xpensify_shared::types::{ExpenseId, UserId};

use crate::validation::{ValidationError, parse_expense_date, require_text, validate_amount};

/// A recorded expense as seen on its owner's calendar.
///
/// `date` is wall-clock time in the owner's time zone; week ranges, day
/// labels, and month keys are all computed from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Expense ID.
    pub id: ExpenseId,
    /// Owning user.
    pub owner_id: UserId,
    /// Amount spent, always positive.
    pub amount: Decimal,
    /// What the money was spent on.
    pub description: String,
    /// Local date and time of the expense.
    pub date: NaiveDateTime,
}

impl ExpenseRecord {
    /// Builds a record from a stored UTC instant, shifted into `tz`.
    #[must_use]
    pub fn from_utc<Tz: TimeZone>(
        id: ExpenseId,
        owner_id: UserId,
        amount: Decimal,
        description: String,
        date: DateTime<Utc>,
        tz: &Tz,
    ) -> Self {
        Self {
            id,
            owner_id,
            amount,
            description,
            date: date.with_timezone(tz).naive_local(),
        }
    }
}

/// Raw expense submission, straight from a JSON body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateExpenseInput {
    /// Amount as a JSON number or numeric string.
    #[serde(default)]
    pub amount: Option<Value>,
    /// Description text.
    #[serde(default)]
    pub description: Option<String>,
    /// Date string (`YYYY-MM-DD` or RFC 3339).
    #[serde(default)]
    pub date: Option<String>,
}

/// A validated expense, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    /// Positive amount.
    pub amount: Decimal,
    /// Trimmed, non-empty description.
    pub description: String,
    /// Instant of the expense.
    pub date: DateTime<Utc>,
}

impl CreateExpenseInput {
    /// Validates the submission.
    ///
    /// Fields are checked in form order: amount, description, date.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` encountered.
    pub fn validate(&self) -> Result<NewExpense, ValidationError> {
        let amount = validate_amount(self.amount.as_ref())?;
        let description = require_text(self.description.as_deref(), "description")?;
        let date = parse_expense_date(self.date.as_deref())?;

        Ok(NewExpense {
            amount,
            description,
            date,
        })
    }
}
