//! Budget data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use xpensify_shared::types::{BudgetId, UserId};

use crate::period::PeriodKey;
use crate::validation::{ValidationError, require_text, validate_amount};

/// A monthly budget record.
///
/// There is at most one per owner and period; saving again overwrites the amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRecord {
    /// Budget ID.
    pub id: BudgetId,
    /// Owning user.
    pub owner_id: UserId,
    /// Month the budget applies to.
    pub period_key: PeriodKey,
    /// Budgeted amount, always positive.
    pub amount: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Raw budget submission, straight from a JSON body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetBudgetInput {
    /// Amount as a JSON number or numeric string.
    #[serde(default)]
    pub amount: Option<Value>,
    /// Month key, `YYYY-MM`.
    #[serde(default)]
    pub month: Option<String>,
}

/// A validated budget, ready to be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewBudget {
    /// Month the budget applies to.
    pub period_key: PeriodKey,
    /// Positive amount.
    pub amount: Decimal,
}

impl SetBudgetInput {
    /// Validates the submission.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount`, `MissingField("month")`, or `InvalidPeriod`.
    pub fn validate(&self) -> Result<NewBudget, ValidationError> {
        let amount = validate_amount(self.amount.as_ref())?;
        let period_key = require_text(self.month.as_deref(), "month")?.parse()?;

        Ok(NewBudget { period_key, amount })
    }
}

/// Spending against a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSummary {
    /// Sum of all expense amounts considered.
    pub total_expenses: Decimal,
    /// Budget minus spending; negative when overspent.
    pub remaining: Decimal,
}
