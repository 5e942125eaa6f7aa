//! Report data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::period::PeriodKey;

/// Chart row: everything spent on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBucket {
    /// Day label, e.g. "27 May".
    pub day_label: String,
    /// Sum of the day's expense amounts.
    pub total_amount: Decimal,
    /// Descriptions in the order the expenses were seen.
    pub descriptions: Vec<String>,
}

/// Monthly report shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    /// Month covered.
    pub period: PeriodKey,
    /// Budget amount, if one was set for the month.
    pub budget: Option<Decimal>,
    /// Sum of the month's expenses.
    pub total_expenses: Decimal,
    /// Budget minus spending.
    pub remaining: Decimal,
    /// Number of expenses in the month.
    pub expense_count: usize,
    /// Daily chart rows.
    pub daily: Vec<DailyBucket>,
}

/// One line of the expense export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    /// Formatted date, e.g. "27 May 2025".
    #[serde(rename = "Date")]
    pub date: String,
    /// Amount spent.
    #[serde(rename = "Amount")]
    pub amount: Decimal,
    /// Description.
    #[serde(rename = "Description")]
    pub description: String,
}
