//! Report generation service.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::types::{DailyBucket, ExportRow, MonthlyReport};
use crate::budget::BudgetService;
use crate::expense::ExpenseRecord;
use crate::period::{PeriodKey, filter_by_period};

/// Day label format used on the chart ("27 May").
pub const DAY_LABEL_FORMAT: &str = "%d %b";

/// Date format used in exports ("27 May 2025").
pub const EXPORT_DATE_FORMAT: &str = "%d %b %Y";

/// Service for generating expense reports.
pub struct ReportService;

impl ReportService {
    /// Groups expenses by calendar day.
    ///
    /// Buckets come out in the order their day label is first seen, not in
    /// chronological order. Within a bucket, descriptions keep input order.
    #[must_use]
    pub fn aggregate_daily(expenses: &[ExpenseRecord]) -> Vec<DailyBucket> {
        let mut buckets: Vec<DailyBucket> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for expense in expenses {
            let label = expense.date.format(DAY_LABEL_FORMAT).to_string();
            let slot = *index.entry(label.clone()).or_insert_with(|| {
                buckets.push(DailyBucket {
                    day_label: label,
                    total_amount: Decimal::ZERO,
                    descriptions: Vec::new(),
                });
                buckets.len() - 1
            });

            let bucket = &mut buckets[slot];
            bucket.total_amount += expense.amount;
            bucket.descriptions.push(expense.description.clone());
        }

        buckets
    }

    /// Builds the monthly report for `period`.
    ///
    /// Expenses outside the month are ignored, so callers may pass the
    /// owner's full history.
    #[must_use]
    pub fn monthly_report(
        period: PeriodKey,
        budget: Option<Decimal>,
        expenses: &[ExpenseRecord],
    ) -> MonthlyReport {
        let in_period = filter_by_period(expenses, &period);
        let summary = BudgetService::remaining_budget(budget, &in_period);

        MonthlyReport {
            period,
            budget,
            total_expenses: summary.total_expenses,
            remaining: summary.remaining,
            expense_count: in_period.len(),
            daily: Self::aggregate_daily(&in_period),
        }
    }

    /// Converts expenses into export rows, keeping input order.
    #[must_use]
    pub fn export_rows(expenses: &[ExpenseRecord]) -> Vec<ExportRow> {
        expenses
            .iter()
            .map(|expense| ExportRow {
                date: expense.date.format(EXPORT_DATE_FORMAT).to_string(),
                amount: expense.amount,
                description: expense.description.clone(),
            })
            .collect()
    }
}
