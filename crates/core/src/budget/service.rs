//! Budget service for remaining-budget calculation.

use rust_decimal::Decimal;

use super::types::BudgetSummary;
use crate::expense::ExpenseRecord;

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Calculates total spending and what is left of the budget.
    ///
    /// Every expense passed in counts; callers narrow the list to the budget's
    /// month beforehand. A missing budget counts as zero, so the remainder is
    /// then the negative of total spending.
    #[must_use]
    pub fn remaining_budget(budget: Option<Decimal>, expenses: &[ExpenseRecord]) -> BudgetSummary {
        let total_expenses: Decimal = expenses.iter().map(|e| e.amount).sum();

        BudgetSummary {
            total_expenses,
            remaining: budget.unwrap_or(Decimal::ZERO) - total_expenses,
        }
    }
}
