//! Monthly budgets and remaining-budget calculation.

pub mod service;
pub mod types;


pub use service::BudgetService;
pub use types::{BudgetRecord, BudgetSummary, NewBudget, SetBudgetInput};
