//! Expense records and submission handling.

pub mod types;

pub use types::{CreateExpenseInput, ExpenseRecord, NewExpense};
