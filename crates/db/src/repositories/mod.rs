//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod budget;
pub mod expense;
pub mod user;

pub use budget::{BudgetRepository, UpsertOutcome};
pub use expense::ExpenseRepository;
pub use user::UserRepository;
