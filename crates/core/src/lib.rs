//! Core business logic for Xpensify.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here. Functions
//! that depend on "now" take it as a parameter.
//!
//! # Modules
//!
//! - `validation` - Amount, text, and date validation for submissions
//! - `period` - Monthly `YYYY-MM` period keys
//! - `week` - Monday-to-Sunday week ranges and the week filter
//! - `expense` - Expense records and submission input
//! - `budget` - Monthly budgets and remaining-budget calculation
//! - `reports` - Daily chart rows, monthly report, export rows

pub mod budget;
pub mod expense;
pub mod period;
pub mod reports;
pub mod validation;
pub mod week;

pub use validation::ValidationError;
