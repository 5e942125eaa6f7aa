//! Expense reports.
//!
//! This module provides pure business logic for the reports view:
//! - Daily chart rows
//! - Monthly summary against the budget
//! - Spreadsheet export rows

pub mod service;
pub mod types;


pub use service::ReportService;
pub use types::*;
