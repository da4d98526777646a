//! Display formatting for terminal output
//!
//! Tables and detail views for transactions, budgets and investments.

pub mod budget;
pub mod format;
pub mod investment;
pub mod transaction;

pub use budget::{
    format_available_categories, format_budget_advisory, format_budget_alert,
    format_budget_overview,
};
pub use investment::format_investment_report;
pub use transaction::{format_transaction_details, format_transaction_table};
