//! Service layer for spendlog
//!
//! The service layer provides business logic on top of the storage layer:
//! validation, keeping derived budget spend current, and batch operations.

pub mod budget;
pub mod import;
pub mod transaction;

pub use budget::{BudgetAdvisory, BudgetAlert, BudgetLine, BudgetOverview, BudgetService, BudgetSetOutcome};
pub use import::{ImportResult, ImportService};
pub use transaction::{LedgerRange, TransactionFilter, TransactionService};
