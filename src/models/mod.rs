//! Core data models for spendlog
//!
//! This module contains the data structures of the tracking domain:
//! transactions, budgets, money and the fixed category sets, plus the pure
//! budget derivation that keeps budget spend in step with the transaction log.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;

pub use budget::{derive_spent, Budget, BudgetDerivation, BudgetStatus};
pub use category::{
    find_category, TransactionKind, EXPENSE_CATEGORIES, INCOME_CATEGORIES, INVESTMENT_CATEGORY,
};
pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use transaction::{Transaction, TransactionInput, TransactionValidationError};
