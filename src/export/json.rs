//! JSON snapshot export
//!
//! Dumps both collections plus some metadata under a schema version, and
//! reads such a snapshot back with integrity checks.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SpendError, SpendResult};
use crate::models::{derive_spent, Budget, Money, Transaction, TransactionKind};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full snapshot of the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// All transactions, in insertion order
    pub transactions: Vec<Transaction>,

    /// All budgets, with derived spend
    pub budgets: Vec<Budget>,

    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub budget_count: usize,
    pub total_income: Money,
    pub total_expenses: Money,

    /// Earliest transaction date
    pub earliest_transaction: Option<String>,

    /// Latest transaction date
    pub latest_transaction: Option<String>,
}

impl FullExport {
    /// Create a snapshot from the current store contents
    pub fn from_storage(storage: &Storage) -> SpendResult<Self> {
        let transactions = storage.transactions.get_all()?;
        let budgets = storage.budgets.get_all()?;
        Ok(Self::new(transactions, budgets))
    }

    pub fn new(transactions: Vec<Transaction>, budgets: Vec<Budget>) -> Self {
        let sum = |kind: TransactionKind| -> Money {
            transactions
                .iter()
                .filter(|t| t.kind == kind)
                .map(|t| t.amount)
                .sum()
        };

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            budget_count: budgets.len(),
            total_income: sum(TransactionKind::Income),
            total_expenses: sum(TransactionKind::Expense),
            earliest_transaction: transactions.iter().map(|t| t.date).min().map(|d| d.to_string()),
            latest_transaction: transactions.iter().map(|t| t.date).max().map(|d| d.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions,
            budgets,
            metadata,
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let mut ids = HashSet::new();
        for txn in &self.transactions {
            if !ids.insert(&txn.id) {
                return Err(format!("Duplicate transaction id {}", txn.id));
            }
            txn.to_input()
                .validate()
                .map_err(|e| format!("Transaction {}: {}", txn.id, e))?;
        }

        let mut categories = HashSet::new();
        for budget in &self.budgets {
            if !categories.insert(budget.category()) {
                return Err(format!("Duplicate budget for category {}", budget.category()));
            }
            if !TransactionKind::Expense.is_valid_category(budget.category()) {
                return Err(format!(
                    "Budget category {} is not an expense category",
                    budget.category()
                ));
            }
        }

        if derive_spent(&self.transactions, &self.budgets).changed {
            return Err("Budget spend does not match the transactions".to_string());
        }

        Ok(())
    }
}

/// Export the full store to JSON
pub fn export_full_json<W: Write + ?Sized>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> SpendResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| SpendError::Export(e.to_string()))?;

    Ok(())
}

/// Read a JSON snapshot back, rejecting inconsistent ones
pub fn import_from_json(json_str: &str) -> SpendResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| SpendError::Import(e.to_string()))?;

    export.validate().map_err(SpendError::Import)?;

    Ok(export)
}
