//! Storage layer for spendlog
//!
//! The persistence adapter: loads the transaction and budget collections
//! from JSON files under the data directory and writes them back with atomic
//! renames. A missing file is an empty collection.
//!
//! Budget `spent` on disk is only a cache. Loading re-derives it from the
//! loaded transactions, so a budgets file left stale by an earlier failed
//! write is corrected before anything reads it.
//!
//! In-memory state is authoritative. The `persist_*` helpers are
//! best-effort: a failed write is logged and never undoes or blocks the
//! mutation that triggered it.

pub mod budget;
pub mod file_io;
pub mod transactions;

pub use budget::BudgetRepository;
pub use file_io::{load_collection, store_collection};
pub use transactions::TransactionRepository;

use tracing::{info, warn};

use crate::config::paths::SpendPaths;
use crate::error::SpendError;
use crate::models::derive_spent;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: SpendPaths,
    pub transactions: TransactionRepository,
    pub budgets: BudgetRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: SpendPaths) -> Result<Self, SpendError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &SpendPaths {
        &self.paths
    }

    /// Load all data from disk and bring budget spend up to date
    pub fn load_all(&mut self) -> Result<(), SpendError> {
        self.transactions.load()?;
        self.budgets.load()?;
        self.refresh_budget_spend()
    }

    fn refresh_budget_spend(&self) -> Result<(), SpendError> {
        let transactions = self.transactions.get_all()?;
        let budgets = self.budgets.get_all()?;

        if let Some(updated) = derive_spent(&transactions, &budgets).into_changed() {
            info!(budgets = updated.len(), "stored budget spend was stale, re-derived");
            self.budgets.replace_all(updated)?;
            self.persist_budgets();
        }
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), SpendError> {
        self.transactions.save()?;
        self.budgets.save()?;
        Ok(())
    }

    /// Write the transaction collection, logging instead of failing
    pub fn persist_transactions(&self) {
        if let Err(e) = self.transactions.save() {
            warn!(error = %e, "failed to persist transactions");
        }
    }

    /// Write the budget collection, logging instead of failing
    pub fn persist_budgets(&self) {
        if let Err(e) = self.budgets.save() {
            warn!(error = %e, "failed to persist budgets");
        }
    }
}
