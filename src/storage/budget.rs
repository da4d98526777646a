//! Budget repository for JSON storage
//!
//! Holds at most one budget per category, in creation order, and persists
//! the collection to `budgets.json` as a plain JSON array.

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::SpendError;
use crate::models::{Budget, Money};

use super::file_io::{load_collection, store_collection};

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<Vec<Budget>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(Vec::new()),
        }
    }

    /// Load budgets from disk
    ///
    /// Should the file hold two budgets for one category, the first one wins.
    pub fn load(&self) -> Result<(), SpendError> {
        let loaded: Vec<Budget> = load_collection(&self.path)?;
        let mut unique: Vec<Budget> = Vec::with_capacity(loaded.len());
        for budget in loaded {
            if unique.iter().any(|b| b.category() == budget.category()) {
                debug!(category = budget.category(), "dropping duplicate budget");
                continue;
            }
            unique.push(budget);
        }
        debug!(count = unique.len(), "loaded budgets");

        *self.write()? = unique;
        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), SpendError> {
        let budgets = self.read()?;
        store_collection(&self.path, &budgets)
    }

    /// Get the budget for a category
    pub fn get(&self, category: &str) -> Result<Option<Budget>, SpendError> {
        Ok(self
            .read()?
            .iter()
            .find(|b| b.category() == category)
            .cloned())
    }

    /// All budgets, in creation order
    pub fn get_all(&self) -> Result<Vec<Budget>, SpendError> {
        Ok(self.read()?.clone())
    }

    /// Set a category's limit, creating the budget if needed
    ///
    /// A new budget starts with nothing spent; an existing one keeps its
    /// `spent` until the next derivation pass.
    pub fn set_limit(&self, category: &str, limit: Money) -> Result<Budget, SpendError> {
        let mut budgets = self.write()?;
        if let Some(existing) = budgets.iter_mut().find(|b| b.category() == category) {
            existing.set_limit(limit)?;
            return Ok(existing.clone());
        }

        let budget = Budget::new(category, limit)?;
        budgets.push(budget.clone());
        Ok(budget)
    }

    /// Replace the whole collection (used to install a derivation result)
    pub fn replace_all(&self, budgets: Vec<Budget>) -> Result<(), SpendError> {
        *self.write()? = budgets;
        Ok(())
    }

    pub fn count(&self) -> Result<usize, SpendError> {
        Ok(self.read()?.len())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Budget>>, SpendError> {
        self.budgets
            .read()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Budget>>, SpendError> {
        self.budgets
            .write()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}
