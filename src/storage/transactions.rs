//! Transaction repository for JSON storage
//!
//! Holds the transaction collection in insertion order and persists it to
//! `expenses.json` as a plain JSON array.

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::SpendError;
use crate::models::{Transaction, TransactionId};

use super::file_io::{load_collection, store_collection};

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<Vec<Transaction>>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load transactions from disk, replacing whatever is in memory
    pub fn load(&self) -> Result<(), SpendError> {
        let loaded: Vec<Transaction> = load_collection(&self.path)?;
        debug!(count = loaded.len(), "loaded transactions");

        let mut data = self.write()?;
        *data = loaded;
        Ok(())
    }

    /// Save transactions to disk in insertion order
    pub fn save(&self) -> Result<(), SpendError> {
        let data = self.read()?;
        store_collection(&self.path, &data)
    }

    /// Get a transaction by its full id
    pub fn get(&self, id: &TransactionId) -> Result<Option<Transaction>, SpendError> {
        let data = self.read()?;
        Ok(data.iter().find(|t| &t.id == id).cloned())
    }

    /// Find a transaction by full id or by a unique id prefix
    ///
    /// An ambiguous prefix is a validation error rather than a guess.
    pub fn find(&self, identifier: &str) -> Result<Option<Transaction>, SpendError> {
        let identifier = identifier.trim();
        let data = self.read()?;

        if let Some(txn) = data.iter().find(|t| t.id.as_str() == identifier) {
            return Ok(Some(txn.clone()));
        }

        let mut matches = data.iter().filter(|t| t.id.matches_prefix(identifier));
        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(Some(txn.clone())),
            (Some(_), Some(_)) => Err(SpendError::Validation(format!(
                "Transaction id prefix '{}' is ambiguous",
                identifier
            ))),
            _ => Ok(None),
        }
    }

    /// All transactions, in insertion order
    pub fn get_all(&self) -> Result<Vec<Transaction>, SpendError> {
        Ok(self.read()?.clone())
    }

    /// Append a transaction
    pub fn push(&self, txn: Transaction) -> Result<(), SpendError> {
        self.write()?.push(txn);
        Ok(())
    }

    /// Replace the transaction with the same id in place
    ///
    /// Returns false (and changes nothing) if no transaction has that id.
    pub fn replace(&self, txn: Transaction) -> Result<bool, SpendError> {
        let mut data = self.write()?;
        match data.iter_mut().find(|t| t.id == txn.id) {
            Some(slot) => {
                *slot = txn;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a transaction, returning it if it existed
    pub fn remove(&self, id: &TransactionId) -> Result<Option<Transaction>, SpendError> {
        let mut data = self.write()?;
        Ok(data
            .iter()
            .position(|t| &t.id == id)
            .map(|idx| data.remove(idx)))
    }

    pub fn contains(&self, id: &TransactionId) -> Result<bool, SpendError> {
        Ok(self.read()?.iter().any(|t| &t.id == id))
    }

    pub fn count(&self) -> Result<usize, SpendError> {
        Ok(self.read()?.len())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Transaction>>, SpendError> {
        self.data
            .read()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Transaction>>, SpendError> {
        self.data
            .write()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionInput};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        let repo = TransactionRepository::new(path);
        (temp_dir, repo)
    }

    fn txn(id: &str, cents: i64) -> Transaction {
        Transaction::from_input(
            TransactionId::from(id),
            TransactionInput::expense(
                Money::from_cents(cents),
                "Groceries",
                format!("Item {}", id),
                NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            ),
        )
    }

    #[test]
    fn test_empty_repository() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_push_keeps_insertion_order() {
        let (_temp_dir, repo) = create_test_repo();
        repo.push(txn("c", 100)).unwrap();
        repo.push(txn("a", 200)).unwrap();
        repo.push(txn("b", 300)).unwrap();

        let ids: Vec<_> = repo
            .get_all()
            .unwrap()
            .into_iter()
            .map(|t| t.id.to_string())
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_replace_in_place() {
        let (_temp_dir, repo) = create_test_repo();
        repo.push(txn("a", 100)).unwrap();
        repo.push(txn("b", 200)).unwrap();

        assert!(repo.replace(txn("a", 999)).unwrap());
        let all = repo.get_all().unwrap();
        assert_eq!(all[0].id.as_str(), "a");
        assert_eq!(all[0].amount.cents(), 999);

        assert!(!repo.replace(txn("zzz", 1)).unwrap());
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_remove() {
        let (_temp_dir, repo) = create_test_repo();
        repo.push(txn("a", 100)).unwrap();
        repo.push(txn("b", 200)).unwrap();

        let removed = repo.remove(&TransactionId::from("a")).unwrap();
        assert_eq!(removed.map(|t| t.amount.cents()), Some(100));
        assert!(repo.remove(&TransactionId::from("a")).unwrap().is_none());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_find_by_prefix() {
        let (_temp_dir, repo) = create_test_repo();
        repo.push(txn("abcd-1111", 100)).unwrap();
        repo.push(txn("abcd-2222", 200)).unwrap();
        repo.push(txn("ef01-3333", 300)).unwrap();

        assert_eq!(
            repo.find("ef01").unwrap().map(|t| t.amount.cents()),
            Some(300)
        );
        assert!(repo.find("abcd").unwrap_err().is_validation());
        assert_eq!(
            repo.find("abcd-2222").unwrap().map(|t| t.amount.cents()),
            Some(200)
        );
        assert!(repo.find("9999").unwrap().is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (temp_dir, repo) = create_test_repo();
        repo.push(txn("b", 150)).unwrap();
        repo.push(txn("a", 275)).unwrap();
        repo.save().unwrap();

        let reloaded = TransactionRepository::new(temp_dir.path().join("expenses.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.get_all().unwrap(), repo.get_all().unwrap());
    }
}
