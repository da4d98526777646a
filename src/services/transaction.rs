//! Transaction service
//!
//! The transaction store operations: add, update, delete and query. Every
//! successful mutation persists the log and re-runs the budget derivation.

use chrono::{Days, Months, NaiveDate};
use clap::ValueEnum;
use tracing::debug;

use crate::error::{SpendError, SpendResult};
use crate::models::{Transaction, TransactionId, TransactionInput, TransactionKind};
use crate::services::BudgetService;
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Relative date windows for browsing the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LedgerRange {
    Today,
    Week,
    Month,
    #[value(name = "3months")]
    ThreeMonths,
    #[default]
    All,
}

impl LedgerRange {
    /// Earliest date included, or `None` for no lower bound
    pub fn cutoff(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Today => Some(today),
            Self::Week => today.checked_sub_days(Days::new(7)),
            Self::Month => today.checked_sub_months(Months::new(1)),
            Self::ThreeMonths => today.checked_sub_months(Months::new(3)),
            Self::All => None,
        }
    }
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Case-insensitive match against description or category
    pub search: Option<String>,
    /// Exact category
    pub category: Option<String>,
    pub kind: Option<TransactionKind>,
    pub range: LedgerRange,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn range(mut self, range: LedgerRange) -> Self {
        self.range = range;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, txn: &Transaction, cutoff: Option<NaiveDate>) -> bool {
        if let Some(ref term) = self.search {
            let term = term.to_lowercase();
            if !txn.description.to_lowercase().contains(&term)
                && !txn.category.to_lowercase().contains(&term)
            {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if &txn.category != category {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }
        if let Some(cutoff) = cutoff {
            if txn.date < cutoff {
                return false;
            }
        }
        true
    }

    /// Apply the filter, returning matches newest first
    ///
    /// Transactions sharing a date keep their insertion order.
    pub fn apply(&self, transactions: Vec<Transaction>, today: NaiveDate) -> Vec<Transaction> {
        let cutoff = self.range.cutoff(today);
        let mut matched: Vec<Transaction> = transactions
            .into_iter()
            .filter(|t| self.matches(t, cutoff))
            .collect();
        matched.sort_by(|a, b| b.date.cmp(&a.date));

        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }
        matched
    }
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new transaction under a freshly generated id
    pub fn add(&self, input: TransactionInput) -> SpendResult<Transaction> {
        let txn = self.build(input)?;
        self.storage.transactions.push(txn.clone())?;
        debug!(id = %txn.id, kind = %txn.kind, "added transaction");

        self.after_mutation()?;
        Ok(txn)
    }

    /// Record several transactions with a single persist and derivation pass
    ///
    /// Every input is validated before anything is stored.
    pub fn add_many(&self, inputs: Vec<TransactionInput>) -> SpendResult<Vec<Transaction>> {
        let mut built = Vec::with_capacity(inputs.len());
        for input in inputs {
            built.push(self.build(input)?);
        }
        if built.is_empty() {
            return Ok(built);
        }

        for txn in &built {
            self.storage.transactions.push(txn.clone())?;
        }
        debug!(count = built.len(), "added transactions");

        self.after_mutation()?;
        Ok(built)
    }

    /// Replace every field except the id of an existing transaction
    ///
    /// The transaction keeps its position in the log.
    pub fn update(&self, id: &TransactionId, input: TransactionInput) -> SpendResult<Transaction> {
        let input = Self::validated(input)?;
        let txn = Transaction::from_input(id.clone(), input);

        if !self.storage.transactions.replace(txn.clone())? {
            return Err(SpendError::transaction_not_found(id.as_str()));
        }
        debug!(id = %txn.id, "updated transaction");

        self.after_mutation()?;
        Ok(txn)
    }

    /// Remove a transaction, returning what was removed
    pub fn delete(&self, id: &TransactionId) -> SpendResult<Transaction> {
        let removed = self
            .storage
            .transactions
            .remove(id)?
            .ok_or_else(|| SpendError::transaction_not_found(id.as_str()))?;
        debug!(id = %removed.id, "deleted transaction");

        self.after_mutation()?;
        Ok(removed)
    }

    pub fn get(&self, id: &TransactionId) -> SpendResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Look up by full id or unique prefix, failing if nothing matches
    pub fn find(&self, identifier: &str) -> SpendResult<Transaction> {
        self.storage
            .transactions
            .find(identifier)?
            .ok_or_else(|| SpendError::transaction_not_found(identifier))
    }

    /// All transactions in insertion order
    pub fn list(&self) -> SpendResult<Vec<Transaction>> {
        self.storage.transactions.get_all()
    }

    pub fn list_filtered(
        &self,
        filter: &TransactionFilter,
        today: NaiveDate,
    ) -> SpendResult<Vec<Transaction>> {
        Ok(filter.apply(self.list()?, today))
    }

    pub fn count(&self) -> SpendResult<usize> {
        self.storage.transactions.count()
    }

    fn build(&self, input: TransactionInput) -> SpendResult<Transaction> {
        let input = Self::validated(input)?;

        let mut id = TransactionId::new();
        while self.storage.transactions.contains(&id)? {
            id = TransactionId::new();
        }
        Ok(Transaction::from_input(id, input))
    }

    fn validated(input: TransactionInput) -> SpendResult<TransactionInput> {
        let input = input.normalized();
        input
            .validate()
            .map_err(|e| SpendError::Validation(e.to_string()))?;
        Ok(input)
    }

    fn after_mutation(&self) -> SpendResult<()> {
        self.storage.persist_transactions();
        BudgetService::new(self.storage).recompute()?;
        Ok(())
    }
}
