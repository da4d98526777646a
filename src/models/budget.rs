//! Budget model
//!
//! A budget is a spending limit for one expense category. Its `spent` field
//! is a projection of the transaction log: it is only ever written by
//! [`derive_spent`], never by callers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::money::Money;
use super::transaction::Transaction;
use crate::error::{SpendError, SpendResult};

/// Spend ratio at which a budget turns from good to warning, in percent
pub const WARNING_THRESHOLD_PERCENT: i64 = 80;

/// A per-category spending limit with its derived actual spend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    category: String,
    limit: Money,
    spent: Money,
}

impl Budget {
    /// Create a budget with nothing spent yet
    ///
    /// The next derivation pass fills in `spent`.
    pub fn new(category: impl Into<String>, limit: Money) -> SpendResult<Self> {
        let category = category.into();
        check_limit(&category, limit)?;
        Ok(Self {
            category,
            limit,
            spent: Money::zero(),
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn limit(&self) -> Money {
        self.limit
    }

    pub fn spent(&self) -> Money {
        self.spent
    }

    /// Replace the limit; `spent` is left as is until the next derivation pass
    pub fn set_limit(&mut self, limit: Money) -> SpendResult<()> {
        check_limit(&self.category, limit)?;
        self.limit = limit;
        Ok(())
    }

    /// Limit minus spent (negative once overspent)
    pub fn remaining(&self) -> Money {
        self.limit - self.spent
    }

    /// Share of the limit already spent, in percent
    pub fn percentage_used(&self) -> f64 {
        if self.limit.is_positive() {
            self.spent.as_f64() / self.limit.as_f64() * 100.0
        } else {
            0.0
        }
    }

    pub fn status(&self) -> BudgetStatus {
        BudgetStatus::classify(self.spent, self.limit)
    }

    fn with_spent(&self, spent: Money) -> Self {
        Self {
            category: self.category.clone(),
            limit: self.limit,
            spent,
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} of {} ({})",
            self.category, self.spent, self.limit, self.status()
        )
    }
}

fn check_limit(category: &str, limit: Money) -> SpendResult<()> {
    if limit.is_positive() {
        Ok(())
    } else {
        Err(SpendError::InvalidLimit {
            category: category.to_string(),
            limit,
        })
    }
}

/// Budget utilization classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    /// Under 80% of the limit spent
    Good,
    /// At least 80% spent
    Warning,
    /// The whole limit (or more) spent
    Over,
}

impl BudgetStatus {
    /// Classify `spent` against `limit`
    ///
    /// Over at `spent/limit >= 1.0`, warning at `>= 0.8`. The comparison is done
    /// on integer cents so boundary values classify exactly. A non-positive
    /// limit cannot be stored; if one turns up anyway it classifies as over.
    pub fn classify(spent: Money, limit: Money) -> Self {
        if !limit.is_positive() {
            return Self::Over;
        }
        let spent = spent.cents() as i128;
        let limit = limit.cents() as i128;
        if spent >= limit {
            Self::Over
        } else if spent * 100 >= limit * WARNING_THRESHOLD_PERCENT as i128 {
            Self::Warning
        } else {
            Self::Good
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "GOOD"),
            Self::Warning => write!(f, "WARNING"),
            Self::Over => write!(f, "OVER"),
        }
    }
}

/// Outcome of a derivation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetDerivation {
    /// Whether any budget's `spent` differs from the input collection
    pub changed: bool,
    /// The recomputed collection, same order as the input
    pub budgets: Vec<Budget>,
}

impl BudgetDerivation {
    /// The recomputed budgets, only when something actually changed
    pub fn into_changed(self) -> Option<Vec<Budget>> {
        self.changed.then_some(self.budgets)
    }
}

/// Recompute every budget's `spent` from scratch
///
/// `spent` is the sum of all expense amounts whose category equals the
/// budget's category, over the whole log (no date window). Limits and
/// categories pass through untouched.
pub fn derive_spent(transactions: &[Transaction], budgets: &[Budget]) -> BudgetDerivation {
    let mut spent_by_category: HashMap<&str, Money> = HashMap::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        *spent_by_category.entry(txn.category.as_str()).or_default() += txn.amount;
    }

    let derived: Vec<Budget> = budgets
        .iter()
        .map(|budget| {
            let spent = spent_by_category
                .get(budget.category())
                .copied()
                .unwrap_or_default();
            budget.with_spent(spent)
        })
        .collect();

    let changed = derived
        .iter()
        .zip(budgets)
        .any(|(new, old)| new.spent != old.spent);

    BudgetDerivation {
        changed,
        budgets: derived,
    }
}
