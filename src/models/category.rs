//! Transaction kinds and the fixed category sets
//!
//! Categories are plain strings drawn from one of two closed sets: one for
//! expenses and one for income. "Investment" and "Other" appear in both.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categories an expense may be filed under
pub const EXPENSE_CATEGORIES: [&str; 12] = [
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Rent",
    "Healthcare",
    "Travel",
    "Education",
    "Groceries",
    "Investment",
    "Other",
];

/// Categories an income entry may be filed under
pub const INCOME_CATEGORIES: [&str; 6] = [
    "Salary",
    "Freelance",
    "Business",
    "Investment",
    "Gift",
    "Other",
];

/// Category tracked by the investment metrics (purchases as expenses, returns as income)
pub const INVESTMENT_CATEGORY: &str = "Investment";

/// Whether a transaction brings money in or sends it out
///
/// Amounts are always stored positive; the sign is derived from the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// The category set valid for this kind
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            Self::Income => &INCOME_CATEGORIES,
            Self::Expense => &EXPENSE_CATEGORIES,
        }
    }

    pub fn is_valid_category(&self, category: &str) -> bool {
        self.categories().contains(&category)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("Unknown transaction type: '{}'", other)),
        }
    }
}

/// Look up a category of `kind` ignoring case, returning its canonical spelling
pub fn find_category(kind: TransactionKind, name: &str) -> Option<&'static str> {
    let name = name.trim();
    kind.categories()
        .iter()
        .copied()
        .find(|c| c.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_sets() {
        assert!(TransactionKind::Expense.is_valid_category("Groceries"));
        assert!(!TransactionKind::Income.is_valid_category("Groceries"));
        assert!(TransactionKind::Income.is_valid_category("Salary"));
        assert!(TransactionKind::Income.is_valid_category(INVESTMENT_CATEGORY));
        assert!(TransactionKind::Expense.is_valid_category(INVESTMENT_CATEGORY));
    }

    #[test]
    fn test_find_category_is_case_insensitive() {
        assert_eq!(
            find_category(TransactionKind::Expense, "food & dining"),
            Some("Food & Dining")
        );
        assert_eq!(find_category(TransactionKind::Income, " salary "), Some("Salary"));
        assert_eq!(find_category(TransactionKind::Income, "Rent"), None);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TransactionKind::Income).unwrap(),
            "\"income\""
        );
        assert_eq!(
            "Expense".parse::<TransactionKind>().unwrap(),
            TransactionKind::Expense
        );
        assert!("refund".parse::<TransactionKind>().is_err());
    }
}
