//! Transaction model
//!
//! A transaction is a single income or expense event. The amount is always
//! positive; whether it adds to or subtracts from the balance is decided by
//! the kind.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{TransactionKind, INVESTMENT_CATEGORY};
use super::ids::TransactionId;
use super::money::Money;

/// Minimum description length, counted after trimming
pub const MIN_DESCRIPTION_LEN: usize = 3;

/// A recorded income or expense
///
/// Field names and order match the persisted layout:
/// `id, amount, category, description, date, type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, assigned once by the store
    pub id: TransactionId,

    /// Positive amount
    pub amount: Money,

    /// Category from the set matching `kind`
    pub category: String,

    /// Free-text description
    pub description: String,

    /// Calendar date of the transaction (ISO `YYYY-MM-DD` on disk)
    pub date: NaiveDate,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl Transaction {
    /// Build a stored transaction from input and an already assigned id
    pub fn from_input(id: TransactionId, input: TransactionInput) -> Self {
        Self {
            id,
            amount: input.amount,
            category: input.category,
            description: input.description,
            date: input.date,
            kind: input.kind,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Investment purchases are expenses, returns are income, both in the Investment category
    pub fn is_investment(&self) -> bool {
        self.category == INVESTMENT_CATEGORY
    }

    /// Amount with the sign implied by the kind (income positive, expense negative)
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// The editable fields of this transaction, e.g. as the base of an edit
    pub fn to_input(&self) -> TransactionInput {
        TransactionInput {
            amount: self.amount,
            category: self.category.clone(),
            description: self.description.clone(),
            date: self.date,
            kind: self.kind,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.description,
            self.signed_amount()
        )
    }
}

/// Everything about a transaction except its id
///
/// The store trusts its input; callers run [`TransactionInput::validate`] first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInput {
    pub amount: Money,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub kind: TransactionKind,
}

impl TransactionInput {
    pub fn new(
        kind: TransactionKind,
        amount: Money,
        category: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            amount,
            category: category.into(),
            description: description.into(),
            date,
            kind,
        }
    }

    pub fn expense(
        amount: Money,
        category: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(TransactionKind::Expense, amount, category, description, date)
    }

    pub fn income(
        amount: Money,
        category: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(TransactionKind::Income, amount, category, description, date)
    }

    /// Check the field constraints a stored transaction relies on
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::MissingCategory);
        }

        if !self.kind.is_valid_category(&self.category) {
            return Err(TransactionValidationError::UnknownCategory {
                kind: self.kind,
                category: self.category.clone(),
            });
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err(TransactionValidationError::MissingDescription);
        }
        if description.chars().count() < MIN_DESCRIPTION_LEN {
            return Err(TransactionValidationError::DescriptionTooShort);
        }

        Ok(())
    }

    /// Same input with the description trimmed
    pub fn normalized(mut self) -> Self {
        self.description = self.description.trim().to_string();
        self
    }
}

/// Validation errors for transaction input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    MissingCategory,
    UnknownCategory {
        kind: TransactionKind,
        category: String,
    },
    MissingDescription,
    DescriptionTooShort,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than 0 (got {})", amount)
            }
            Self::MissingCategory => write!(f, "Please select a category"),
            Self::UnknownCategory { kind, category } => write!(
                f,
                "'{}' is not a valid {} category (expected one of: {})",
                category,
                kind,
                kind.categories().join(", ")
            ),
            Self::MissingDescription => write!(f, "Please enter a description"),
            Self::DescriptionTooShort => write!(
                f,
                "Description must be at least {} characters",
                MIN_DESCRIPTION_LEN
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
