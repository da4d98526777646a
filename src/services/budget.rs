//! Budget service
//!
//! Setting limits, keeping derived spend current, and the advisory checks
//! that accompany both.

use tracing::{debug, info};

use crate::error::{SpendError, SpendResult};
use crate::models::{
    derive_spent, Budget, BudgetStatus, Money, Transaction, TransactionId, TransactionKind,
    EXPENSE_CATEGORIES,
};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// Non-blocking signal returned next to a successful budget change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetAdvisory {
    /// The sum of all limits is now larger than all income ever recorded
    WouldExceedIncome {
        over_by: Money,
        total_limits: Money,
        total_income: Money,
    },
}

/// Result of [`BudgetService::set_limit`]
#[derive(Debug, Clone)]
pub struct BudgetSetOutcome {
    /// The stored budget, with `spent` already derived
    pub budget: Budget,
    /// Whether the budget was newly created
    pub created: bool,
    pub advisory: Option<BudgetAdvisory>,
}

/// Raised when an expense would take its category past the limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetAlert {
    pub category: String,
    pub limit: Money,
    /// Category spend including the new expense
    pub projected: Money,
    pub over_by: Money,
}

/// One row of the budget overview
#[derive(Debug, Clone)]
pub struct BudgetLine {
    pub budget: Budget,
    pub status: BudgetStatus,
    pub percentage: f64,
    pub remaining: Money,
}

/// All budgets with their derived figures and totals
#[derive(Debug, Clone)]
pub struct BudgetOverview {
    pub lines: Vec<BudgetLine>,
    pub total_limit: Money,
    pub total_spent: Money,
    pub total_income: Money,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Set (or create) the spending limit for an expense category
    ///
    /// Fails with `InvalidLimit` for a non-positive limit and with a
    /// validation error for a category outside the expense set. Exceeding
    /// total income is reported through `advisory` and does not block.
    pub fn set_limit(&self, category: &str, limit: Money) -> SpendResult<BudgetSetOutcome> {
        if !TransactionKind::Expense.is_valid_category(category) {
            return Err(SpendError::Validation(format!(
                "Budgets can only be set for expense categories, not '{}'",
                category
            )));
        }
        if !limit.is_positive() {
            return Err(SpendError::InvalidLimit {
                category: category.to_string(),
                limit,
            });
        }

        let advisory = self.income_advisory(category, limit)?;
        let created = self.storage.budgets.get(category)?.is_none();

        self.storage.budgets.set_limit(category, limit)?;
        info!(category, %limit, created, "budget limit set");
        if !self.recompute()? {
            self.storage.persist_budgets();
        }

        let budget = self
            .storage
            .budgets
            .get(category)?
            .ok_or_else(|| SpendError::budget_not_found(category))?;

        Ok(BudgetSetOutcome {
            budget,
            created,
            advisory,
        })
    }

    /// Re-run the derivation pass over the current log
    ///
    /// Installs and persists the new budgets only when some `spent` changed.
    /// Returns whether it did.
    pub fn recompute(&self) -> SpendResult<bool> {
        let transactions = self.storage.transactions.get_all()?;
        let budgets = self.storage.budgets.get_all()?;

        match derive_spent(&transactions, &budgets).into_changed() {
            Some(updated) => {
                debug!(budgets = updated.len(), "budget spend changed");
                self.storage.budgets.replace_all(updated)?;
                self.storage.persist_budgets();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn get(&self, category: &str) -> SpendResult<Option<Budget>> {
        self.storage.budgets.get(category)
    }

    pub fn list(&self) -> SpendResult<Vec<Budget>> {
        self.storage.budgets.get_all()
    }

    /// Expense categories that do not have a budget yet, in category-set order
    pub fn available_categories(&self) -> SpendResult<Vec<&'static str>> {
        let budgets = self.storage.budgets.get_all()?;
        Ok(EXPENSE_CATEGORIES
            .iter()
            .copied()
            .filter(|c| !budgets.iter().any(|b| b.category() == *c))
            .collect())
    }

    /// Income over the whole log, regardless of date
    pub fn total_income(&self) -> SpendResult<Money> {
        let transactions = self.storage.transactions.get_all()?;
        Ok(total_income(&transactions))
    }

    /// Check whether adding (or editing) an expense pushes its category over budget
    ///
    /// `editing` names the transaction being replaced so its old amount is
    /// not counted twice.
    pub fn expense_alert(
        &self,
        category: &str,
        amount: Money,
        editing: Option<&TransactionId>,
    ) -> SpendResult<Option<BudgetAlert>> {
        let Some(budget) = self.storage.budgets.get(category)? else {
            return Ok(None);
        };

        let transactions = self.storage.transactions.get_all()?;
        let current: Money = transactions
            .iter()
            .filter(|t| t.is_expense() && t.category == category)
            .filter(|t| Some(&t.id) != editing)
            .map(|t| t.amount)
            .sum();

        let projected = current + amount;
        if projected > budget.limit() {
            Ok(Some(BudgetAlert {
                category: category.to_string(),
                limit: budget.limit(),
                projected,
                over_by: projected - budget.limit(),
            }))
        } else {
            Ok(None)
        }
    }

    /// All budgets with status and totals
    pub fn overview(&self) -> SpendResult<BudgetOverview> {
        let budgets = self.storage.budgets.get_all()?;
        let total_income = self.total_income()?;

        let total_limit = budgets.iter().map(|b| b.limit()).sum();
        let total_spent = budgets.iter().map(|b| b.spent()).sum();

        let lines = budgets
            .into_iter()
            .map(|budget| BudgetLine {
                status: budget.status(),
                percentage: budget.percentage_used(),
                remaining: budget.remaining(),
                budget,
            })
            .collect();

        Ok(BudgetOverview {
            lines,
            total_limit,
            total_spent,
            total_income,
        })
    }

    /// Compare the limits after this change against all-time income
    fn income_advisory(&self, category: &str, limit: Money) -> SpendResult<Option<BudgetAdvisory>> {
        let budgets = self.storage.budgets.get_all()?;
        let others: Money = budgets
            .iter()
            .filter(|b| b.category() != category)
            .map(|b| b.limit())
            .sum();
        let total_limits = others + limit;
        let total_income = self.total_income()?;

        if total_limits > total_income {
            Ok(Some(BudgetAdvisory::WouldExceedIncome {
                over_by: total_limits - total_income,
                total_limits,
                total_income,
            }))
        } else {
            Ok(None)
        }
    }
}

fn total_income(transactions: &[Transaction]) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendPaths;
    use crate::models::TransactionInput;
    use crate::services::TransactionService;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn money(units: i64) -> Money {
        Money::from_units_cents(units, 0)
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 2).unwrap()
    }

    #[test]
    fn test_set_limit_creates_budget_with_derived_spent() {
        let (_temp_dir, storage) = create_test_storage();
        let txns = TransactionService::new(&storage);
        txns.add(TransactionInput::income(money(5000), "Salary", "April pay", day()))
            .unwrap();
        txns.add(TransactionInput::expense(money(120), "Groceries", "Market", day()))
            .unwrap();

        let service = BudgetService::new(&storage);
        let outcome = service.set_limit("Groceries", money(400)).unwrap();

        assert!(outcome.created);
        assert_eq!(outcome.budget.spent(), money(120));
        assert_eq!(outcome.budget.limit(), money(400));
        assert!(outcome.advisory.is_none());
    }

    #[test]
    fn test_set_limit_updates_existing_budget() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        service.set_limit("Rent", money(900)).unwrap();

        let outcome = service.set_limit("Rent", money(1000)).unwrap();
        assert!(!outcome.created);
        assert_eq!(outcome.budget.limit(), money(1000));
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_limit() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let err = service.set_limit("Rent", Money::zero()).unwrap_err();
        assert!(matches!(err, SpendError::InvalidLimit { .. }));
        let err = service.set_limit("Rent", money(-10)).unwrap_err();
        assert!(matches!(err, SpendError::InvalidLimit { .. }));
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_income_category_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        assert!(service.set_limit("Salary", money(10)).unwrap_err().is_validation());
    }

    #[test]
    fn test_would_exceed_income_is_advisory() {
        let (_temp_dir, storage) = create_test_storage();
        TransactionService::new(&storage)
            .add(TransactionInput::income(money(1000), "Salary", "Pay", day()))
            .unwrap();

        let service = BudgetService::new(&storage);
        assert!(service.set_limit("Rent", money(700)).unwrap().advisory.is_none());

        let outcome = service.set_limit("Travel", money(500)).unwrap();
        assert_eq!(
            outcome.advisory,
            Some(BudgetAdvisory::WouldExceedIncome {
                over_by: money(200),
                total_limits: money(1200),
                total_income: money(1000),
            })
        );
        // Not blocked
        assert_eq!(service.list().unwrap().len(), 2);

        // Re-setting a limit replaces its old value in the total
        assert!(service.set_limit("Travel", money(300)).unwrap().advisory.is_none());
    }

    #[test]
    fn test_available_categories() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        service.set_limit("Rent", money(900)).unwrap();
        service.set_limit("Food & Dining", money(300)).unwrap();

        let available = service.available_categories().unwrap();
        assert_eq!(available.len(), EXPENSE_CATEGORIES.len() - 2);
        assert!(!available.contains(&"Rent"));
        assert_eq!(available[0], "Transportation");
    }

    #[test]
    fn test_expense_alert() {
        let (_temp_dir, storage) = create_test_storage();
        let txns = TransactionService::new(&storage);
        let existing = txns
            .add(TransactionInput::expense(money(80), "Travel", "Bus pass", day()))
            .unwrap();

        let service = BudgetService::new(&storage);
        assert!(service.expense_alert("Travel", money(50), None).unwrap().is_none());

        service.set_limit("Travel", money(100)).unwrap();
        let alert = service
            .expense_alert("Travel", money(50), None)
            .unwrap()
            .unwrap();
        assert_eq!(alert.projected, money(130));
        assert_eq!(alert.over_by, money(30));

        // Editing the existing expense does not double count it
        assert!(service
            .expense_alert("Travel", money(90), Some(&existing.id))
            .unwrap()
            .is_none());
        assert!(service.expense_alert("Travel", money(20), None).unwrap().is_none());
    }

    #[test]
    fn test_overview() {
        let (_temp_dir, storage) = create_test_storage();
        let txns = TransactionService::new(&storage);
        txns.add(TransactionInput::income(money(2000), "Salary", "Pay", day()))
            .unwrap();
        txns.add(TransactionInput::expense(money(80), "Groceries", "Shop", day()))
            .unwrap();
        txns.add(TransactionInput::expense(money(100), "Rent", "Room", day()))
            .unwrap();

        let service = BudgetService::new(&storage);
        service.set_limit("Groceries", money(100)).unwrap();
        service.set_limit("Rent", money(100)).unwrap();
        service.set_limit("Travel", money(100)).unwrap();

        let overview = service.overview().unwrap();
        let statuses: Vec<_> = overview.lines.iter().map(|l| l.status).collect();
        assert_eq!(
            statuses,
            vec![BudgetStatus::Warning, BudgetStatus::Over, BudgetStatus::Good]
        );
        assert_eq!(overview.total_limit, money(300));
        assert_eq!(overview.total_spent, money(180));
        assert_eq!(overview.total_income, money(2000));
        assert_eq!(overview.lines[0].remaining, money(20));
    }

    #[test]
    fn test_recompute_reports_no_change() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        service.set_limit("Rent", money(900)).unwrap();
        assert!(!service.recompute().unwrap());
    }
}
