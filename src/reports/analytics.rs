//! Analytics report
//!
//! Time-windowed rollups over the transaction log: monthly income and
//! expense buckets, per-category expense totals, the top categories and
//! investment ROI. Everything here is recomputed from the log on each call.

use chrono::NaiveDate;

use crate::error::SpendResult;
use crate::models::{Money, Transaction, INVESTMENT_CATEGORY};
use crate::storage::Storage;

use super::window::{month_starts, same_month, AnalyticsWindow, WindowPreset};

/// Default number of categories in [`top_categories`]
pub const DEFAULT_TOP_CATEGORIES: usize = 5;

/// Display format for month buckets, e.g. `Oct 2026`
pub const MONTH_LABEL_FORMAT: &str = "%b %Y";

/// Income and expense totals for one calendar month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyBucket {
    /// First day of the month
    pub month: NaiveDate,
    pub income: Money,
    pub expense: Money,
    /// `income - expense`
    pub net: Money,
}

impl MonthlyBucket {
    pub fn label(&self) -> String {
        self.month.format(MONTH_LABEL_FORMAT).to_string()
    }
}

/// One bucket per calendar month from `start` through `end`, oldest first
///
/// Months with no transactions are included with zero totals.
pub fn monthly_rollup(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<MonthlyBucket> {
    month_starts(start, end)
        .into_iter()
        .map(|month| {
            let mut income = Money::zero();
            let mut expense = Money::zero();
            for txn in transactions.iter().filter(|t| same_month(t.date, month)) {
                if txn.is_income() {
                    income += txn.amount;
                } else {
                    expense += txn.amount;
                }
            }
            MonthlyBucket {
                month,
                income,
                expense,
                net: income - expense,
            }
        })
        .collect()
}

/// Expense total for a single category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Money,
}

/// Sum expense amounts per category
///
/// Categories appear in the order they are first seen in `transactions`.
pub fn category_totals(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        match totals.iter_mut().find(|c| c.category == txn.category) {
            Some(total) => total.amount += txn.amount,
            None => totals.push(CategoryTotal {
                category: txn.category.clone(),
                amount: txn.amount,
            }),
        }
    }
    totals
}

/// The `n` largest totals, descending; ties keep their incoming order
pub fn top_categories(totals: &[CategoryTotal], n: usize) -> Vec<CategoryTotal> {
    let mut sorted = totals.to_vec();
    sorted.sort_by(|a, b| b.amount.cmp(&a.amount));
    sorted.truncate(n);
    sorted
}

/// Money put into and taken out of the Investment category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvestmentMetrics {
    /// Expense-kind Investment transactions
    pub invested: Money,
    /// Income-kind Investment transactions
    pub returns: Money,
    /// `returns - invested`
    pub net: Money,
    /// `net / invested * 100`, or 0 when nothing was invested
    pub roi: f64,
}

impl InvestmentMetrics {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut invested = Money::zero();
        let mut returns = Money::zero();
        for txn in transactions
            .iter()
            .filter(|t| t.category == INVESTMENT_CATEGORY)
        {
            if txn.is_expense() {
                invested += txn.amount;
            } else {
                returns += txn.amount;
            }
        }

        let net = returns - invested;
        let roi = if invested.is_positive() {
            net.cents() as f64 / invested.cents() as f64 * 100.0
        } else {
            0.0
        };

        Self {
            invested,
            returns,
            net,
            roi,
        }
    }
}

/// Window totals and per-month averages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsSummary {
    pub total_income: Money,
    pub total_expense: Money,
    pub net: Money,
    pub avg_monthly_income: Money,
    pub avg_monthly_expense: Money,
    pub transaction_count: usize,
}

impl AnalyticsSummary {
    /// Averages divide by `months`, treating zero as one
    pub fn compute(transactions: &[Transaction], months: usize) -> Self {
        let total_income: Money = transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum();
        let total_expense: Money = transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum();

        Self {
            total_income,
            total_expense,
            net: total_income - total_expense,
            avg_monthly_income: total_income.per_period(months),
            avg_monthly_expense: total_expense.per_period(months),
            transaction_count: transactions.len(),
        }
    }
}

/// Everything the analytics view shows for one window
#[derive(Debug, Clone)]
pub struct AnalyticsReport {
    pub preset: WindowPreset,
    pub window: AnalyticsWindow,
    pub monthly: Vec<MonthlyBucket>,
    pub category_totals: Vec<CategoryTotal>,
    pub top_categories: Vec<CategoryTotal>,
    pub summary: AnalyticsSummary,
    pub investment: InvestmentMetrics,
}

impl AnalyticsReport {
    /// Generate the report from the current contents of the store
    pub fn generate(
        storage: &Storage,
        preset: WindowPreset,
        today: NaiveDate,
        top_n: usize,
    ) -> SpendResult<Self> {
        let transactions = storage.transactions.get_all()?;
        Ok(Self::from_transactions(&transactions, preset, today, top_n))
    }

    pub fn from_transactions(
        transactions: &[Transaction],
        preset: WindowPreset,
        today: NaiveDate,
        top_n: usize,
    ) -> Self {
        let window = AnalyticsWindow::resolve(preset, transactions, today);
        let filtered = window.filter(transactions);

        let monthly = monthly_rollup(&filtered, window.start, window.end);
        let category_totals = category_totals(&filtered);
        let top_categories = top_categories(&category_totals, top_n);
        let summary = AnalyticsSummary::compute(&filtered, monthly.len());
        let investment = InvestmentMetrics::from_transactions(&filtered);

        Self {
            preset,
            window,
            monthly,
            category_totals,
            top_categories,
            summary,
            investment,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let fmt = |m: Money| m.format_with_symbol(symbol);
        let mut output = String::new();

        output.push_str(&format!(
            "Analytics ({}): {} to {}\n",
            self.preset, self.window.start, self.window.end
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Total Income:        {:>14}\n",
            fmt(self.summary.total_income)
        ));
        output.push_str(&format!(
            "Total Expenses:      {:>14}\n",
            fmt(self.summary.total_expense)
        ));
        output.push_str(&format!("Net:                 {:>14}\n", fmt(self.summary.net)));
        output.push_str(&format!(
            "Avg Monthly Income:  {:>14}\n",
            fmt(self.summary.avg_monthly_income)
        ));
        output.push_str(&format!(
            "Avg Monthly Expense: {:>14}\n\n",
            fmt(self.summary.avg_monthly_expense)
        ));

        output.push_str(&format!(
            "{:<10} {:>14} {:>14} {:>14}\n",
            "Month", "Income", "Expense", "Net"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for bucket in &self.monthly {
            output.push_str(&format!(
                "{:<10} {:>14} {:>14} {:>14}\n",
                bucket.label(),
                fmt(bucket.income),
                fmt(bucket.expense),
                fmt(bucket.net)
            ));
        }

        output.push_str("\nTop Categories\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        if self.top_categories.is_empty() {
            output.push_str("No expenses in this window.\n");
        }
        for (rank, total) in self.top_categories.iter().enumerate() {
            output.push_str(&format!(
                "{:>2}. {:<30} {:>14}\n",
                rank + 1,
                total.category,
                fmt(total.amount)
            ));
        }

        output.push_str("\nInvestments\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Invested: {}  Returns: {}  Net: {}  ROI: {:.2}%\n",
            fmt(self.investment.invested),
            fmt(self.investment.returns),
            fmt(self.investment.net),
            self.investment.roi
        ));

        output
    }
}
