//! Investment tracker report

use chrono::{Months, NaiveDate};

use crate::models::{Money, Transaction, INVESTMENT_CATEGORY};

use super::analytics::{InvestmentMetrics, MONTH_LABEL_FORMAT};
use super::window::{month_starts, same_month};

/// Months of history shown in the investment activity table
pub const ACTIVITY_MONTHS: u32 = 6;

/// Investment flows for one calendar month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvestmentMonth {
    pub month: NaiveDate,
    pub invested: Money,
    pub returns: Money,
    pub net: Money,
}

impl InvestmentMonth {
    pub fn label(&self) -> String {
        self.month.format(MONTH_LABEL_FORMAT).to_string()
    }
}

#[derive(Debug, Clone)]
pub struct InvestmentReport {
    /// All-time totals
    pub metrics: InvestmentMetrics,
    /// Recent months, oldest first
    pub monthly: Vec<InvestmentMonth>,
    /// Most recent investment transactions, newest first
    pub recent: Vec<Transaction>,
}

impl InvestmentReport {
    pub fn generate(transactions: &[Transaction], today: NaiveDate, recent: usize) -> Self {
        let investments: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| t.category == INVESTMENT_CATEGORY)
            .collect();

        let start = today
            .checked_sub_months(Months::new(ACTIVITY_MONTHS))
            .unwrap_or(today);
        let monthly = month_starts(start, today)
            .into_iter()
            .map(|month| {
                let mut invested = Money::zero();
                let mut returns = Money::zero();
                for txn in investments.iter().filter(|t| same_month(t.date, month)) {
                    if txn.is_expense() {
                        invested += txn.amount;
                    } else {
                        returns += txn.amount;
                    }
                }
                InvestmentMonth {
                    month,
                    invested,
                    returns,
                    net: returns - invested,
                }
            })
            .collect();

        let mut latest: Vec<Transaction> = investments.into_iter().cloned().collect();
        latest.sort_by(|a, b| b.date.cmp(&a.date));
        latest.truncate(recent);

        Self {
            metrics: InvestmentMetrics::from_transactions(transactions),
            monthly,
            recent: latest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionId, TransactionInput};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(input: TransactionInput) -> Transaction {
        Transaction::from_input(TransactionId::new(), input)
    }

    #[test]
    fn test_investment_report() {
        let today = date(2025, 7, 15);
        let cents = Money::from_cents;
        let txns = vec![
            txn(TransactionInput::expense(cents(100_000), "Investment", "Index fund", date(2024, 3, 1))),
            txn(TransactionInput::expense(cents(50_000), "Investment", "Bonds", date(2025, 6, 2))),
            txn(TransactionInput::income(cents(20_000), "Investment", "Dividend", date(2025, 7, 1))),
            txn(TransactionInput::expense(cents(9_999), "Groceries", "Food run", date(2025, 7, 2))),
        ];

        let report = InvestmentReport::generate(&txns, today, 2);

        assert_eq!(report.metrics.invested, cents(150_000));
        assert_eq!(report.metrics.returns, cents(20_000));
        assert_eq!(report.metrics.net, cents(-130_000));

        assert_eq!(report.monthly.len(), 7);
        assert_eq!(report.monthly[0].label(), "Jan 2025");
        let june = &report.monthly[5];
        assert_eq!(june.invested, cents(50_000));
        let july = &report.monthly[6];
        assert_eq!(july.returns, cents(20_000));
        assert_eq!(july.net, cents(20_000));

        let recent: Vec<_> = report.recent.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(recent, vec!["Dividend", "Bonds"]);
    }

    #[test]
    fn test_empty_log() {
        let report = InvestmentReport::generate(&[], date(2025, 1, 1), 5);
        assert_eq!(report.metrics.roi, 0.0);
        assert!(report.recent.is_empty());
        assert!(report.monthly.iter().all(|m| m.net.is_zero()));
    }
}
