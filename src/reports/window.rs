//! Aggregation windows
//!
//! Resolves a preset such as `6months` into a concrete `[start, end]` date
//! range ending today, and enumerates the calendar months it spans.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::Transaction;

/// How far back an analytics window reaches
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
pub enum WindowPreset {
    #[serde(rename = "1month")]
    #[value(name = "1month")]
    OneMonth,
    #[serde(rename = "3months")]
    #[value(name = "3months")]
    ThreeMonths,
    #[default]
    #[serde(rename = "6months")]
    #[value(name = "6months")]
    SixMonths,
    #[serde(rename = "12months")]
    #[value(name = "12months")]
    TwelveMonths,
    /// From the earliest transaction
    #[serde(rename = "all")]
    #[value(name = "all")]
    All,
}

impl WindowPreset {
    /// Months to look back, `None` for [`WindowPreset::All`]
    pub fn months(&self) -> Option<u32> {
        match self {
            Self::OneMonth => Some(1),
            Self::ThreeMonths => Some(3),
            Self::SixMonths => Some(6),
            Self::TwelveMonths => Some(12),
            Self::All => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneMonth => "1month",
            Self::ThreeMonths => "3months",
            Self::SixMonths => "6months",
            Self::TwelveMonths => "12months",
            Self::All => "all",
        }
    }
}

impl fmt::Display for WindowPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1month" => Ok(Self::OneMonth),
            "3months" => Ok(Self::ThreeMonths),
            "6months" => Ok(Self::SixMonths),
            "12months" => Ok(Self::TwelveMonths),
            "all" => Ok(Self::All),
            other => Err(format!(
                "Unknown window '{}' (expected 1month, 3months, 6months, 12months or all)",
                other
            )),
        }
    }
}

/// A resolved, inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AnalyticsWindow {
    /// Resolve `preset` against the transaction log, ending at `today`
    ///
    /// `All` starts at the earliest transaction date, or at `today` when the
    /// log is empty or only holds future-dated transactions.
    pub fn resolve(preset: WindowPreset, transactions: &[Transaction], today: NaiveDate) -> Self {
        let start = match preset.months() {
            Some(n) => today.checked_sub_months(Months::new(n)).unwrap_or(today),
            None => transactions
                .iter()
                .map(|t| t.date)
                .min()
                .map_or(today, |earliest| earliest.min(today)),
        };

        Self { start, end: today }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The transactions dated inside the window, in their original order
    pub fn filter(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|t| self.contains(t.date))
            .cloned()
            .collect()
    }

    /// First day of every calendar month the window touches, oldest first
    pub fn months(&self) -> Vec<NaiveDate> {
        month_starts(self.start, self.end)
    }
}

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Month starts from `start`'s month through `end`'s month inclusive
///
/// Always yields at least one month.
pub fn month_starts(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let last = month_start(end.max(start));
    let mut current = month_start(start.min(end));
    let mut months = vec![current];

    while current < last {
        match current.checked_add_months(Months::new(1)) {
            Some(next) => {
                current = next;
                months.push(current);
            }
            None => break,
        }
    }
    months
}

/// Whether two dates fall in the same calendar month
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionId, TransactionInput};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn_on(on: NaiveDate) -> Transaction {
        Transaction::from_input(
            TransactionId::new(),
            TransactionInput::expense(Money::from_cents(100), "Other", "Misc", on),
        )
    }

    #[test]
    fn test_preset_resolution() {
        let today = date(2025, 8, 31);
        let w = AnalyticsWindow::resolve(WindowPreset::OneMonth, &[], today);
        assert_eq!(w.start, date(2025, 7, 31));
        assert_eq!(w.end, today);

        let w = AnalyticsWindow::resolve(WindowPreset::SixMonths, &[], today);
        assert_eq!(w.start, date(2025, 2, 28));

        let w = AnalyticsWindow::resolve(WindowPreset::TwelveMonths, &[], today);
        assert_eq!(w.start, date(2024, 8, 31));
    }

    #[test]
    fn test_all_uses_earliest_transaction() {
        let today = date(2025, 8, 10);
        let txns = vec![txn_on(date(2025, 3, 4)), txn_on(date(2024, 11, 20))];
        let w = AnalyticsWindow::resolve(WindowPreset::All, &txns, today);
        assert_eq!(w.start, date(2024, 11, 20));
        assert_eq!(w.months().len(), 10);
    }

    #[test]
    fn test_all_on_empty_or_future_log_starts_today() {
        let today = date(2025, 8, 10);
        let w = AnalyticsWindow::resolve(WindowPreset::All, &[], today);
        assert_eq!(w.start, today);
        assert_eq!(w.months(), vec![date(2025, 8, 1)]);

        let future = vec![txn_on(date(2026, 1, 1))];
        let w = AnalyticsWindow::resolve(WindowPreset::All, &future, today);
        assert_eq!(w.start, today);
    }

    #[test]
    fn test_filter_is_inclusive_and_drops_future() {
        let today = date(2025, 8, 10);
        let txns = vec![
            txn_on(date(2025, 5, 10)),
            txn_on(date(2025, 5, 9)),
            txn_on(today),
            txn_on(date(2025, 8, 11)),
        ];
        let w = AnalyticsWindow::resolve(WindowPreset::ThreeMonths, &txns, today);
        let kept: Vec<_> = w.filter(&txns).iter().map(|t| t.date).collect();
        assert_eq!(kept, vec![date(2025, 5, 10), today]);
    }

    #[test]
    fn test_month_starts_spans_calendar_months() {
        let months = month_starts(date(2025, 1, 31), date(2025, 3, 1));
        assert_eq!(
            months,
            vec![date(2025, 1, 1), date(2025, 2, 1), date(2025, 3, 1)]
        );
        assert_eq!(month_starts(date(2025, 6, 5), date(2025, 6, 20)).len(), 1);
        assert_eq!(month_starts(date(2024, 12, 5), date(2025, 1, 2)).len(), 2);
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!("12months".parse::<WindowPreset>(), Ok(WindowPreset::TwelveMonths));
        assert_eq!("ALL".parse::<WindowPreset>(), Ok(WindowPreset::All));
        assert!("2weeks".parse::<WindowPreset>().is_err());
        assert_eq!(
            serde_json::to_string(&WindowPreset::ThreeMonths).unwrap(),
            "\"3months\""
        );
    }
}
