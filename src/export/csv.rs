//! CSV Export functionality
//!
//! Writes the full ledger (one row per transaction) and the summary report
//! (totals followed by a per-category expense breakdown).

use std::io::Write;

use chrono::{Days, NaiveDate};
use clap::ValueEnum;

use crate::error::{SpendError, SpendResult};
use crate::models::{Money, Transaction};
use crate::reports::category_totals;

/// Header row of the ledger export
pub const LEDGER_HEADER: &str = "Date,Type,Category,Description,Amount";

/// How far back an export reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportRange {
    #[default]
    All,
    #[value(name = "30days")]
    Days30,
    #[value(name = "90days")]
    Days90,
    #[value(name = "365days")]
    Days365,
}

impl ExportRange {
    pub fn days(&self) -> Option<u64> {
        match self {
            Self::All => None,
            Self::Days30 => Some(30),
            Self::Days90 => Some(90),
            Self::Days365 => Some(365),
        }
    }

    /// Transactions dated on or after `today - days`, in their original order
    pub fn select(&self, transactions: &[Transaction], today: NaiveDate) -> Vec<Transaction> {
        let cutoff = self.days().and_then(|d| today.checked_sub_days(Days::new(d)));
        transactions
            .iter()
            .filter(|t| cutoff.map_or(true, |c| t.date >= c))
            .cloned()
            .collect()
    }
}

/// Export transactions as the full ledger
///
/// Descriptions are always quoted; amounts have two decimals.
pub fn export_ledger_csv<W: Write + ?Sized>(
    transactions: &[Transaction],
    writer: &mut W,
) -> SpendResult<()> {
    writeln!(writer, "{}", LEDGER_HEADER).map_err(|e| SpendError::Export(e.to_string()))?;

    for txn in transactions {
        writeln!(
            writer,
            "{},{},{},{},{}",
            txn.date,
            txn.kind,
            escape_csv(&txn.category),
            quote_csv(&txn.description),
            txn.amount
        )
        .map_err(|e| SpendError::Export(e.to_string()))?;
    }

    Ok(())
}

/// Export totals and the expense breakdown by category
pub fn export_summary_csv<W: Write + ?Sized>(
    transactions: &[Transaction],
    writer: &mut W,
) -> SpendResult<()> {
    let total_income: Money = transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum();
    let total_expenses: Money = transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum();

    let mut write_line = |line: String| {
        writeln!(writer, "{}", line).map_err(|e| SpendError::Export(e.to_string()))
    };

    write_line("Summary".to_string())?;
    write_line(format!("Total Income,{}", total_income))?;
    write_line(format!("Total Expenses,{}", total_expenses))?;
    write_line(format!("Net Worth,{}", total_income - total_expenses))?;
    write_line(String::new())?;
    write_line("Category Breakdown".to_string())?;

    for total in category_totals(transactions) {
        write_line(format!("{},{}", escape_csv(&total.category), total.amount))?;
    }

    Ok(())
}

/// Quote a field only when it needs it
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        quote_csv(s)
    } else {
        s.to_string()
    }
}

fn quote_csv(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionId, TransactionInput};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::from_input(
                TransactionId::from("t1"),
                TransactionInput::income(Money::from_cents(250_000), "Salary", "March pay", date(2025, 3, 1)),
            ),
            Transaction::from_input(
                TransactionId::from("t2"),
                TransactionInput::expense(
                    Money::from_cents(4_550),
                    "Food & Dining",
                    "Dinner at \"Luigi's\"",
                    date(2025, 3, 2),
                ),
            ),
            Transaction::from_input(
                TransactionId::from("t3"),
                TransactionInput::expense(Money::from_cents(120_000), "Rent", "March rent", date(2025, 3, 3)),
            ),
            Transaction::from_input(
                TransactionId::from("t4"),
                TransactionInput::expense(Money::from_cents(1_005), "Food & Dining", "Coffee", date(2025, 3, 4)),
            ),
        ]
    }

    #[test]
    fn test_export_ledger_csv() {
        let mut out = Vec::new();
        export_ledger_csv(&sample(), &mut out).unwrap();

        let csv = String::from_utf8(out).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], LEDGER_HEADER);
        assert_eq!(lines[1], "2025-03-01,income,Salary,\"March pay\",2500.00");
        assert_eq!(
            lines[2],
            "2025-03-02,expense,Food & Dining,\"Dinner at \"\"Luigi's\"\"\",45.50"
        );
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_export_summary_csv() {
        let mut out = Vec::new();
        export_summary_csv(&sample(), &mut out).unwrap();

        let csv = String::from_utf8(out).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Summary",
                "Total Income,2500.00",
                "Total Expenses,1255.55",
                "Net Worth,1244.45",
                "",
                "Category Breakdown",
                "Food & Dining,55.55",
                "Rent,1200.00",
            ]
        );
    }

    #[test]
    fn test_export_range_select() {
        let today = date(2025, 4, 1);
        let txns = sample();
        assert_eq!(ExportRange::All.select(&txns, today).len(), 4);
        // Cutoff 2025-03-02
        let recent = ExportRange::Days30.select(&txns, today);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].id.as_str(), "t2");
    }

    #[test]
    fn test_parsed_back_by_importer() {
        let mut out = Vec::new();
        export_ledger_csv(&sample(), &mut out).unwrap();

        let (inputs, errors) = crate::services::import::parse_ledger(out.as_slice()).unwrap();
        assert!(errors.is_empty());
        let originals: Vec<_> = sample().iter().map(|t| t.to_input()).collect();
        assert_eq!(inputs, originals);
    }
}
