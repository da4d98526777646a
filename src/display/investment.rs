//! Investment report formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::reports::InvestmentReport;

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Invested")]
    invested: String,
    #[tabled(rename = "Returns")]
    returns: String,
    #[tabled(rename = "Net")]
    net: String,
}

pub fn format_investment_report(report: &InvestmentReport, symbol: &str) -> String {
    let m = &report.metrics;
    let mut output = String::new();

    output.push_str("Investment Tracker\n");
    output.push_str(&format!(
        "Invested: {}  Returns: {}  Net: {}  ROI: {:.2}%\n\n",
        m.invested.format_with_symbol(symbol),
        m.returns.format_with_symbol(symbol),
        m.net.format_with_symbol(symbol),
        m.roi
    ));

    let rows = report.monthly.iter().map(|month| MonthRow {
        month: month.label(),
        invested: month.invested.format_with_symbol(symbol),
        returns: month.returns.format_with_symbol(symbol),
        net: month.net.format_with_symbol(symbol),
    });
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    output.push_str(&format!("{}\n", table));

    output.push_str("\nRecent investments\n");
    if report.recent.is_empty() {
        output.push_str("  none recorded\n");
    }
    for txn in &report.recent {
        output.push_str(&format!(
            "  {}  {:<8} {:<30} {}\n",
            txn.date,
            txn.kind,
            txn.description,
            txn.amount.format_with_symbol(symbol)
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_report_renders() {
        let report = InvestmentReport::generate(&[], NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(), 5);
        let text = format_investment_report(&report, "$");
        assert!(text.contains("ROI: 0.00%"));
        assert!(text.contains("Mar 2025"));
        assert!(text.contains("none recorded"));
    }
}
