//! Budget display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::services::{BudgetAdvisory, BudgetAlert, BudgetOverview};

use super::format::{format_bar, format_percentage, format_status};

const BAR_WIDTH: usize = 10;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Format the budget overview as a table followed by totals
pub fn format_budget_overview(overview: &BudgetOverview, symbol: &str) -> String {
    if overview.lines.is_empty() {
        return "No budgets set. Use 'spendlog budget set <category> <limit>'.\n".to_string();
    }

    let rows = overview.lines.iter().map(|line| BudgetRow {
        category: line.budget.category().to_string(),
        limit: line.budget.limit().format_with_symbol(symbol),
        spent: line.budget.spent().format_with_symbol(symbol),
        remaining: line.remaining.format_with_symbol(symbol),
        used: format!(
            "{} {}",
            format_bar(line.percentage, 100.0, BAR_WIDTH),
            format_percentage(line.percentage)
        ),
        status: format_status(line.status),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(1..4), Alignment::right());

    let mut output = format!("{}\n", table);
    output.push_str(&format!(
        "Total budgeted: {}   Total spent: {}   Total income: {}\n",
        overview.total_limit.format_with_symbol(symbol),
        overview.total_spent.format_with_symbol(symbol),
        overview.total_income.format_with_symbol(symbol)
    ));
    output
}

pub fn format_budget_advisory(advisory: &BudgetAdvisory, symbol: &str) -> String {
    match advisory {
        BudgetAdvisory::WouldExceedIncome {
            over_by,
            total_limits,
            total_income,
        } => format!(
            "Warning: total budgets ({}) exceed total income ({}) by {}",
            total_limits.format_with_symbol(symbol),
            total_income.format_with_symbol(symbol),
            over_by.format_with_symbol(symbol)
        ),
    }
}

pub fn format_budget_alert(alert: &BudgetAlert, symbol: &str) -> String {
    format!(
        "Warning: '{}' is now over budget by {} ({} of {})",
        alert.category,
        alert.over_by.format_with_symbol(symbol),
        alert.projected.format_with_symbol(symbol),
        alert.limit.format_with_symbol(symbol)
    )
}

/// Expense categories without a budget, one per line
pub fn format_available_categories(categories: &[&str]) -> String {
    if categories.is_empty() {
        return "Every expense category already has a budget.\n".to_string();
    }
    let mut output = String::from("Categories without a budget:\n");
    for category in categories {
        output.push_str(&format!("  {}\n", category));
    }
    output
}
