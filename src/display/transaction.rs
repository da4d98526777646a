//! Transaction display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::Transaction;

use super::format::truncate;

const DESCRIPTION_WIDTH: usize = 32;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, symbol: &str, date_format: &str) -> Self {
        Self {
            id: txn.id.short().to_string(),
            date: txn.date.format(date_format).to_string(),
            kind: txn.kind.to_string(),
            category: txn.category.clone(),
            description: truncate(&txn.description, DESCRIPTION_WIDTH),
            amount: txn.signed_amount().format_with_symbol(symbol),
        }
    }
}

/// Format transactions as a table, one row each
pub fn format_transaction_table(
    transactions: &[Transaction],
    symbol: &str,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions
        .iter()
        .map(|t| TransactionRow::new(t, symbol, date_format));
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::last(), Alignment::right());

    format!("{}\n{} transaction(s)\n", table, transactions.len())
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, symbol: &str, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format(date_format)));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Description: {}\n", txn.description));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(symbol)
    ));

    output
}
