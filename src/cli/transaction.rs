//! Transaction CLI commands
//!
//! `add`, `list`, `show`, `edit` and `delete`.

use chrono::NaiveDate;
use clap::Args;
use tracing::debug;

use crate::config::settings::Settings;
use crate::display::{format_budget_alert, format_transaction_details, format_transaction_table};
use crate::error::{SpendError, SpendResult};
use crate::models::{find_category, Money, TransactionInput, TransactionKind};
use crate::services::{BudgetService, LedgerRange, TransactionFilter, TransactionService};
use crate::storage::Storage;

/// Arguments for `add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Amount, e.g. "12.50"
    pub amount: String,
    /// Category (case-insensitive)
    pub category: String,
    /// What the money was for
    pub description: String,
    /// Record income instead of an expense
    #[arg(short, long)]
    pub income: bool,
    /// Transaction date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Arguments for `list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Match description or category
    #[arg(short, long)]
    pub search: Option<String>,
    /// Only this category
    #[arg(short, long)]
    pub category: Option<String>,
    /// Only income or only expenses
    #[arg(short, long, value_enum)]
    pub kind: Option<TransactionKind>,
    /// Date range
    #[arg(short, long, value_enum, default_value_t = LedgerRange::All)]
    pub range: LedgerRange,
    /// Number of transactions to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for `edit`
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Transaction ID or unique prefix
    pub id: String,
    #[arg(short, long)]
    pub amount: Option<String>,
    #[arg(short, long)]
    pub category: Option<String>,
    #[arg(short = 'D', long)]
    pub description: Option<String>,
    /// New date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,
    #[arg(short, long, value_enum)]
    pub kind: Option<TransactionKind>,
}

pub fn handle_add(
    storage: &Storage,
    settings: &Settings,
    args: AddArgs,
    today: NaiveDate,
) -> SpendResult<()> {
    let kind = if args.income {
        TransactionKind::Income
    } else {
        TransactionKind::Expense
    };
    let amount = parse_amount(&args.amount)?;
    let date = match args.date {
        Some(ref s) => parse_date(s)?,
        None => today,
    };
    let category = canonical_category(kind, &args.category);

    let input = TransactionInput::new(kind, amount, category, args.description, date);
    input
        .validate()
        .map_err(|e| SpendError::Validation(e.to_string()))?;

    let alert = if kind == TransactionKind::Expense {
        BudgetService::new(storage).expense_alert(&input.category, amount, None)?
    } else {
        None
    };

    let txn = TransactionService::new(storage).add(input)?;
    debug!(id = %txn.id, "add command complete");

    println!("Added {}:", txn.kind);
    print!(
        "{}",
        format_transaction_details(&txn, &settings.currency_symbol, &settings.date_format)
    );
    if let Some(alert) = alert {
        println!("{}", format_budget_alert(&alert, &settings.currency_symbol));
    }
    Ok(())
}

pub fn handle_list(
    storage: &Storage,
    settings: &Settings,
    args: ListArgs,
    today: NaiveDate,
) -> SpendResult<()> {
    let mut filter = TransactionFilter::new().range(args.range);
    if let Some(search) = args.search {
        filter = filter.search(search);
    }
    if let Some(category) = args.category {
        let resolved = match args.kind {
            Some(kind) => canonical_category(kind, &category),
            None => find_category(TransactionKind::Expense, &category)
                .or_else(|| find_category(TransactionKind::Income, &category))
                .map(str::to_string)
                .unwrap_or(category),
        };
        filter = filter.category(resolved);
    }
    if let Some(kind) = args.kind {
        filter = filter.kind(kind);
    }
    if let Some(limit) = args.limit {
        filter = filter.limit(limit);
    }

    let transactions = TransactionService::new(storage).list_filtered(&filter, today)?;
    print!(
        "{}",
        format_transaction_table(&transactions, &settings.currency_symbol, &settings.date_format)
    );
    Ok(())
}

pub fn handle_show(storage: &Storage, settings: &Settings, id: &str) -> SpendResult<()> {
    let txn = TransactionService::new(storage).find(id)?;
    print!(
        "{}",
        format_transaction_details(&txn, &settings.currency_symbol, &settings.date_format)
    );
    Ok(())
}

pub fn handle_edit(storage: &Storage, settings: &Settings, args: EditArgs) -> SpendResult<()> {
    let service = TransactionService::new(storage);
    let existing = service.find(&args.id)?;
    let mut input = existing.to_input();

    if let Some(kind) = args.kind {
        input.kind = kind;
    }
    if let Some(ref amount) = args.amount {
        input.amount = parse_amount(amount)?;
    }
    if let Some(category) = args.category {
        input.category = category;
    }
    input.category = canonical_category(input.kind, &input.category);
    if let Some(description) = args.description {
        input.description = description;
    }
    if let Some(ref date) = args.date {
        input.date = parse_date(date)?;
    }

    input
        .validate()
        .map_err(|e| SpendError::Validation(e.to_string()))?;

    let alert = if input.kind == TransactionKind::Expense {
        BudgetService::new(storage).expense_alert(&input.category, input.amount, Some(&existing.id))?
    } else {
        None
    };

    let txn = service.update(&existing.id, input)?;

    println!("Updated transaction:");
    print!(
        "{}",
        format_transaction_details(&txn, &settings.currency_symbol, &settings.date_format)
    );
    if let Some(alert) = alert {
        println!("{}", format_budget_alert(&alert, &settings.currency_symbol));
    }
    Ok(())
}

pub fn handle_delete(storage: &Storage, id: &str) -> SpendResult<()> {
    let service = TransactionService::new(storage);
    let txn = service.find(id)?;
    let removed = service.delete(&txn.id)?;
    println!("Deleted transaction {} ({})", removed.id, removed.description);
    Ok(())
}

/// Canonical spelling of a known category, or the input unchanged
fn canonical_category(kind: TransactionKind, category: &str) -> String {
    find_category(kind, category)
        .map(str::to_string)
        .unwrap_or_else(|| category.trim().to_string())
}

pub(crate) fn parse_amount(s: &str) -> SpendResult<Money> {
    Money::parse(s).map_err(|e| {
        SpendError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '12.50'. Error: {}",
            s, e
        ))
    })
}

fn parse_date(s: &str) -> SpendResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        SpendError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
    })
}
