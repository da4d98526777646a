//! Budget CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_available_categories, format_budget_advisory, format_budget_overview};
use crate::error::SpendResult;
use crate::models::{find_category, TransactionKind};
use crate::services::BudgetService;
use crate::storage::Storage;

use super::transaction::parse_amount;

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Set the spending limit for an expense category
    Set {
        /// Expense category (case-insensitive)
        category: String,
        /// Limit, e.g. "500"
        limit: String,
    },
    /// Show all budgets with spend and status
    List,
    /// Show expense categories that have no budget yet
    Available,
}

pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> SpendResult<()> {
    let service = BudgetService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        BudgetCommands::Set { category, limit } => {
            let category = find_category(TransactionKind::Expense, &category)
                .map(str::to_string)
                .unwrap_or(category);
            let limit = parse_amount(&limit)?;

            let outcome = service.set_limit(&category, limit)?;
            let verb = if outcome.created { "Created" } else { "Updated" };
            println!(
                "{} budget for {}: {} (spent {}, {})",
                verb,
                outcome.budget.category(),
                outcome.budget.limit().format_with_symbol(symbol),
                outcome.budget.spent().format_with_symbol(symbol),
                outcome.budget.status()
            );
            if let Some(advisory) = outcome.advisory {
                println!("{}", format_budget_advisory(&advisory, symbol));
            }
        }
        BudgetCommands::List => {
            print!("{}", format_budget_overview(&service.overview()?, symbol));
        }
        BudgetCommands::Available => {
            print!(
                "{}",
                format_available_categories(&service.available_categories()?)
            );
        }
    }

    Ok(())
}
