use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use spendlog::cli::{
    handle_add, handle_budget_command, handle_delete, handle_edit, handle_export_command,
    handle_import_command, handle_list, handle_report_command, handle_show, AddArgs,
    BudgetCommands, EditArgs, ExportCommands, ListArgs, ReportCommands,
};
use spendlog::config::{paths::SpendPaths, settings::Settings};
use spendlog::storage::Storage;

/// Env filter that overrides `--log-level`
const LOG_ENV: &str = "SPENDLOG_LOG";

#[derive(Parser)]
#[command(
    name = "spendlog",
    version,
    about = "Track income and expenses, set category budgets, see where the money goes",
    long_about = "spendlog keeps a local log of income and expense transactions. \
                  Budgets track how much of each expense category has been spent, \
                  and reports summarise income, spending and investments over time."
)]
struct Cli {
    /// Log verbosity (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record an expense (or income with --income)
    Add(AddArgs),

    /// List transactions, newest first
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one transaction
    Show {
        /// Transaction ID or unique prefix
        id: String,
    },

    /// Change fields of a transaction
    Edit(EditArgs),

    /// Delete a transaction
    #[command(alias = "rm")]
    Delete {
        /// Transaction ID or unique prefix
        id: String,
    },

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Analytics and investment reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export data as CSV, JSON or YAML
    #[command(subcommand)]
    Export(ExportCommands),

    /// Import transactions from a ledger CSV
    Import {
        /// Path to CSV file
        file: PathBuf,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_level);

    let paths = SpendPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let today = chrono::Local::now().date_naive();

    match cli.command {
        Some(Commands::Add(args)) => {
            debug!("dispatching add");
            handle_add(&storage, &settings, args, today)?;
        }
        Some(Commands::List(args)) => {
            debug!("dispatching list");
            handle_list(&storage, &settings, args, today)?;
        }
        Some(Commands::Show { id }) => handle_show(&storage, &settings, &id)?,
        Some(Commands::Edit(args)) => {
            debug!("dispatching edit");
            handle_edit(&storage, &settings, args)?;
        }
        Some(Commands::Delete { id }) => {
            debug!("dispatching delete");
            handle_delete(&storage, &id)?;
        }
        Some(Commands::Budget(cmd)) => {
            debug!(?cmd, "dispatching budget");
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            debug!(?cmd, "dispatching report");
            handle_report_command(&storage, &settings, cmd, today)?;
        }
        Some(Commands::Export(cmd)) => {
            debug!(?cmd, "dispatching export");
            handle_export_command(&storage, cmd, today)?;
        }
        Some(Commands::Import { file }) => {
            debug!(file = %file.display(), "dispatching import");
            handle_import_command(&storage, &file)?;
        }
        Some(Commands::Config) => {
            println!("spendlog configuration");
            println!("======================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Transactions file: {}", paths.transactions_file().display());
            println!("Budgets file:      {}", paths.budgets_file().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:    {}", settings.currency_symbol);
            println!("  Date format:        {}", settings.date_format);
            println!("  Default window:     {}", settings.default_window);
            println!("  Top categories:     {}", settings.top_categories);
            println!("  Recent investments: {}", settings.recent_investments);
        }
        None => {
            println!("spendlog - personal income and expense tracker");
            println!();
            println!("Run 'spendlog --help' for usage information.");
        }
    }

    Ok(())
}

/// Initializes the tracing subscriber, writing to stderr
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var(LOG_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::new(directives),
        _ => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
