//! Report CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_investment_report;
use crate::error::SpendResult;
use crate::reports::{AnalyticsReport, InvestmentReport, WindowPreset};
use crate::storage::Storage;

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Income, expenses and top categories over a window
    Analytics {
        /// Window to report on (defaults to the configured window)
        #[arg(short, long, value_enum)]
        window: Option<WindowPreset>,
        /// How many top categories to show
        #[arg(short, long)]
        top: Option<usize>,
    },
    /// Investment totals, ROI and recent activity
    Investments {
        /// How many recent investments to list
        #[arg(short, long)]
        recent: Option<usize>,
    },
}

pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
    today: NaiveDate,
) -> SpendResult<()> {
    match cmd {
        ReportCommands::Analytics { window, top } => {
            let report = AnalyticsReport::generate(
                storage,
                window.unwrap_or(settings.default_window),
                today,
                top.unwrap_or(settings.top_categories),
            )?;
            print!("{}", report.format_terminal(&settings.currency_symbol));
        }
        ReportCommands::Investments { recent } => {
            let transactions = storage.transactions.get_all()?;
            let report = InvestmentReport::generate(
                &transactions,
                today,
                recent.unwrap_or(settings.recent_investments),
            );
            print!(
                "{}",
                format_investment_report(&report, &settings.currency_symbol)
            );
        }
    }
    Ok(())
}
