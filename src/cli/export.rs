//! CLI commands for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};

use crate::error::{SpendError, SpendResult};
use crate::export::{
    export_full_json, export_full_yaml, export_ledger_csv, export_summary_csv, ExportRange,
};
use crate::storage::Storage;

/// Snapshot format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Every transaction as CSV (Date,Type,Category,Description,Amount)
    Ledger {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = ExportRange::All)]
        range: ExportRange,
    },
    /// Totals and category breakdown as CSV
    Summary {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = ExportRange::All)]
        range: ExportRange,
    },
    /// Full snapshot of transactions and budgets
    Snapshot {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value = "json")]
        format: SnapshotFormat,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

pub fn handle_export_command(
    storage: &Storage,
    cmd: ExportCommands,
    today: NaiveDate,
) -> SpendResult<()> {
    match cmd {
        ExportCommands::Ledger { output, range } => {
            let transactions = range.select(&storage.transactions.get_all()?, today);
            with_output(output.as_deref(), |w| export_ledger_csv(&transactions, w))?;
            report_written(output.as_deref(), transactions.len());
        }
        ExportCommands::Summary { output, range } => {
            let transactions = range.select(&storage.transactions.get_all()?, today);
            with_output(output.as_deref(), |w| export_summary_csv(&transactions, w))?;
            report_written(output.as_deref(), transactions.len());
        }
        ExportCommands::Snapshot {
            output,
            format,
            pretty,
        } => {
            with_output(output.as_deref(), |w| match format {
                SnapshotFormat::Json => export_full_json(storage, w, pretty),
                SnapshotFormat::Yaml => export_full_yaml(storage, w),
            })?;
            report_written(output.as_deref(), storage.transactions.count()?);
        }
    }
    Ok(())
}

/// Run `write` against the output file, or stdout when there is none
fn with_output<F>(output: Option<&Path>, write: F) -> SpendResult<()>
where
    F: FnOnce(&mut dyn Write) -> SpendResult<()>,
{
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                SpendError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write(&mut writer)?;
            writer
                .flush()
                .map_err(|e| SpendError::Export(e.to_string()))
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write(&mut lock)?;
            lock.flush().map_err(|e| SpendError::Export(e.to_string()))
        }
    }
}

fn report_written(output: Option<&Path>, count: usize) {
    if let Some(path) = output {
        println!("Exported {} transaction(s) to {}", count, path.display());
    }
}
