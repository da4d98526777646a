//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod export;
pub mod import;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use export::{handle_export_command, ExportCommands};
pub use import::handle_import_command;
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{
    handle_add, handle_delete, handle_edit, handle_list, handle_show, AddArgs, EditArgs, ListArgs,
};
