//! Export module for spendlog
//!
//! - CSV: the full ledger and the summary report
//! - JSON: machine-readable snapshot of both collections
//! - YAML: the same snapshot for reading by people

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_ledger_csv, export_summary_csv, ExportRange, LEDGER_HEADER};
pub use json::{export_full_json, import_from_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, import_from_yaml};
