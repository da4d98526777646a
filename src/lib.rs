//! spendlog - personal income and expense tracker
//!
//! This library provides the core of the `spendlog` command line tool. It
//! keeps a log of income and expense transactions, derives how much of each
//! category budget has been spent, and computes windowed analytics and
//! exports from that log.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, budgets, money, categories)
//! - `storage`: JSON file storage layer
//! - `services`: Transaction store, budget operations and CSV import
//! - `reports`: Windowed analytics and the investment tracker
//! - `export`: CSV exports and JSON/YAML snapshots
//! - `display`: Terminal tables
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use spendlog::config::{paths::SpendPaths, settings::Settings};
//! use spendlog::storage::Storage;
//!
//! let paths = SpendPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{SpendError, SpendResult};
