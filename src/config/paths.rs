//! Path management for spendlog
//!
//! ## Path Resolution Order
//!
//! 1. `SPENDLOG_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory for `spendlog`
//!    (`~/.config/spendlog` on Linux, `~/Library/Application Support/spendlog`
//!    on macOS, `%APPDATA%\spendlog\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::SpendError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "SPENDLOG_DATA_DIR";

/// Manages all paths used by spendlog
#[derive(Debug, Clone)]
pub struct SpendPaths {
    /// Base directory for all spendlog data
    base_dir: PathBuf,
}

impl SpendPaths {
    /// Create a new SpendPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and no
    /// override is set.
    pub fn new() -> Result<Self, SpendError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create SpendPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the persisted transaction collection
    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Get the path to the persisted budget collection
    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), SpendError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SpendError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SpendError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, SpendError> {
    ProjectDirs::from("", "", "spendlog")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| SpendError::Config("Could not determine a home directory".into()))
}
