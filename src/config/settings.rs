//! User settings for spendlog
//!
//! Display preferences and report defaults, stored as `config.json` in the
//! base directory.

use serde::{Deserialize, Serialize};

use super::paths::SpendPaths;
use crate::error::SpendError;
use crate::reports::WindowPreset;

/// User settings for spendlog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Analytics window used when none is given on the command line
    #[serde(default = "default_window")]
    pub default_window: WindowPreset,

    /// How many categories the analytics report ranks
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,

    /// How many investment transactions the investment report lists
    #[serde(default = "default_recent_investments")]
    pub recent_investments: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_window() -> WindowPreset {
    WindowPreset::SixMonths
}

fn default_top_categories() -> usize {
    5
}

fn default_recent_investments() -> usize {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_window: default_window(),
            top_categories: default_top_categories(),
            recent_investments: default_recent_investments(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &SpendPaths) -> Result<Self, SpendError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| SpendError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SpendError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SpendPaths) -> Result<(), SpendError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SpendError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SpendError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
