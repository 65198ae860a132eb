//! User settings for equiptrack
//!
//! Controls how stock changes are labelled in the audit trail, whether an
//! anonymous operator may mutate data, and how history is presented.

use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::TrackerError;
use crate::storage::file_io::write_json_atomic;

/// How the previous stock is labelled in an update diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StockLabelPolicy {
    /// Previous stock shown as `Stock ID <id>`, new stock by name
    #[default]
    Legacy,
    /// Both sides resolved to names when the stock still exists
    Names,
}

impl StockLabelPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "legacy" => Some(Self::Legacy),
            "names" => Some(Self::Names),
            _ => None,
        }
    }
}

/// User settings for equiptrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub stock_label_policy: StockLabelPolicy,

    /// Whether an operator without a user account acts with full rights
    #[serde(default = "default_allow_anonymous")]
    pub allow_anonymous: bool,

    /// Default number of rows shown by history commands
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Timestamp format used in terminal output (strftime)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_allow_anonymous() -> bool {
    true
}

fn default_history_limit() -> usize {
    50
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            stock_label_policy: StockLabelPolicy::default(),
            allow_anonymous: default_allow_anonymous(),
            history_limit: default_history_limit(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| TrackerError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| TrackerError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.stock_label_policy, StockLabelPolicy::Legacy);
        assert!(settings.allow_anonymous);
        assert_eq!(settings.history_limit, 50);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.stock_label_policy = StockLabelPolicy::Names;
        settings.allow_anonymous = false;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.stock_label_policy, StockLabelPolicy::Names);
        assert!(!loaded.allow_anonymous);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"history_limit": 10}"#).unwrap();
        assert_eq!(settings.history_limit, 10);
        assert!(settings.allow_anonymous);
        assert_eq!(settings.date_format, "%Y-%m-%d %H:%M:%S");
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(StockLabelPolicy::parse("NAMES"), Some(StockLabelPolicy::Names));
        assert_eq!(StockLabelPolicy::parse("legacy"), Some(StockLabelPolicy::Legacy));
        assert_eq!(StockLabelPolicy::parse("other"), None);
    }
}
