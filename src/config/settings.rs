//! User settings for the LMS
//!
//! Manages presentation and startup preferences. Domain rules (ID length,
//! fine bounds) are compile-time constants and are not configurable.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::LmsPaths;
use crate::error::LmsError;

/// How patron listings are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    /// `id | name | address | fine` lines under a header (default)
    #[default]
    Plain,
    /// Aligned table
    Table,
}

/// User settings for the LMS
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Listing style for the menu and the import command
    #[serde(default)]
    pub list_style: ListStyle,

    /// Patron file loaded before the interactive menu starts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup_file: Option<PathBuf>,

    /// Default tracing filter when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_log_filter() -> String {
    "lms_cli=warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            list_style: ListStyle::default(),
            startup_file: None,
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &LmsPaths) -> Result<Self, LmsError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LmsError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| LmsError::Config(format!("Failed to parse settings file: {}", e)))?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LmsPaths) -> Result<(), LmsError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LmsError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LmsError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
