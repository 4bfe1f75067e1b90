//! Path management for the LMS
//!
//! ## Path Resolution Order
//!
//! 1. `LMS_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory from `directories`
//!    (`~/.config/lms-cli` on Linux, `%APPDATA%\lms\lms-cli\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::LmsError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "LMS_CLI_DATA_DIR";

/// Manages all paths used by the LMS
#[derive(Debug, Clone)]
pub struct LmsPaths {
    /// Base directory for all LMS files
    base_dir: PathBuf,
}

impl LmsPaths {
    /// Create a new LmsPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and the
    /// override variable is not set.
    pub fn new() -> Result<Self, LmsError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create LmsPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), LmsError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LmsError::Io(format!("Failed to create base directory: {}", e)))
    }

    /// Check if settings have been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, LmsError> {
    ProjectDirs::from("", "lms", "lms-cli")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| LmsError::Config("Could not determine a home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LmsPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(DATA_DIR_ENV, custom_path);
        let paths = LmsPaths::new().unwrap();
        env::remove_var(DATA_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("lms");
        let paths = LmsPaths::with_base_dir(base.clone());

        paths.ensure_directories().unwrap();

        assert!(base.is_dir());
    }
}
