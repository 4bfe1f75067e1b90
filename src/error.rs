//! Custom error types for the LMS
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Model-level errors live next to the
//! models and are reported per record, so they never become an `LmsError`.

use thiserror::Error;

/// The main error type for LMS operations
#[derive(Error, Debug)]
pub enum LmsError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl LmsError {
    /// Check if this is an I/O error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

impl From<std::io::Error> for LmsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LmsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for LMS operations
pub type LmsResult<T> = Result<T, LmsError>;
