//! Configuration module for the LMS
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::LmsPaths;
pub use settings::{ListStyle, Settings};
