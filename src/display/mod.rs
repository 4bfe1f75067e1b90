//! Display formatting for terminal output
//!
//! Provides utilities for formatting patrons and import results for
//! terminal display.

pub mod patron;

pub use patron::{format_import_report, format_patron_json, format_patron_list, PLAIN_HEADER};
