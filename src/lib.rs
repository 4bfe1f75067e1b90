//! LMS - library patron roster
//!
//! This library provides the core functionality for the `lms` command-line
//! tool: an in-memory roster of library patrons with validated records and a
//! tolerant bulk import from a dash-delimited text file.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Patron and fine types with their validation rules
//! - `storage`: The in-memory patron repository and the import line format
//! - `display`: Terminal formatting of listings and import summaries
//! - `cli`: Interactive menu and one-shot command handlers
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust
//! use lms_cli::models::{parse_fine, Patron};
//! use lms_cli::storage::PatronRepository;
//!
//! let mut repo = PatronRepository::new();
//! let fine = parse_fine("15.5").unwrap();
//! repo.add(Patron::new("0000001", "Jane Doe", "12 Elm St", fine).unwrap()).unwrap();
//! assert_eq!(repo.get_all()[0].to_string(), "0000001 | Jane Doe | 12 Elm St | 15.50");
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod storage;

pub use error::{LmsError, LmsResult};
