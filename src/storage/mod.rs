//! Storage layer for the LMS
//!
//! Provides the in-memory patron repository and the line-oriented import
//! format it loads from. Nothing is written back to disk.

pub mod import;
pub mod patrons;

pub use import::{
    parse_line, ImportError, ImportReport, LineDiagnostic, ParsedLine, PatronLines, RawRecord,
};
pub use patrons::PatronRepository;
