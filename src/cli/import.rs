//! CLI command handler for one-shot patron import
//!
//! Loads a single file into a fresh repository, reports rejected lines on
//! stderr and prints the resulting roster.

use std::path::Path;

use crate::config::Settings;
use crate::display::{format_import_report, format_patron_json, format_patron_list};
use crate::error::LmsResult;
use crate::storage::{ImportReport, PatronRepository};

/// Handle the import command
///
/// Only an unreadable file is an error; rejected lines are reported and
/// counted in the returned report.
pub fn handle_import_command(
    settings: &Settings,
    file: &Path,
    json: bool,
) -> LmsResult<ImportReport> {
    let mut repo = PatronRepository::new();
    let report = repo.load_from_file(file)?;

    for diagnostic in &report.diagnostics {
        eprintln!("{}", diagnostic);
    }

    let patrons = repo.get_all();
    if json {
        println!("{}", format_patron_json(&patrons)?);
    } else {
        println!("{}", format_import_report(&report));
        println!("{}", format_patron_list(&patrons, settings.list_style));
    }

    Ok(report)
}
