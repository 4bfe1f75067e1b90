//! Patron display formatting
//!
//! Formats patron listings and import summaries for terminal output.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::ListStyle;
use crate::error::LmsResult;
use crate::models::Patron;
use crate::storage::ImportReport;

/// Header line of the plain listing
pub const PLAIN_HEADER: &str = "ID | Name | Address | Fine";

#[derive(Tabled)]
struct PatronRow<'a> {
    #[tabled(rename = "ID")]
    id: &'a str,
    #[tabled(rename = "Name")]
    name: &'a str,
    #[tabled(rename = "Address")]
    address: &'a str,
    #[tabled(rename = "Fine")]
    fine: String,
}

impl<'a> From<&'a Patron> for PatronRow<'a> {
    fn from(patron: &'a Patron) -> Self {
        Self {
            id: patron.id(),
            name: patron.name(),
            address: patron.address(),
            fine: patron.fine().to_string(),
        }
    }
}

/// Format a patron listing in the given style
pub fn format_patron_list(patrons: &[Patron], style: ListStyle) -> String {
    if patrons.is_empty() {
        return "No patrons.".to_string();
    }

    match style {
        ListStyle::Plain => {
            let mut output = String::from(PLAIN_HEADER);
            for patron in patrons {
                output.push('\n');
                output.push_str(&patron.to_string());
            }
            output
        }
        ListStyle::Table => {
            let rows: Vec<PatronRow<'_>> = patrons.iter().map(PatronRow::from).collect();
            Table::new(rows).with(Style::psql()).to_string()
        }
    }
}

/// Format a patron listing as a pretty JSON array
pub fn format_patron_json(patrons: &[Patron]) -> LmsResult<String> {
    Ok(serde_json::to_string_pretty(patrons)?)
}

/// One-line summary of an import
pub fn format_import_report(report: &ImportReport) -> String {
    format!(
        "Imported {} patron(s), {} line(s) rejected.",
        report.imported,
        report.rejected()
    )
}
