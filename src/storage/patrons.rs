//! Patron repository
//!
//! In-memory roster of patrons keyed by ID. The repository is the only owner
//! of the collection; callers get cloned snapshots back.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{LmsError, LmsResult};
use crate::models::{Patron, ValidationError};

use super::import::{ImportError, ImportReport, LineDiagnostic, PatronLines};

/// Repository holding the in-memory patron roster
#[derive(Debug, Default)]
pub struct PatronRepository {
    /// Insertion order; IDs are unique
    patrons: Vec<Patron>,
}

impl PatronRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a patron, rejecting a duplicate ID
    pub fn add(&mut self, patron: Patron) -> Result<(), ValidationError> {
        if self.contains(patron.id()) {
            return Err(ValidationError::DuplicateId(patron.id().to_string()));
        }

        debug!(id = patron.id(), "added patron");
        self.patrons.push(patron);
        Ok(())
    }

    /// Remove the patron with the given ID
    ///
    /// Returns whether anything was removed.
    pub fn remove_by_id(&mut self, id: &str) -> bool {
        let before = self.patrons.len();
        self.patrons.retain(|p| p.id() != id);
        let removed = self.patrons.len() != before;

        if removed {
            debug!(id, "removed patron");
        }
        removed
    }

    /// Get a patron by ID
    pub fn get(&self, id: &str) -> Option<Patron> {
        self.patrons.iter().find(|p| p.id() == id).cloned()
    }

    /// Check whether a patron with the given ID exists
    pub fn contains(&self, id: &str) -> bool {
        self.patrons.iter().any(|p| p.id() == id)
    }

    /// Get all patrons sorted by ascending ID
    pub fn get_all(&self) -> Vec<Patron> {
        let mut patrons = self.patrons.clone();
        // Fixed-width digit IDs sort numerically under string ordering
        patrons.sort_by(|a, b| a.id().cmp(b.id()));
        patrons
    }

    /// Count patrons
    pub fn len(&self) -> usize {
        self.patrons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patrons.is_empty()
    }

    /// Load patrons from a file in the line import format
    ///
    /// Fails only when the file cannot be opened or read. Bad lines are
    /// skipped and reported in the returned [`ImportReport`].
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> LmsResult<ImportReport> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| LmsError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

        info!(path = %path.display(), "loading patrons");
        self.load_from_reader(BufReader::new(file))
    }

    /// Load patrons from any buffered reader in the line import format
    ///
    /// Accepted lines are added immediately, so a later line duplicating an
    /// earlier one is rejected. If reading fails midway the patrons accepted
    /// so far stay in the repository.
    pub fn load_from_reader<R: BufRead>(&mut self, reader: R) -> LmsResult<ImportReport> {
        let mut report = ImportReport::default();

        for parsed in PatronLines::new(reader) {
            let parsed = parsed.map_err(|e| {
                LmsError::Io(format!(
                    "Failed to read line {}: {}",
                    report.imported + report.rejected() + 1,
                    e
                ))
            })?;

            let result = parsed.outcome.and_then(|record| {
                let patron = Patron::new(&record.id, &record.name, &record.address, record.fine)?;
                self.add(patron).map_err(ImportError::from)
            });

            match result {
                Ok(()) => report.imported += 1,
                Err(error) => {
                    let diagnostic = LineDiagnostic {
                        line: parsed.line,
                        error,
                    };
                    debug!(line = diagnostic.line, error = %diagnostic.error, "rejected line");
                    report.diagnostics.push(diagnostic);
                }
            }
        }

        info!(
            imported = report.imported,
            rejected = report.rejected(),
            "patron load complete"
        );
        Ok(report)
    }
}
