//! Line-oriented patron import format
//!
//! Each line holds one record, `<id>-<name>-<address>-<fine>`. The line is
//! split on the first three `-` characters, so the fine field keeps any
//! further dashes and fails number parsing if it has any.
//!
//! [`PatronLines`] turns a reader into a lazy sequence of per-line outcomes.
//! Lines end at `\n`, `\r\n` or a lone `\r`, and bytes that are not valid
//! UTF-8 are decoded lossily. It only checks the record shape and the fine
//! literal; patron validation and duplicate detection happen when the
//! repository folds the sequence.

use std::fmt;
use std::io::{self, BufRead};

use thiserror::Error;

use crate::models::{parse_fine, FineAmount, ValidationError};

/// Field delimiter of the import format
pub const FIELD_DELIMITER: char = '-';

/// Number of fields in a well-formed line
pub const FIELD_COUNT: usize = 4;

/// A well-formed line with trimmed fields and a parsed fine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub id: String,
    pub name: String,
    pub address: String,
    pub fine: FineAmount,
}

/// Why a single import line was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("malformed entry, expected 4 fields but got {found}")]
    Malformed { found: usize },

    #[error("invalid number format → {0}")]
    InvalidNumber(String),

    #[error("validation error → {0}")]
    Validation(String),
}

impl From<ValidationError> for ImportError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// A rejected line, tagged with its 1-based line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiagnostic {
    pub line: usize,
    pub error: ImportError,
}

impl fmt::Display for LineDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line, self.error)
    }
}

/// Outcome of parsing one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub line: usize,
    pub outcome: Result<RawRecord, ImportError>,
}

/// Summary of a completed load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Number of patrons added to the repository
    pub imported: usize,
    /// One entry per rejected line, in line order
    pub diagnostics: Vec<LineDiagnostic>,
}

impl ImportReport {
    /// Number of rejected lines
    pub fn rejected(&self) -> usize {
        self.diagnostics.len()
    }
}

/// Parse one line of the import format
pub fn parse_line(text: &str) -> Result<RawRecord, ImportError> {
    let fields: Vec<&str> = text.splitn(FIELD_COUNT, FIELD_DELIMITER).collect();
    if fields.len() != FIELD_COUNT {
        return Err(ImportError::Malformed {
            found: fields.len(),
        });
    }

    let fine =
        parse_fine(fields[3].trim()).map_err(|e| ImportError::InvalidNumber(e.to_string()))?;

    Ok(RawRecord {
        id: fields[0].trim().to_string(),
        name: fields[1].trim().to_string(),
        address: fields[2].trim().to_string(),
        fine,
    })
}

/// Lazy per-line parser over a buffered reader
///
/// Yields `Err` only when the underlying reader fails; malformed lines and
/// undecodable bytes are reported through [`ParsedLine::outcome`].
pub struct PatronLines<R> {
    reader: R,
    line_number: usize,
    /// The previous line ended in `\r`, so a leading `\n` belongs to it
    skip_newline: bool,
}

impl<R: BufRead> PatronLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            skip_newline: false,
        }
    }

    /// Read the raw bytes of the next line without its terminator
    fn read_line_bytes(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        let mut started = false;

        loop {
            let available = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                return Ok(started.then_some(line));
            }

            if self.skip_newline {
                self.skip_newline = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(end) => {
                    self.skip_newline = available[end] == b'\r';
                    line.extend_from_slice(&available[..end]);
                    self.reader.consume(end + 1);
                    return Ok(Some(line));
                }
                None => {
                    let len = available.len();
                    line.extend_from_slice(available);
                    self.reader.consume(len);
                    started = true;
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for PatronLines<R> {
    type Item = io::Result<ParsedLine>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = match self.read_line_bytes() {
            Ok(bytes) => bytes?,
            Err(e) => return Some(Err(e)),
        };
        self.line_number += 1;

        let text = String::from_utf8_lossy(&bytes);
        Some(Ok(ParsedLine {
            line: self.line_number,
            outcome: parse_line(&text),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_well_formed_line() {
        let record = parse_line(" 0000001 - Jane Doe -12 Elm St- 15.5 ").unwrap();
        assert_eq!(record.id, "0000001");
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.address, "12 Elm St");
        assert_eq!(record.fine, FineAmount::Exact(rust_decimal::Decimal::new(155, 1)));
    }

    #[test]
    fn test_field_count() {
        assert_eq!(
            parse_line("0000001-Jane-Elm"),
            Err(ImportError::Malformed { found: 3 })
        );
        assert_eq!(parse_line(""), Err(ImportError::Malformed { found: 1 }));
        assert_eq!(
            parse_line("no delimiters here"),
            Err(ImportError::Malformed { found: 1 })
        );
    }

    #[test]
    fn test_extra_dashes_stay_in_fine_field() {
        let err = parse_line("0000001-Jane-Elm St-1.00-extra").unwrap_err();
        assert!(matches!(err, ImportError::InvalidNumber(_)));
    }

    #[test]
    fn test_invalid_number() {
        let err = parse_line("0000001-Jane-Elm St-ten").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid number format → Invalid fine amount: ten"
        );
    }

    #[test]
    fn test_empty_fields() {
        // "0000002-Bob--300.00" splits into id, name, empty address, fine
        assert!(parse_line("0000002-Bob--300.00").is_ok());
        assert!(matches!(
            parse_line("0000002-Bob-Addr-"),
            Err(ImportError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = LineDiagnostic {
            line: 4,
            error: ImportError::Malformed { found: 2 },
        };
        assert_eq!(
            diag.to_string(),
            "Line 4: malformed entry, expected 4 fields but got 2"
        );

        let diag = LineDiagnostic {
            line: 9,
            error: ValidationError::InvalidId.into(),
        };
        assert_eq!(
            diag.to_string(),
            "Line 9: validation error → ID must be exactly 7 digits"
        );
    }

    #[test]
    fn test_lines_are_numbered_from_one() {
        let input = "0000001-A-B-1\r\nbad\n\n0000002-C-D-x\n";
        let parsed: Vec<ParsedLine> = PatronLines::new(Cursor::new(input))
            .collect::<io::Result<_>>()
            .unwrap();

        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed[0].line, 1);
        assert!(parsed[0].outcome.is_ok());
        assert_eq!(parsed[1].outcome, Err(ImportError::Malformed { found: 1 }));
        assert_eq!(parsed[2].line, 3);
        assert_eq!(parsed[2].outcome, Err(ImportError::Malformed { found: 1 }));
        assert!(matches!(parsed[3].outcome, Err(ImportError::InvalidNumber(_))));
    }

    #[test]
    fn test_report_counts() {
        let report = ImportReport {
            imported: 2,
            diagnostics: vec![LineDiagnostic {
                line: 1,
                error: ImportError::Malformed { found: 1 },
            }],
        };
        assert_eq!(report.rejected(), 1);
        assert_eq!(ImportReport::default().rejected(), 0);
    }

    #[test]
    fn test_carriage_return_ends_a_line() {
        let parsed: Vec<ParsedLine> =
            PatronLines::new(Cursor::new("0000001-A-B-1\r0000002-C-D-2\r"))
                .collect::<io::Result<_>>()
                .unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].line, 2);
        assert_eq!(parsed[1].outcome.as_ref().unwrap().id, "0000002");
    }

    #[test]
    fn test_mixed_line_endings() {
        let input = "0000001-A-B-1\r\n0000002-C-D-2\r\r\n0000003-E-F-3\n\r0000004-G-H-4";
        let parsed: Vec<ParsedLine> = PatronLines::new(Cursor::new(input))
            .collect::<io::Result<_>>()
            .unwrap();

        let ids: Vec<Option<&str>> = parsed
            .iter()
            .map(|p| p.outcome.as_ref().ok().map(|r| r.id.as_str()))
            .collect();
        assert_eq!(
            ids,
            vec![
                Some("0000001"),
                Some("0000002"),
                None,
                Some("0000003"),
                None,
                Some("0000004"),
            ]
        );
        assert_eq!(parsed[5].line, 6);
    }

    #[test]
    fn test_line_ending_split_across_buffer_fill() {
        // A one-byte buffer puts the \r and \n of a CRLF in separate fills
        let input = Cursor::new("0000001-A-B-1\r\n0000002-C-D-2");
        let reader = io::BufReader::with_capacity(1, input);
        let parsed: Vec<ParsedLine> = PatronLines::new(reader)
            .collect::<io::Result<_>>()
            .unwrap();

        assert_eq!(parsed.len(), 2);
        assert!(parsed.iter().all(|p| p.outcome.is_ok()));
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let input: &[u8] = b"0000001-A-B-1\n0000002-Jos\xE9-Addr-1\n";
        let parsed: Vec<ParsedLine> = PatronLines::new(input)
            .collect::<io::Result<_>>()
            .unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].outcome.as_ref().unwrap().name, "Jos\u{FFFD}");
    }
}
