//! Interactive patron menu
//!
//! A numbered text menu over a [`PatronRepository`]. Input, output and error
//! streams are injected so the loop can be driven from tests; the binary
//! wires them to stdin, stdout and stderr.

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::config::ListStyle;
use crate::display::{format_import_report, format_patron_list};
use crate::models::{is_valid_id, parse_fine, FineAmount, Patron, ID_LENGTH};
use crate::storage::PatronRepository;

/// Whether the loop keeps going after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive menu bound to a repository and a set of streams
pub struct Menu<'a, R, W, E> {
    repo: &'a mut PatronRepository,
    input: R,
    out: W,
    err: E,
    style: ListStyle,
}

impl<'a, R: BufRead, W: Write, E: Write> Menu<'a, R, W, E> {
    pub fn new(
        repo: &'a mut PatronRepository,
        input: R,
        out: W,
        err: E,
        style: ListStyle,
    ) -> Self {
        Self {
            repo,
            input,
            out,
            err,
            style,
        }
    }

    /// Run until the user exits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.display_menu()?;
            let Some(choice) = self.read_int("Enter choice: ")? else {
                break;
            };

            let flow = match choice {
                1 => self.load_file()?,
                2 => self.add_patron()?,
                3 => self.remove_patron()?,
                4 => {
                    self.list_patrons()?;
                    Flow::Continue
                }
                5 => Flow::Exit,
                _ => {
                    writeln!(self.out, "Invalid choice.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }

        writeln!(self.out, "Exiting LMS. Goodbye.")?;
        self.out.flush()
    }

    /// Load a file into the repository and report the outcome
    ///
    /// Also used for the startup file before the loop begins.
    pub fn load_path(&mut self, path: &Path) -> io::Result<()> {
        match self.repo.load_from_file(path) {
            Ok(report) => {
                for diagnostic in &report.diagnostics {
                    writeln!(self.err, "{}", diagnostic)?;
                }
                writeln!(self.out, "{}", format_import_report(&report))?;
                self.list_patrons()
            }
            Err(e) => writeln!(self.err, "Load failed: {}", e),
        }
    }

    fn display_menu(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "1. Load patrons from file")?;
        writeln!(self.out, "2. Add new patron")?;
        writeln!(self.out, "3. Remove patron")?;
        writeln!(self.out, "4. List all patrons")?;
        writeln!(self.out, "5. Exit")
    }

    fn load_file(&mut self) -> io::Result<Flow> {
        let Some(path) = self.prompt("File path: ")? else {
            return Ok(Flow::Exit);
        };
        self.load_path(Path::new(path.trim()))?;
        Ok(Flow::Continue)
    }

    fn add_patron(&mut self) -> io::Result<Flow> {
        let id_prompt = format!("Enter ID ({} digits): ", ID_LENGTH);
        let Some(id) = self.read_id(&id_prompt)? else {
            return Ok(Flow::Exit);
        };
        let Some(name) = self.prompt("Name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(address) = self.prompt("Address: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(fine) = self.read_fine("Fine 0.00-250.00: ")? else {
            return Ok(Flow::Exit);
        };

        let added = Patron::new(&id, &name, &address, fine).and_then(|p| self.repo.add(p));
        match added {
            Ok(()) => self.list_patrons()?,
            Err(e) => writeln!(self.err, "{}", e)?,
        }
        Ok(Flow::Continue)
    }

    fn remove_patron(&mut self) -> io::Result<Flow> {
        let Some(id) = self.read_id("Enter ID to remove: ")? else {
            return Ok(Flow::Exit);
        };

        let message = if self.repo.remove_by_id(&id) {
            "Removed."
        } else {
            "Not found."
        };
        writeln!(self.out, "{}", message)?;
        self.list_patrons()?;
        Ok(Flow::Continue)
    }

    fn list_patrons(&mut self) -> io::Result<()> {
        let patrons = self.repo.get_all();
        writeln!(self.out, "{}", format_patron_list(&patrons, self.style))
    }

    /// Print a prompt and read one line without its terminator; `None` at end of input
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn read_int(&mut self, text: &str) -> io::Result<Option<i32>> {
        loop {
            let Some(line) = self.prompt(text)? else {
                return Ok(None);
            };
            match line.trim().parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.out, "Invalid int.")?,
            }
        }
    }

    fn read_fine(&mut self, text: &str) -> io::Result<Option<FineAmount>> {
        loop {
            let Some(line) = self.prompt(text)? else {
                return Ok(None);
            };
            match parse_fine(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.out, "Invalid decimal.")?,
            }
        }
    }

    fn read_id(&mut self, text: &str) -> io::Result<Option<String>> {
        loop {
            let Some(line) = self.prompt(text)? else {
                return Ok(None);
            };
            let id = line.trim();
            if is_valid_id(id) {
                return Ok(Some(id.to_string()));
            }
            writeln!(self.out, "Invalid ID. Must be exactly {} digits.", ID_LENGTH)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    /// Drive the menu with scripted input; returns (stdout, stderr)
    fn run_script(repo: &mut PatronRepository, script: &str) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        Menu::new(repo, Cursor::new(script), &mut out, &mut err, ListStyle::Plain)
            .run()
            .unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_exit() {
        let mut repo = PatronRepository::new();
        let (out, err) = run_script(&mut repo, "5\n");

        assert!(out.contains("1. Load patrons from file"));
        assert!(out.ends_with("Exiting LMS. Goodbye.\n"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_end_of_input_exits() {
        let mut repo = PatronRepository::new();
        let (out, _) = run_script(&mut repo, "");
        assert!(out.ends_with("Exiting LMS. Goodbye.\n"));
    }

    #[test]
    fn test_invalid_choices() {
        let mut repo = PatronRepository::new();
        let (out, _) = run_script(&mut repo, "abc\n9\n4\n5\n");

        assert!(out.contains("Invalid int."));
        assert!(out.contains("Invalid choice."));
        assert!(out.contains("No patrons."));
    }

    #[test]
    fn test_add_patron() {
        let mut repo = PatronRepository::new();
        let script = "2\n12\n0000042\n  Jane Doe \n12 Elm St\nlots\n15.5\n5\n";
        let (out, err) = run_script(&mut repo, script);

        assert!(out.contains("Invalid ID. Must be exactly 7 digits."));
        assert!(out.contains("Invalid decimal."));
        assert!(out.contains("ID | Name | Address | Fine\n0000042 | Jane Doe | 12 Elm St | 15.50"));
        assert!(err.is_empty());
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_add_reports_validation_errors() {
        let mut repo = PatronRepository::new();
        let script = concat!(
            "2\n0000001\nA\nB\n1\n",
            "2\n0000001\nC\nD\n2\n",
            "2\n0000002\n \nD\n2\n",
            "2\n0000003\nE\nF\n260\n",
            "5\n",
        );
        let (_, err) = run_script(&mut repo, script);

        assert_eq!(
            err,
            "ID already exists: 0000001\n\
             Name cannot be blank\n\
             Fine must be between 0.00 and 250.00\n"
        );
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get("0000001").unwrap().name(), "A");
    }

    #[test]
    fn test_remove_patron() {
        let mut repo = PatronRepository::new();
        repo.add(Patron::new("0000001", "A", "B", parse_fine("0").unwrap()).unwrap())
            .unwrap();

        let (out, _) = run_script(&mut repo, "3\n0000001\n3\n0000001\n5\n");

        assert!(out.contains("Removed."));
        assert!(out.contains("Not found."));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_load_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("patrons.txt");
        std::fs::write(&path, "0000002-Bob-3 Oak Ave-1\nbad line\n0000001-Ann-1 Elm St-2.5\n")
            .unwrap();

        let mut repo = PatronRepository::new();
        let script = format!("1\n{}\n5\n", path.display());
        let (out, err) = run_script(&mut repo, &script);

        assert_eq!(
            err,
            "Line 2: malformed entry, expected 4 fields but got 1\n"
        );
        assert!(out.contains("Imported 2 patron(s), 1 line(s) rejected."));
        assert!(out.contains(
            "0000001 | Ann | 1 Elm St | 2.50\n0000002 | Bob | 3 Oak Ave | 1.00"
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.txt");

        let mut repo = PatronRepository::new();
        let script = format!("1\n{}\n5\n", path.display());
        let (_, err) = run_script(&mut repo, &script);

        assert!(err.starts_with("Load failed: I/O error: Failed to open"));
        assert!(repo.is_empty());
    }
}
