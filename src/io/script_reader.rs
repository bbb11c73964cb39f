//! CSV command script reader with iterator interface
//!
//! Provides a streaming iterator over ledger commands from a CSV script.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, unreadable file) are returned from `from_path()`
//! - Individual row errors are yielded as Err variants in the iterator
//! - Line numbers are included in error messages for debugging

use crate::io::csv_format::{convert_csv_command, CsvCommand};
use crate::types::{Command, LedgerError};
use csv::{ReaderBuilder, StringRecord, Terminator, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Streaming reader of command scripts
///
/// ```no_run
/// use rust_bank_ledger::io::ScriptReader;
/// use std::path::Path;
///
/// let reader = ScriptReader::from_path(Path::new("commands.csv")).unwrap();
/// for result in reader {
///     match result {
///         Ok(command) => println!("Command: {:?}", command),
///         Err(e) => eprintln!("Error: {}", e),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct ScriptReader<R> {
    reader: csv::Reader<R>,
    record: StringRecord,
}

impl ScriptReader<File> {
    /// Open a script file
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be opened.
    pub fn from_path(path: &Path) -> Result<Self, LedgerError> {
        let file = File::open(path).map_err(|e| LedgerError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        })?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> ScriptReader<R> {
    /// Wrap any reader producing script CSV
    ///
    /// Fields are trimmed and rows may omit trailing columns. Rows are split
    /// on `\n` only; a trailing `\r` is trimmed with the rest of the field.
    pub fn from_reader(input: R) -> Self {
        let reader = ReaderBuilder::new()
            .trim(Trim::Headers)
            .terminator(Terminator::Any(b'\n'))
            .flexible(true)
            .from_reader(input);

        Self {
            reader,
            record: StringRecord::new(),
        }
    }

    /// Physical line on which the record just read starts
    ///
    /// The reader skips blank lines before a record, so the record's own
    /// position may point at the first of them. Counting back from where the
    /// record ended is exact for every record terminated by a newline.
    fn record_start_line(&self) -> u64 {
        let skipped_from = self.record.position().map_or(1, |pos| pos.line());
        let ended_before = self.reader.position().line();
        let embedded = self
            .record
            .iter()
            .map(|field| field.matches('\n').count() as u64)
            .sum::<u64>();

        ended_before
            .saturating_sub(embedded + 1)
            .max(skipped_from)
    }
}

impl<R: Read> Iterator for ScriptReader<R> {
    type Item = Result<Command, String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.reader.read_record(&mut self.record) {
                Ok(false) => return None,
                Ok(true) => {}
                Err(e) => {
                    let line = e.position().map_or(0, |pos| pos.line());
                    return Some(Err(format!("Line {}: CSV parse error: {}", line, e)));
                }
            }

            let line = self.record_start_line();
            self.record.trim();

            // A CRLF blank line arrives as a single whitespace field
            if self.record.len() == 1 && self.record[0].is_empty() {
                continue;
            }

            let row = match self.reader.headers() {
                Ok(headers) => self.record.deserialize::<CsvCommand>(Some(headers)),
                Err(e) => return Some(Err(format!("Line {}: CSV parse error: {}", line, e))),
            };

            return Some(match row {
                Ok(row) => convert_csv_command(row).map_err(|e| format!("Line {}: {}", line, e)),
                Err(e) => Err(format!("Line {}: CSV parse error: {}", line, e)),
            });
        }
    }
}
