//! Batch execution of command scripts
//!
//! Streams commands from a [`ScriptReader`] through the [`CommandEngine`]
//! one at a time, then writes the final account listing as CSV.
//!
//! Malformed rows and rejected commands are logged and skipped; only failures
//! to open the script or to write the listing abort the run.

use crate::core::CommandEngine;
use crate::io::csv_format::write_accounts_csv;
use crate::io::script_reader::ScriptReader;
use crate::types::LedgerError;
use std::io::{Read, Write};
use std::path::Path;

/// Counts of what happened to each script row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptReport {
    /// Commands the ledger executed
    pub applied: usize,
    /// Commands the ledger rejected (unknown account, insufficient funds, ...)
    pub rejected: usize,
    /// Rows that could not be turned into a command
    pub malformed: usize,
}

/// Run the script at `path` and write the final listing to `output`
///
/// # Errors
///
/// Returns `IoError` if the script cannot be opened or the listing cannot
/// be written.
pub fn run_script(
    path: &Path,
    engine: &mut CommandEngine,
    output: &mut dyn Write,
) -> Result<ScriptReport, LedgerError> {
    let reader = ScriptReader::from_path(path)?;
    tracing::info!(script = %path.display(), "Running command script");
    run_commands(reader, engine, output)
}

/// Run commands from any script source and write the final listing
pub fn run_commands<R: Read>(
    reader: ScriptReader<R>,
    engine: &mut CommandEngine,
    output: &mut dyn Write,
) -> Result<ScriptReport, LedgerError> {
    let mut report = ScriptReport::default();

    for result in reader {
        match result {
            Ok(command) => {
                let name = command.name();
                match engine.execute(command) {
                    Ok(_) => report.applied += 1,
                    Err(error) => {
                        tracing::warn!(command = name, %error, "Command rejected");
                        report.rejected += 1;
                    }
                }
            }
            Err(error) => {
                tracing::warn!(%error, "Skipping malformed script row");
                report.malformed += 1;
            }
        }
    }

    tracing::info!(
        applied = report.applied,
        rejected = report.rejected,
        malformed = report.malformed,
        "Script finished"
    );

    write_accounts_csv(&engine.accounts(), output)?;
    Ok(report)
}
