//! I/O module
//!
//! Handles CSV command scripts and account listing output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (row conversion, listing serialization)
//! - `script_reader` - CSV command reader with iterator interface
//! - `script_runner` - Runs a script through the command engine

pub mod csv_format;
pub mod script_reader;
pub mod script_runner;

pub use csv_format::{convert_csv_command, write_accounts_csv, CsvCommand};
pub use script_reader::ScriptReader;
pub use script_runner::{run_commands, run_script, ScriptReport};
