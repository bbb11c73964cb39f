// CLI module
// Command-line arguments, the console menu and its input helpers

mod args;
pub mod input;
pub mod menu;

pub use args::{CliArgs, LedgerBackend};
pub use input::{format_currency, parse_amount};
pub use menu::ConsoleMenu;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments or `--help`), clap prints an error or
/// help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
