use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// In-memory bank ledger with savings and checking accounts
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "In-memory bank ledger with savings and checking accounts", long_about = None)]
pub struct CliArgs {
    /// CSV command script to run instead of the interactive menu
    #[arg(
        long = "script",
        value_name = "FILE",
        help = "Run a CSV command script and print the final account listing as CSV"
    )]
    pub script: Option<PathBuf>,

    /// Ledger implementation backing the session
    #[arg(
        long = "backend",
        value_name = "BACKEND",
        default_value = "sequential",
        help = "Ledger backend: 'sequential' for single-owner or 'shared' for thread-safe"
    )]
    pub backend: LedgerBackend,

    /// Log filter used when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "FILTER",
        default_value = "warn",
        help = "Log filter directive (overridden by RUST_LOG), e.g. 'info' or 'rust_bank_ledger=debug'"
    )]
    pub log_level: String,
}

/// Available ledger implementations
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LedgerBackend {
    Sequential,
    Shared,
}
