//! Rust Bank Ledger CLI
//!
//! Interactive console menu or batch CSV script over an in-memory ledger.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --backend shared
//! cargo run -- --script commands.csv > accounts.csv
//! RUST_LOG=debug cargo run -- --script commands.csv
//! ```
//!
//! Logs go to stderr so stdout carries only the menu or the CSV listing.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (script not readable, output not writable, console I/O failure)

use rust_bank_ledger::cli::{self, ConsoleMenu};
use rust_bank_ledger::core::{create_ledger, CommandEngine};
use rust_bank_ledger::io::run_script;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let args = cli::parse_args();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| args.log_level.as_str().into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut engine = CommandEngine::new(create_ledger(args.backend));
    tracing::debug!(backend = ?args.backend, "Ledger created");

    let result = match &args.script {
        Some(path) => {
            let mut output = std::io::stdout();
            run_script(path, &mut engine, &mut output).map(|_| ())
        }
        None => {
            let stdin = std::io::stdin();
            ConsoleMenu::new(&mut engine, stdin.lock(), std::io::stdout()).run()
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
