//! Core business logic module
//!
//! This module contains the ledger components:
//! - `traits` - The `Ledger` trait shared by both bank implementations
//! - `bank` - Sequential account registry and transfer orchestration
//! - `shared_bank` - Concurrent account registry for multi-threaded callers
//! - `engine` - Command routing for the shells

pub mod bank;
pub mod engine;
pub mod shared_bank;
pub mod traits;

pub use bank::Bank;
pub use engine::CommandEngine;
pub use shared_bank::SharedBank;
pub use traits::Ledger;

use crate::cli::LedgerBackend;

/// Create a ledger for the selected backend
pub fn create_ledger(backend: LedgerBackend) -> Box<dyn Ledger> {
    match backend {
        LedgerBackend::Sequential => Box::new(Bank::new()),
        LedgerBackend::Shared => Box::new(SharedBank::new()),
    }
}
