//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account, account kinds and their balance policies
//! - `command`: Commands issued by shells and their outcomes
//! - `error`: Error types for the ledger

pub mod account;
pub mod command;
pub mod error;

pub use account::{
    Account, AccountId, AccountKind, AccountKindLabel, AccountSummary, InterestOutcome,
};
pub use command::{Command, CommandOutcome, TransferReceipt};
pub use error::LedgerError;
