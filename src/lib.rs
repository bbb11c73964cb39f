//! Rust Bank Ledger Library
//! # Overview
//!
//! This library provides an in-memory banking ledger with savings and checking
//! accounts, driven either by an interactive console menu or by a CSV command
//! script.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Command, LedgerError, etc.)
//! - [`cli`] - CLI arguments, console menu and input parsing
//! - [`core`] - Business logic components:
//!   - [`core::bank`] - Sequential account registry and transfers
//!   - [`core::shared_bank`] - Thread-safe account registry and transfers
//!   - [`core::engine`] - Command routing for the shells
//! - [`io`] - CSV command scripts and account listing output
//!
//! # Account Kinds
//!
//! - **Savings**: withdrawals may not exceed the balance; interest is
//!   `balance * interest_rate`
//! - **Checking**: withdrawals may overdraw down to `-overdraft_limit`;
//!   no interest
//!
//! # Operations
//!
//! - **Deposit**: credit a non-negative amount to an account
//! - **Withdraw**: debit an account under its kind's policy
//! - **Apply interest**: run the account kind's interest policy
//! - **Transfer**: withdraw from one account and deposit into another; the
//!   deposit only happens if the withdrawal succeeds
//! - **List**: snapshot of all accounts in the order they were opened

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use core::{Bank, CommandEngine, Ledger, SharedBank};
pub use io::write_accounts_csv;
pub use types::{
    Account, AccountId, AccountKind, AccountSummary, Command, CommandOutcome, InterestOutcome,
    LedgerError, TransferReceipt,
};
