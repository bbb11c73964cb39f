//! Error types for the bank ledger
//!
//! This module defines all error types that can occur while operating on the
//! ledger. Errors are returned as values to the caller and are never fatal to
//! the process; the shells decide how to render them.
//!
//! # Error Categories
//!
//! - **Lookup Errors**: Unknown account, duplicate account id
//! - **Policy Errors**: Insufficient funds, overdraft limit exceeded
//! - **Input Errors**: Malformed or negative amounts, invalid account parameters
//! - **Arithmetic Errors**: Decimal overflow in balance calculations
//! - **File I/O Errors**: Script file not readable, malformed CSV

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the bank ledger
///
/// Each variant carries the context needed to render a useful message
/// (account id, balances, requested amount).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// No account with the given id is registered
    #[error("Account {id} not found")]
    AccountNotFound {
        /// The id that was looked up
        id: String,
    },

    /// An account with the same id is already registered
    #[error("Account {id} already exists")]
    DuplicateAccountId {
        /// The conflicting id
        id: String,
    },

    /// Withdrawal would drive a non-overdraft balance below zero
    ///
    /// The withdrawal is rejected and the balance remains unchanged.
    #[error("Insufficient funds in account {id}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Account id
        id: String,
        /// Balance at the time of the request
        balance: Decimal,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// Withdrawal would drive a checking balance below `-overdraft_limit`
    ///
    /// The withdrawal is rejected and the balance remains unchanged.
    #[error(
        "Overdraft limit exceeded for account {id}: balance {balance}, overdraft limit {overdraft_limit}, requested {requested}"
    )]
    OverdraftLimitExceeded {
        /// Account id
        id: String,
        /// Balance at the time of the request
        balance: Decimal,
        /// Overdraft limit of the account
        overdraft_limit: Decimal,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// Text could not be parsed as a decimal amount
    ///
    /// Only produced by input parsing in the shells.
    #[error("Invalid amount '{input}'")]
    InvalidAmount {
        /// The rejected input
        input: String,
    },

    /// A monetary operation was requested with a negative amount
    #[error("Negative amount {amount} for {operation}")]
    NegativeAmount {
        /// Operation that was requested
        operation: String,
        /// The negative amount
        amount: Decimal,
    },

    /// Account construction parameters violate the account invariants
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidAccountParameter {
        /// Name of the offending parameter
        field: String,
        /// Rendered value of the parameter
        value: String,
        /// Constraint that was violated
        reason: String,
    },

    /// Arithmetic overflow would occur
    ///
    /// The operation is rejected to keep the balance exact.
    #[error("Arithmetic overflow in {operation} for account {id}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account id
        id: String,
    },

    /// I/O error while reading a script or writing output
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error in a command script
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an AccountNotFound error
    pub fn account_not_found(id: &str) -> Self {
        LedgerError::AccountNotFound { id: id.to_string() }
    }

    /// Create a DuplicateAccountId error
    pub fn duplicate_account_id(id: &str) -> Self {
        LedgerError::DuplicateAccountId { id: id.to_string() }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(id: &str, balance: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            id: id.to_string(),
            balance,
            requested,
        }
    }

    /// Create an OverdraftLimitExceeded error
    pub fn overdraft_limit_exceeded(
        id: &str,
        balance: Decimal,
        overdraft_limit: Decimal,
        requested: Decimal,
    ) -> Self {
        LedgerError::OverdraftLimitExceeded {
            id: id.to_string(),
            balance,
            overdraft_limit,
            requested,
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(input: &str) -> Self {
        LedgerError::InvalidAmount {
            input: input.to_string(),
        }
    }

    /// Create a NegativeAmount error
    pub fn negative_amount(operation: &str, amount: Decimal) -> Self {
        LedgerError::NegativeAmount {
            operation: operation.to_string(),
            amount,
        }
    }

    /// Create an InvalidAccountParameter error
    pub fn invalid_parameter(field: &str, value: impl ToString, reason: &str) -> Self {
        LedgerError::InvalidAccountParameter {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, id: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            id: id.to_string(),
        }
    }

    /// Whether the error is a withdrawal policy rejection
    ///
    /// Both `InsufficientFunds` and `OverdraftLimitExceeded` mean the source
    /// account refused the amount; shells treat them alike.
    pub fn is_funds_rejection(&self) -> bool {
        matches!(
            self,
            LedgerError::InsufficientFunds { .. } | LedgerError::OverdraftLimitExceeded { .. }
        )
    }
}
