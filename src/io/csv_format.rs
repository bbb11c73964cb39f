//! CSV format handling for command scripts and account listings
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvCommand structure for deserialization
//! - Conversion from CSV rows to ledger commands
//! - Account listing serialization
//!
//! All functions are pure (no file access) for easy testing.
//!
//! # Script Format
//!
//! Columns: `command,id,owner,to,amount,parameter`
//!
//! | command | required columns | notes |
//! |---|---|---|
//! | `open_savings` | id, owner | amount = initial balance (default 0), parameter = interest rate (default 0) |
//! | `open_checking` | id, owner | amount = initial balance (default 0), parameter = overdraft limit (default 0) |
//! | `deposit` | id, amount | |
//! | `withdraw` | id, amount | |
//! | `interest` | id | |
//! | `transfer` | id, to, amount | id is the source account |
//! | `list` | | |

use crate::cli::input::parse_amount;
use crate::types::{AccountId, AccountSummary, Command, LedgerError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;

/// CSV row structure for deserialization
///
/// Every column except `command` is optional; which ones are required
/// depends on the command.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct CsvCommand {
    pub command: String,
    pub id: Option<String>,
    pub owner: Option<String>,
    pub to: Option<String>,
    pub amount: Option<String>,
    pub parameter: Option<String>,
}

/// Convert a CsvCommand to a Command
///
/// # Returns
///
/// Result containing either:
/// - Ok(Command) - Successfully converted row
/// - Err(String) - Error message describing the conversion failure
pub fn convert_csv_command(row: CsvCommand) -> Result<Command, String> {
    let command = row.command.trim().to_lowercase();

    match command.as_str() {
        "open_savings" => Ok(Command::OpenSavings {
            id: required_id(&row, "id", row.id.as_deref())?,
            owner: required_text(&row, "owner", row.owner.as_deref())?,
            initial_balance: optional_decimal("amount", row.amount.as_deref())?,
            interest_rate: optional_decimal("parameter", row.parameter.as_deref())?,
        }),
        "open_checking" => Ok(Command::OpenChecking {
            id: required_id(&row, "id", row.id.as_deref())?,
            owner: required_text(&row, "owner", row.owner.as_deref())?,
            initial_balance: optional_decimal("amount", row.amount.as_deref())?,
            overdraft_limit: optional_decimal("parameter", row.parameter.as_deref())?,
        }),
        "deposit" => Ok(Command::Deposit {
            id: required_id(&row, "id", row.id.as_deref())?,
            amount: required_decimal(&row, "amount", row.amount.as_deref())?,
        }),
        "withdraw" => Ok(Command::Withdraw {
            id: required_id(&row, "id", row.id.as_deref())?,
            amount: required_decimal(&row, "amount", row.amount.as_deref())?,
        }),
        "interest" => Ok(Command::ApplyInterest {
            id: required_id(&row, "id", row.id.as_deref())?,
        }),
        "transfer" => Ok(Command::Transfer {
            from: required_id(&row, "id", row.id.as_deref())?,
            to: required_id(&row, "to", row.to.as_deref())?,
            amount: required_decimal(&row, "amount", row.amount.as_deref())?,
        }),
        "list" => Ok(Command::List),
        _ => Err(format!("Invalid command: '{}'", row.command)),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn required_text(row: &CsvCommand, column: &str, value: Option<&str>) -> Result<String, String> {
    non_empty(value)
        .map(str::to_string)
        .ok_or_else(|| format!("{} command requires '{}'", row.command.trim(), column))
}

fn required_id(row: &CsvCommand, column: &str, value: Option<&str>) -> Result<AccountId, String> {
    required_text(row, column, value).map(AccountId::from)
}

fn required_decimal(row: &CsvCommand, column: &str, value: Option<&str>) -> Result<Decimal, String> {
    let text = non_empty(value)
        .ok_or_else(|| format!("{} command requires '{}'", row.command.trim(), column))?;
    parse_amount(text).map_err(|e| format!("{} in column '{}'", e, column))
}

fn optional_decimal(column: &str, value: Option<&str>) -> Result<Decimal, String> {
    match non_empty(value) {
        Some(text) => parse_amount(text).map_err(|e| format!("{} in column '{}'", e, column)),
        None => Ok(Decimal::ZERO),
    }
}

/// Write an account listing in CSV format
///
/// Writes accounts with columns: id, owner, kind, balance. Rows keep the
/// order of `accounts`; balances have two decimal places.
///
/// # Errors
///
/// Returns `IoError` if the output cannot be written.
pub fn write_accounts_csv(
    accounts: &[AccountSummary],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record(["id", "owner", "kind", "balance"])
        .map_err(write_failure)?;

    for account in accounts {
        writer
            .write_record(&[
                account.id.to_string(),
                account.owner.clone(),
                account.kind.to_string(),
                format!("{:.2}", account.balance.round_dp(2)),
            ])
            .map_err(write_failure)?;
    }

    writer.flush().map_err(write_failure)
}

fn write_failure(error: impl std::fmt::Display) -> LedgerError {
    LedgerError::IoError {
        message: format!("Failed to write accounts: {}", error),
    }
}
