//! Command and outcome types exchanged between shells and the ledger
//!
//! Shells (the console menu and the CSV script reader) translate user input
//! into a [`Command`]; the engine executes it and hands back a
//! [`CommandOutcome`] holding structured values for the shell to render.

use super::account::{AccountId, AccountSummary, InterestOutcome};
use rust_decimal::Decimal;

/// A single ledger operation requested by a shell
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    OpenSavings {
        id: AccountId,
        owner: String,
        initial_balance: Decimal,
        interest_rate: Decimal,
    },
    OpenChecking {
        id: AccountId,
        owner: String,
        initial_balance: Decimal,
        overdraft_limit: Decimal,
    },
    Deposit {
        id: AccountId,
        amount: Decimal,
    },
    Withdraw {
        id: AccountId,
        amount: Decimal,
    },
    ApplyInterest {
        id: AccountId,
    },
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    },
    List,
}

impl Command {
    /// Short operation name, used in log events
    pub fn name(&self) -> &'static str {
        match self {
            Command::OpenSavings { .. } => "open_savings",
            Command::OpenChecking { .. } => "open_checking",
            Command::Deposit { .. } => "deposit",
            Command::Withdraw { .. } => "withdraw",
            Command::ApplyInterest { .. } => "interest",
            Command::Transfer { .. } => "transfer",
            Command::List => "list",
        }
    }
}

/// Balances of both sides after a successful transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Decimal,
    pub from_balance: Decimal,
    pub to_balance: Decimal,
}

/// Structured result of an executed [`Command`]
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Opened(AccountSummary),
    Deposited { id: AccountId, balance: Decimal },
    Withdrawn { id: AccountId, balance: Decimal },
    Interest { id: AccountId, outcome: InterestOutcome },
    Transferred(TransferReceipt),
    Listed(Vec<AccountSummary>),
}
