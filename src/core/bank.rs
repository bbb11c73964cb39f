//! Sequential bank ledger
//!
//! This module provides the `Bank` struct which owns every account and
//! orchestrates operations that span accounts.
//!
//! The Bank is responsible for:
//! - Registering accounts and rejecting duplicate ids
//! - Looking accounts up by id
//! - Listing accounts in insertion order
//! - Transferring funds between two accounts

use crate::core::traits::Ledger;
use crate::types::{
    Account, AccountId, AccountSummary, InterestOutcome, LedgerError, TransferReceipt,
};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Registry of accounts with transfer orchestration
///
/// Accounts are stored in insertion order; a side index maps ids to their
/// position. Accounts are never removed, so positions stay valid.
#[derive(Debug, Default)]
pub struct Bank {
    accounts: Vec<Account>,
    index: HashMap<AccountId, usize>,
}

impl Bank {
    /// Create a new Bank with no accounts
    pub fn new() -> Self {
        Bank {
            accounts: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register an account
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAccountId` if an account with the same id exists;
    /// the registry is left unchanged.
    pub fn add_account(&mut self, account: Account) -> Result<(), LedgerError> {
        if self.index.contains_key(account.id()) {
            return Err(LedgerError::duplicate_account_id(account.id().as_str()));
        }

        tracing::debug!(account = %account.id(), kind = %account.kind().label(), "Account registered");
        self.index.insert(account.id().clone(), self.accounts.len());
        self.accounts.push(account);
        Ok(())
    }

    /// Find an account by id
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no account has the given id.
    pub fn find_account(&self, id: &str) -> Result<&Account, LedgerError> {
        let position = self.position(id)?;
        Ok(&self.accounts[position])
    }

    /// Snapshot of every account in insertion order
    pub fn list_accounts(&self) -> Vec<AccountSummary> {
        self.accounts.iter().map(Account::summary).collect()
    }

    /// Number of registered accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn deposit(&mut self, id: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
        let position = self.position(id)?;
        self.accounts[position].deposit(amount)
    }

    pub fn withdraw(&mut self, id: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
        let position = self.position(id)?;
        self.accounts[position].withdraw(amount)
    }

    pub fn apply_interest(&mut self, id: &str) -> Result<InterestOutcome, LedgerError> {
        let position = self.position(id)?;
        self.accounts[position].apply_interest()
    }

    /// Transfer funds between two accounts
    ///
    /// Resolves both ids first, withdraws from the source under its own
    /// policy, then deposits into the destination. If the deposit fails the
    /// withdrawal is reverted. A transfer to the same account withdraws and
    /// deposits the same balance and leaves it unchanged.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if either id is unknown (nothing is mutated)
    /// - `InsufficientFunds` / `OverdraftLimitExceeded` from the source policy
    /// - `NegativeAmount` for a negative amount
    /// - `ArithmeticOverflow` if the destination cannot hold the amount
    pub fn transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<TransferReceipt, LedgerError> {
        let source = self.position(from)?;
        let destination = self.position(to)?;

        self.accounts[source].withdraw(amount)?;

        if let Err(error) = self.accounts[destination].deposit(amount) {
            self.accounts[source].revert_withdrawal(amount)?;
            return Err(error);
        }

        let receipt = TransferReceipt {
            from: self.accounts[source].id().clone(),
            to: self.accounts[destination].id().clone(),
            amount,
            from_balance: self.accounts[source].balance(),
            to_balance: self.accounts[destination].balance(),
        };

        tracing::info!(from = %receipt.from, to = %receipt.to, %amount, "Transfer completed");
        Ok(receipt)
    }

    fn position(&self, id: &str) -> Result<usize, LedgerError> {
        let position = self
            .index
            .get(id)
            .copied()
            .ok_or_else(|| LedgerError::account_not_found(id));

        if position.is_err() {
            tracing::debug!(account = id, "Account lookup failed");
        }
        position
    }
}

impl Ledger for Bank {
    fn add_account(&mut self, account: Account) -> Result<(), LedgerError> {
        Bank::add_account(self, account)
    }

    fn account(&self, id: &str) -> Result<AccountSummary, LedgerError> {
        self.find_account(id).map(Account::summary)
    }

    fn deposit(&mut self, id: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
        Bank::deposit(self, id, amount)
    }

    fn withdraw(&mut self, id: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
        Bank::withdraw(self, id, amount)
    }

    fn apply_interest(&mut self, id: &str) -> Result<InterestOutcome, LedgerError> {
        Bank::apply_interest(self, id)
    }

    fn transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<TransferReceipt, LedgerError> {
        Bank::transfer(self, from, to, amount)
    }

    fn list_accounts(&self) -> Vec<AccountSummary> {
        Bank::list_accounts(self)
    }
}
