//! Core trait for ledger operations
//!
//! This module defines the trait abstraction that allows the sequential
//! [`Bank`](crate::core::Bank) and the concurrent
//! [`SharedBank`](crate::core::SharedBank) to be driven interchangeably by the
//! command engine and the shells.

use crate::types::{
    Account, AccountId, AccountSummary, InterestOutcome, LedgerError, TransferReceipt,
};
use rust_decimal::Decimal;

/// Operations a bank ledger exposes to its shells
///
/// Every failure is reported as a [`LedgerError`] value and leaves the
/// referenced balances unchanged.
pub trait Ledger {
    /// Register an account; fails with `DuplicateAccountId` if the id is taken
    fn add_account(&mut self, account: Account) -> Result<(), LedgerError>;

    /// Snapshot of a single account, or `AccountNotFound`
    fn account(&self, id: &str) -> Result<AccountSummary, LedgerError>;

    /// Deposit into an account, returning its new balance
    fn deposit(&mut self, id: &str, amount: Decimal) -> Result<Decimal, LedgerError>;

    /// Withdraw from an account under its kind's policy, returning its new balance
    fn withdraw(&mut self, id: &str, amount: Decimal) -> Result<Decimal, LedgerError>;

    /// Apply an account's interest policy
    fn apply_interest(&mut self, id: &str) -> Result<InterestOutcome, LedgerError>;

    /// Move `amount` from one account to another
    ///
    /// Both ids are resolved before anything is mutated. The source
    /// withdrawal's own result decides the outcome; no deposit happens when
    /// it fails.
    fn transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<TransferReceipt, LedgerError>;

    /// Snapshot of every account in insertion order
    fn list_accounts(&self) -> Vec<AccountSummary>;

    /// Create and register a savings account
    fn open_savings(
        &mut self,
        id: AccountId,
        owner: String,
        initial_balance: Decimal,
        interest_rate: Decimal,
    ) -> Result<AccountSummary, LedgerError> {
        let account = Account::savings(id, owner, initial_balance, interest_rate)?;
        let summary = account.summary();
        self.add_account(account)?;
        Ok(summary)
    }

    /// Create and register a checking account
    fn open_checking(
        &mut self,
        id: AccountId,
        owner: String,
        initial_balance: Decimal,
        overdraft_limit: Decimal,
    ) -> Result<AccountSummary, LedgerError> {
        let account = Account::checking(id, owner, initial_balance, overdraft_limit)?;
        let summary = account.summary();
        self.add_account(account)?;
        Ok(summary)
    }

    /// Sum of all balances
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` naming the account whose balance pushed
    /// the sum out of range.
    fn total_balance(&self) -> Result<Decimal, LedgerError> {
        self.list_accounts()
            .iter()
            .try_fold(Decimal::ZERO, |total, summary| {
                total.checked_add(summary.balance).ok_or_else(|| {
                    LedgerError::arithmetic_overflow("total_balance", summary.id.as_str())
                })
            })
    }
}
