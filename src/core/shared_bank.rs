//! Thread-safe bank ledger
//!
//! This module provides the `SharedBank` struct, which offers the same
//! operations as [`Bank`](crate::core::Bank) through `&self` so that several
//! threads can drive one ledger.
//!
//! # Design
//!
//! Accounts live in a `DashMap`, which shards its locks so operations on
//! different accounts do not block each other while operations on the same
//! account are serialized. Each entry carries an insertion sequence number so
//! listings keep the order in which accounts were opened.
//!
//! # Transfers
//!
//! A transfer never holds two entry guards at once: the source is debited
//! under its own guard, the guard is released, then the destination is
//! credited. Each step is atomic for its account. Between the two steps the
//! amount is in flight and is visible in neither balance; if the credit fails
//! the debit is reverted.

use crate::core::traits::Ledger;
use crate::types::{
    Account, AccountId, AccountSummary, InterestOutcome, LedgerError, TransferReceipt,
};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
struct RegisteredAccount {
    sequence: u64,
    account: Account,
}

/// Concurrent registry of accounts with transfer orchestration
#[derive(Debug, Default)]
pub struct SharedBank {
    accounts: DashMap<AccountId, RegisteredAccount>,
    next_sequence: AtomicU64,
}

impl SharedBank {
    /// Create a new SharedBank with no accounts
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            next_sequence: AtomicU64::new(0),
        }
    }

    /// Register an account
    ///
    /// If two threads register the same id concurrently, exactly one succeeds
    /// and the other receives `DuplicateAccountId`.
    pub fn add_account(&self, account: Account) -> Result<(), LedgerError> {
        match self.accounts.entry(account.id().clone()) {
            Entry::Occupied(_) => Err(LedgerError::duplicate_account_id(account.id().as_str())),
            Entry::Vacant(slot) => {
                tracing::debug!(account = %account.id(), kind = %account.kind().label(), "Account registered");
                let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
                slot.insert(RegisteredAccount { sequence, account });
                Ok(())
            }
        }
    }

    /// Snapshot of a single account
    pub fn account(&self, id: &str) -> Result<AccountSummary, LedgerError> {
        self.accounts
            .get(id)
            .map(|entry| entry.account.summary())
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    /// Snapshot of every account in insertion order
    ///
    /// Each account is read under its own guard; accounts modified
    /// concurrently may be observed before or after the modification.
    pub fn list_accounts(&self) -> Vec<AccountSummary> {
        let mut entries: Vec<(u64, AccountSummary)> = self
            .accounts
            .iter()
            .map(|entry| (entry.sequence, entry.account.summary()))
            .collect();
        entries.sort_by_key(|(sequence, _)| *sequence);
        entries.into_iter().map(|(_, summary)| summary).collect()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn deposit(&self, id: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
        self.update(id, |account| account.deposit(amount))
    }

    pub fn withdraw(&self, id: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
        self.update(id, |account| account.withdraw(amount))
    }

    pub fn apply_interest(&self, id: &str) -> Result<InterestOutcome, LedgerError> {
        self.update(id, Account::apply_interest)
    }

    /// Transfer funds between two accounts
    ///
    /// Same contract as [`Bank::transfer`](crate::core::Bank::transfer).
    pub fn transfer(
        &self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<TransferReceipt, LedgerError> {
        // Accounts are never removed, so existence checked here still holds below
        for id in [from, to] {
            if !self.accounts.contains_key(id) {
                return Err(LedgerError::account_not_found(id));
            }
        }

        let withdrawn_balance = self.update(from, |account| account.withdraw(amount))?;

        let to_balance = match self.update(to, |account| account.deposit(amount)) {
            Ok(balance) => balance,
            Err(error) => {
                self.update(from, |account| account.revert_withdrawal(amount))?;
                return Err(error);
            }
        };

        // A self-transfer is credited after the debit, so its balance is the later one
        let from_balance = if from == to { to_balance } else { withdrawn_balance };

        let receipt = TransferReceipt {
            from: AccountId::new(from),
            to: AccountId::new(to),
            amount,
            from_balance,
            to_balance,
        };

        tracing::info!(from = %receipt.from, to = %receipt.to, %amount, "Transfer completed");
        Ok(receipt)
    }

    /// Run `f` on an account while holding its entry lock
    fn update<T, F>(&self, id: &str, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&mut Account) -> Result<T, LedgerError>,
    {
        let mut entry = self
            .accounts
            .get_mut(id)
            .ok_or_else(|| LedgerError::account_not_found(id))?;
        f(&mut entry.account)
    }
}

impl Ledger for SharedBank {
    fn add_account(&mut self, account: Account) -> Result<(), LedgerError> {
        SharedBank::add_account(self, account)
    }

    fn account(&self, id: &str) -> Result<AccountSummary, LedgerError> {
        SharedBank::account(self, id)
    }

    fn deposit(&mut self, id: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
        SharedBank::deposit(self, id, amount)
    }

    fn withdraw(&mut self, id: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
        SharedBank::withdraw(self, id, amount)
    }

    fn apply_interest(&mut self, id: &str) -> Result<InterestOutcome, LedgerError> {
        SharedBank::apply_interest(self, id)
    }

    fn transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<TransferReceipt, LedgerError> {
        SharedBank::transfer(self, from, to, amount)
    }

    fn list_accounts(&self) -> Vec<AccountSummary> {
        SharedBank::list_accounts(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn shared_bank() -> SharedBank {
        let bank = SharedBank::new();
        bank.add_account(
            Account::savings("S1", "Ana", Decimal::from(1000), Decimal::new(5, 2)).unwrap(),
        )
        .unwrap();
        bank.add_account(
            Account::checking("C1", "Ben", Decimal::ZERO, Decimal::from(200)).unwrap(),
        )
        .unwrap();
        bank
    }

    #[test]
    fn test_add_account_rejects_duplicate_id() {
        let bank = shared_bank();

        let result = bank.add_account(
            Account::savings("C1", "Eve", Decimal::ZERO, Decimal::ZERO).unwrap(),
        );

        assert_eq!(result, Err(LedgerError::duplicate_account_id("C1")));
        assert_eq!(bank.account("C1").unwrap().owner, "Ben");
        assert_eq!(bank.len(), 2);
    }

    #[test]
    fn test_list_accounts_preserves_insertion_order() {
        let bank = shared_bank();
        for id in ["Z9", "A1", "M5"] {
            bank.add_account(Account::savings(id, "Cleo", Decimal::ZERO, Decimal::ZERO).unwrap())
                .unwrap();
        }

        let ids: Vec<String> = bank
            .list_accounts()
            .into_iter()
            .map(|summary| summary.id.to_string())
            .collect();

        assert_eq!(ids, vec!["S1", "C1", "Z9", "A1", "M5"]);
    }

    #[test]
    fn test_scenario_matches_sequential_bank() {
        let bank = shared_bank();

        bank.apply_interest("S1").unwrap();
        bank.withdraw("C1", Decimal::from(150)).unwrap();
        assert!(bank.withdraw("C1", Decimal::from(100)).is_err());
        let receipt = bank.transfer("S1", "C1", Decimal::from(300)).unwrap();

        assert_eq!(receipt.from_balance, Decimal::from(750));
        assert_eq!(receipt.to_balance, Decimal::from(150));
    }

    #[test]
    fn test_transfer_unknown_account_mutates_nothing() {
        let bank = shared_bank();

        let result = bank.transfer("S1", "missing", Decimal::from(10));

        assert_eq!(result, Err(LedgerError::account_not_found("missing")));
        assert_eq!(bank.account("S1").unwrap().balance, Decimal::from(1000));
    }

    #[test]
    fn test_transfer_to_self_is_noop() {
        let bank = shared_bank();

        let receipt = bank.transfer("C1", "C1", Decimal::from(50)).unwrap();

        assert_eq!(bank.account("C1").unwrap().balance, Decimal::ZERO);
        assert_eq!(receipt.from_balance, Decimal::ZERO);
        assert_eq!(receipt.to_balance, Decimal::ZERO);
    }

    #[test]
    fn test_transfer_receipt_reports_its_own_balances() {
        let bank = shared_bank();

        let (receipt_balances, deposit_balances) = thread::scope(|scope| {
            let transfers = scope.spawn(|| {
                (0..100)
                    .map(|_| bank.transfer("S1", "C1", Decimal::ONE).unwrap())
                    .collect::<Vec<_>>()
            });
            let deposits = scope.spawn(|| {
                (0..100)
                    .map(|_| bank.deposit("C1", Decimal::ONE).unwrap())
                    .collect::<Vec<_>>()
            });
            (transfers.join().unwrap(), deposits.join().unwrap())
        });

        let expected_sources: Vec<Decimal> = (1..=100i64).map(|n| Decimal::from(1000 - n)).collect();
        let sources: Vec<Decimal> = receipt_balances.iter().map(|r| r.from_balance).collect();
        assert_eq!(sources, expected_sources);

        // Every credit to C1 produces a distinct balance from 1 to 200
        let mut credited: Vec<Decimal> = receipt_balances
            .iter()
            .map(|r| r.to_balance)
            .chain(deposit_balances)
            .collect();
        credited.sort();
        let expected_credits: Vec<Decimal> = (1..=200i64).map(Decimal::from).collect();
        assert_eq!(credited, expected_credits);
    }

    #[test]
    fn test_concurrent_transfers_conserve_total() {
        let bank = shared_bank();
        let total_before = bank.total_balance().unwrap();

        thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        let _ = bank.transfer("S1", "C1", Decimal::from(3));
                        let _ = bank.transfer("C1", "S1", Decimal::from(2));
                    }
                });
            }
        });

        assert_eq!(bank.total_balance().unwrap(), total_before);
        let checking = bank.account("C1").unwrap().balance;
        assert!(checking >= Decimal::from(-200));
    }

    #[test]
    fn test_concurrent_registration_admits_one_account_per_id() {
        let bank = SharedBank::new();

        let successes: usize = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|n| {
                    let bank = &bank;
                    scope.spawn(move || {
                        let account =
                            Account::savings("S1", format!("owner-{n}"), Decimal::ZERO, Decimal::ZERO)
                                .unwrap();
                        bank.add_account(account).is_ok() as usize
                    })
                })
                .collect();
            handles.into_iter().map(|handle| handle.join().unwrap()).sum()
        });

        assert_eq!(successes, 1);
        assert_eq!(bank.len(), 1);
    }
}
