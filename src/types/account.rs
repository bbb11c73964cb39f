//! Account-related types for the bank ledger
//!
//! This module defines the Account structure, the closed set of account kinds
//! and the balance policies attached to each kind.
//!
//! # Account Kinds
//!
//! - **Savings**: never goes below zero, accrues interest at a fixed rate
//! - **Checking**: may go below zero down to its overdraft limit, never accrues interest

use super::error::LedgerError;
use rust_decimal::Decimal;
use std::borrow::Borrow;
use std::fmt;

/// Account identifier
///
/// Unique within a bank and immutable after the account is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        AccountId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        AccountId::new(id)
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        AccountId(id)
    }
}

impl Borrow<str> for AccountId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Kind-specific parameters of an account
///
/// The set of kinds is closed; every balance policy dispatches on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    /// Interest-bearing account that cannot be overdrawn
    Savings {
        /// Fraction of the balance credited by each interest application
        interest_rate: Decimal,
    },

    /// Account that may be overdrawn down to `-overdraft_limit`
    Checking {
        /// Maximum amount the balance may go below zero
        overdraft_limit: Decimal,
    },
}

impl AccountKind {
    pub fn label(&self) -> AccountKindLabel {
        match self {
            AccountKind::Savings { .. } => AccountKindLabel::Savings,
            AccountKind::Checking { .. } => AccountKindLabel::Checking,
        }
    }
}

/// Parameter-free tag of an account kind, used in listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKindLabel {
    Savings,
    Checking,
}

impl fmt::Display for AccountKindLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKindLabel::Savings => f.write_str("savings"),
            AccountKindLabel::Checking => f.write_str("checking"),
        }
    }
}

/// Result of applying interest to an account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterestOutcome {
    /// Interest was computed and credited
    Accrued {
        /// Amount credited
        interest: Decimal,
        /// Balance after the credit
        balance: Decimal,
    },

    /// The account kind does not accrue interest; the balance is unchanged
    NotApplicable,
}

/// Read-only snapshot of an account used for listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub id: AccountId,
    pub owner: String,
    pub kind: AccountKindLabel,
    pub balance: Decimal,
}

/// A balance-holding account
///
/// Identity and owner are fixed at construction. The balance only changes
/// through [`deposit`](Account::deposit), [`withdraw`](Account::withdraw) and
/// [`apply_interest`](Account::apply_interest), and always satisfies
/// `balance >= -overdraft_limit` for checking and `balance >= 0` for savings.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    id: AccountId,
    owner: String,
    balance: Decimal,
    kind: AccountKind,
}

impl Account {
    /// Create a savings account
    ///
    /// # Errors
    ///
    /// Returns `InvalidAccountParameter` if the id is empty, the initial
    /// balance is negative, or the interest rate is negative.
    pub fn savings(
        id: impl Into<AccountId>,
        owner: impl Into<String>,
        initial_balance: Decimal,
        interest_rate: Decimal,
    ) -> Result<Self, LedgerError> {
        let id = validate_id(id.into())?;

        if initial_balance < Decimal::ZERO {
            return Err(LedgerError::invalid_parameter(
                "initial_balance",
                initial_balance,
                "savings accounts cannot open with a negative balance",
            ));
        }
        if interest_rate < Decimal::ZERO {
            return Err(LedgerError::invalid_parameter(
                "interest_rate",
                interest_rate,
                "must not be negative",
            ));
        }

        Ok(Account {
            id,
            owner: owner.into(),
            balance: initial_balance,
            kind: AccountKind::Savings { interest_rate },
        })
    }

    /// Create a checking account
    ///
    /// # Errors
    ///
    /// Returns `InvalidAccountParameter` if the id is empty, the overdraft
    /// limit is negative, or the initial balance is already below
    /// `-overdraft_limit`.
    pub fn checking(
        id: impl Into<AccountId>,
        owner: impl Into<String>,
        initial_balance: Decimal,
        overdraft_limit: Decimal,
    ) -> Result<Self, LedgerError> {
        let id = validate_id(id.into())?;

        if overdraft_limit < Decimal::ZERO {
            return Err(LedgerError::invalid_parameter(
                "overdraft_limit",
                overdraft_limit,
                "must not be negative",
            ));
        }
        if initial_balance < -overdraft_limit {
            return Err(LedgerError::invalid_parameter(
                "initial_balance",
                initial_balance,
                "exceeds the overdraft limit",
            ));
        }

        Ok(Account {
            id,
            owner: owner.into(),
            balance: initial_balance,
            kind: AccountKind::Checking { overdraft_limit },
        })
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id.clone(),
            owner: self.owner.clone(),
            kind: self.kind.label(),
            balance: self.balance,
        }
    }

    /// Credit `amount` to the balance
    ///
    /// # Returns
    ///
    /// The balance after the deposit.
    ///
    /// # Errors
    ///
    /// - `NegativeAmount` if `amount < 0`
    /// - `ArithmeticOverflow` if the balance cannot represent the sum
    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal, LedgerError> {
        ensure_non_negative("deposit", amount)?;
        self.credit("deposit", amount)?;

        tracing::info!(account = %self.id, %amount, balance = %self.balance, "Deposit completed");
        Ok(self.balance)
    }

    /// Debit `amount` from the balance according to the account kind's policy
    ///
    /// Savings accounts allow the withdrawal iff `amount <= balance`; checking
    /// accounts allow it iff `amount <= balance + overdraft_limit`. On failure
    /// the balance is left unchanged.
    ///
    /// # Returns
    ///
    /// The balance after the withdrawal.
    ///
    /// # Errors
    ///
    /// - `NegativeAmount` if `amount < 0`
    /// - `InsufficientFunds` for a savings account without enough balance
    /// - `OverdraftLimitExceeded` for a checking account past its limit
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal, LedgerError> {
        ensure_non_negative("withdrawal", amount)?;

        match self.kind {
            AccountKind::Savings { .. } => {
                if amount > self.balance {
                    return Err(LedgerError::insufficient_funds(
                        self.id.as_str(),
                        self.balance,
                        amount,
                    ));
                }
            }
            AccountKind::Checking { overdraft_limit } => {
                // A sum too large to represent is certainly enough headroom
                let within_limit = self
                    .balance
                    .checked_add(overdraft_limit)
                    .map_or(true, |headroom| amount <= headroom);
                if !within_limit {
                    return Err(LedgerError::overdraft_limit_exceeded(
                        self.id.as_str(),
                        self.balance,
                        overdraft_limit,
                        amount,
                    ));
                }
            }
        }

        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("withdrawal", self.id.as_str()))?;

        tracing::info!(account = %self.id, %amount, balance = %self.balance, "Withdrawal completed");
        Ok(self.balance)
    }

    /// Apply the account kind's interest policy
    ///
    /// Savings accounts are credited `balance * interest_rate` through the
    /// deposit path. Checking accounts never accrue interest and are left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if the interest or the new balance cannot
    /// be represented.
    pub fn apply_interest(&mut self) -> Result<InterestOutcome, LedgerError> {
        match self.kind {
            AccountKind::Savings { interest_rate } => {
                let interest = self
                    .balance
                    .checked_mul(interest_rate)
                    .ok_or_else(|| LedgerError::arithmetic_overflow("interest", self.id.as_str()))?;
                let balance = self.deposit(interest)?;

                tracing::info!(account = %self.id, %interest, "Interest applied");
                Ok(InterestOutcome::Accrued { interest, balance })
            }
            AccountKind::Checking { .. } => {
                tracing::info!(account = %self.id, "Checking accounts do not accrue interest");
                Ok(InterestOutcome::NotApplicable)
            }
        }
    }

    /// Put back an amount taken by a withdrawal whose follow-up step failed
    pub(crate) fn revert_withdrawal(&mut self, amount: Decimal) -> Result<Decimal, LedgerError> {
        self.credit("withdrawal reversal", amount)?;
        tracing::warn!(account = %self.id, %amount, "Withdrawal reverted");
        Ok(self.balance)
    }

    fn credit(&mut self, operation: &str, amount: Decimal) -> Result<(), LedgerError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow(operation, self.id.as_str()))?;
        Ok(())
    }
}

fn validate_id(id: AccountId) -> Result<AccountId, LedgerError> {
    if id.as_str().trim().is_empty() {
        return Err(LedgerError::invalid_parameter("id", id, "must not be empty"));
    }
    Ok(id)
}

fn ensure_non_negative(operation: &str, amount: Decimal) -> Result<(), LedgerError> {
    if amount < Decimal::ZERO {
        return Err(LedgerError::negative_amount(operation, amount));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn savings(balance: i64, rate: Decimal) -> Account {
        Account::savings("S1", "Ana", Decimal::from(balance), rate).unwrap()
    }

    fn checking(balance: i64, limit: i64) -> Account {
        Account::checking("C1", "Ben", Decimal::from(balance), Decimal::from(limit)).unwrap()
    }

    #[test]
    fn test_savings_constructor_sets_fields() {
        let account = savings(1000, Decimal::new(5, 2));

        assert_eq!(account.id().as_str(), "S1");
        assert_eq!(account.owner(), "Ana");
        assert_eq!(account.balance(), Decimal::from(1000));
        assert_eq!(
            account.kind(),
            AccountKind::Savings {
                interest_rate: Decimal::new(5, 2)
            }
        );
    }

    #[rstest]
    #[case::negative_balance(Decimal::NEGATIVE_ONE, Decimal::ZERO, "initial_balance")]
    #[case::negative_rate(Decimal::ZERO, Decimal::new(-1, 2), "interest_rate")]
    fn test_savings_constructor_rejects_invalid_parameters(
        #[case] balance: Decimal,
        #[case] rate: Decimal,
        #[case] expected_field: &str,
    ) {
        let result = Account::savings("S1", "Ana", balance, rate);
        match result {
            Err(LedgerError::InvalidAccountParameter { field, .. }) => {
                assert_eq!(field, expected_field)
            }
            other => panic!("Expected InvalidAccountParameter, got {:?}", other),
        }
    }

    #[rstest]
    #[case::negative_limit(0, -1, "overdraft_limit")]
    #[case::below_overdraft(-201, 200, "initial_balance")]
    fn test_checking_constructor_rejects_invalid_parameters(
        #[case] balance: i64,
        #[case] limit: i64,
        #[case] expected_field: &str,
    ) {
        let result = Account::checking("C1", "Ben", Decimal::from(balance), Decimal::from(limit));
        match result {
            Err(LedgerError::InvalidAccountParameter { field, .. }) => {
                assert_eq!(field, expected_field)
            }
            other => panic!("Expected InvalidAccountParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_checking_may_open_overdrawn_within_limit() {
        let account = checking(-200, 200);
        assert_eq!(account.balance(), Decimal::from(-200));
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let result = Account::savings("  ", "Ana", Decimal::ZERO, Decimal::ZERO);
        assert!(matches!(
            result,
            Err(LedgerError::InvalidAccountParameter { .. })
        ));
    }

    #[rstest]
    #[case::savings(savings(100, Decimal::ZERO))]
    #[case::checking(checking(-50, 100))]
    fn test_deposit_adds_amount(#[case] mut account: Account) {
        let before = account.balance();
        let amount = Decimal::new(2550, 2);

        let balance = account.deposit(amount).unwrap();

        assert_eq!(balance, before + amount);
        assert_eq!(account.balance(), before + amount);
    }

    #[test]
    fn test_deposit_rejects_negative_amount() {
        let mut account = savings(100, Decimal::ZERO);

        let result = account.deposit(Decimal::NEGATIVE_ONE);

        assert!(matches!(result, Err(LedgerError::NegativeAmount { .. })));
        assert_eq!(account.balance(), Decimal::from(100));
    }

    #[test]
    fn test_deposit_overflow_leaves_balance_unchanged() {
        let mut account =
            Account::checking("C1", "Ben", Decimal::MAX, Decimal::ZERO).unwrap();

        let result = account.deposit(Decimal::ONE);

        assert!(matches!(
            result,
            Err(LedgerError::ArithmeticOverflow { .. })
        ));
        assert_eq!(account.balance(), Decimal::MAX);
    }

    #[rstest]
    #[case::partial(100, 40, Some(60))]
    #[case::exact(100, 100, Some(0))]
    #[case::zero_amount(100, 0, Some(100))]
    #[case::too_much(100, 101, None)]
    fn test_savings_withdraw_policy(
        #[case] balance: i64,
        #[case] amount: i64,
        #[case] expected: Option<i64>,
    ) {
        let mut account = savings(balance, Decimal::ZERO);

        let result = account.withdraw(Decimal::from(amount));

        match expected {
            Some(after) => {
                assert_eq!(result.unwrap(), Decimal::from(after));
                assert_eq!(account.balance(), Decimal::from(after));
            }
            None => {
                assert!(matches!(
                    result,
                    Err(LedgerError::InsufficientFunds { .. })
                ));
                assert_eq!(account.balance(), Decimal::from(balance));
            }
        }
    }

    #[rstest]
    #[case::into_overdraft(0, 200, 150, Some(-150))]
    #[case::to_the_limit(0, 200, 200, Some(-200))]
    #[case::past_the_limit(-150, 200, 100, None)]
    #[case::no_overdraft_allowed(50, 0, 51, None)]
    fn test_checking_withdraw_policy(
        #[case] balance: i64,
        #[case] limit: i64,
        #[case] amount: i64,
        #[case] expected: Option<i64>,
    ) {
        let mut account = checking(balance, limit);

        let result = account.withdraw(Decimal::from(amount));

        match expected {
            Some(after) => {
                assert_eq!(result.unwrap(), Decimal::from(after));
                assert_eq!(account.balance(), Decimal::from(after));
            }
            None => {
                assert!(matches!(
                    result,
                    Err(LedgerError::OverdraftLimitExceeded { .. })
                ));
                assert_eq!(account.balance(), Decimal::from(balance));
            }
        }
    }

    #[test]
    fn test_withdraw_rejects_negative_amount() {
        let mut account = checking(0, 200);

        let result = account.withdraw(Decimal::NEGATIVE_ONE);

        assert!(matches!(result, Err(LedgerError::NegativeAmount { .. })));
        assert_eq!(account.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_savings_interest_scenario() {
        let mut account = savings(1000, Decimal::new(5, 2));

        let outcome = account.apply_interest().unwrap();

        assert_eq!(
            outcome,
            InterestOutcome::Accrued {
                interest: Decimal::new(5000, 2),
                balance: Decimal::new(105000, 2),
            }
        );
        assert_eq!(account.balance(), Decimal::new(105000, 2));
    }

    #[rstest]
    #[case(Decimal::new(1234, 2), Decimal::new(3, 2))]
    #[case(Decimal::new(99999, 3), Decimal::new(125, 3))]
    #[case(Decimal::ZERO, Decimal::new(5, 2))]
    fn test_savings_interest_is_exact(#[case] balance: Decimal, #[case] rate: Decimal) {
        let mut account = Account::savings("S1", "Ana", balance, rate).unwrap();

        account.apply_interest().unwrap();

        assert_eq!(account.balance(), balance * (Decimal::ONE + rate));
    }

    #[test]
    fn test_checking_interest_is_noop() {
        let mut account = checking(-150, 200);

        let outcome = account.apply_interest().unwrap();

        assert_eq!(outcome, InterestOutcome::NotApplicable);
        assert_eq!(account.balance(), Decimal::from(-150));
    }

    #[test]
    fn test_summary_snapshot() {
        let account = checking(25, 10);

        let summary = account.summary();

        assert_eq!(summary.id, AccountId::new("C1"));
        assert_eq!(summary.owner, "Ben");
        assert_eq!(summary.kind, AccountKindLabel::Checking);
        assert_eq!(summary.balance, Decimal::from(25));
    }
}
