//! Command processing engine
//!
//! This module provides the CommandEngine that routes shell commands to a
//! ledger and hands back structured outcomes. Shells never touch the ledger
//! directly; they build a [`Command`], execute it here and render the
//! [`CommandOutcome`] or [`LedgerError`].

use crate::core::traits::Ledger;
use crate::types::{AccountSummary, Command, CommandOutcome, LedgerError};

/// Routes commands to an owned ledger
pub struct CommandEngine {
    ledger: Box<dyn Ledger>,
}

impl CommandEngine {
    pub fn new(ledger: Box<dyn Ledger>) -> Self {
        CommandEngine { ledger }
    }

    /// Execute a single command
    ///
    /// # Errors
    ///
    /// Returns whatever error the ledger reports; the ledger is left
    /// unchanged by a failed command.
    pub fn execute(&mut self, command: Command) -> Result<CommandOutcome, LedgerError> {
        let name = command.name();
        let result = self.dispatch(command);

        if let Err(error) = &result {
            tracing::debug!(command = name, %error, "Command rejected");
        }
        result
    }

    /// Snapshot of every account in insertion order
    pub fn accounts(&self) -> Vec<AccountSummary> {
        self.ledger.list_accounts()
    }

    pub fn ledger(&self) -> &dyn Ledger {
        self.ledger.as_ref()
    }

    fn dispatch(&mut self, command: Command) -> Result<CommandOutcome, LedgerError> {
        match command {
            Command::OpenSavings {
                id,
                owner,
                initial_balance,
                interest_rate,
            } => self
                .ledger
                .open_savings(id, owner, initial_balance, interest_rate)
                .map(CommandOutcome::Opened),
            Command::OpenChecking {
                id,
                owner,
                initial_balance,
                overdraft_limit,
            } => self
                .ledger
                .open_checking(id, owner, initial_balance, overdraft_limit)
                .map(CommandOutcome::Opened),
            Command::Deposit { id, amount } => {
                let balance = self.ledger.deposit(id.as_str(), amount)?;
                Ok(CommandOutcome::Deposited { id, balance })
            }
            Command::Withdraw { id, amount } => {
                let balance = self.ledger.withdraw(id.as_str(), amount)?;
                Ok(CommandOutcome::Withdrawn { id, balance })
            }
            Command::ApplyInterest { id } => {
                let outcome = self.ledger.apply_interest(id.as_str())?;
                Ok(CommandOutcome::Interest { id, outcome })
            }
            Command::Transfer { from, to, amount } => self
                .ledger
                .transfer(from.as_str(), to.as_str(), amount)
                .map(CommandOutcome::Transferred),
            Command::List => Ok(CommandOutcome::Listed(self.ledger.list_accounts())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::LedgerBackend;
    use crate::core::create_ledger;
    use crate::types::{AccountId, InterestOutcome};
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn open_accounts(engine: &mut CommandEngine) {
        engine
            .execute(Command::OpenSavings {
                id: AccountId::new("S1"),
                owner: "Ana".to_string(),
                initial_balance: Decimal::from(1000),
                interest_rate: Decimal::new(5, 2),
            })
            .unwrap();
        engine
            .execute(Command::OpenChecking {
                id: AccountId::new("C1"),
                owner: "Ben".to_string(),
                initial_balance: Decimal::ZERO,
                overdraft_limit: Decimal::from(200),
            })
            .unwrap();
    }

    #[rstest]
    fn test_engine_runs_scenario(
        #[values(LedgerBackend::Sequential, LedgerBackend::Shared)] backend: LedgerBackend,
    ) {
        let mut engine = CommandEngine::new(create_ledger(backend));
        open_accounts(&mut engine);

        let interest = engine
            .execute(Command::ApplyInterest {
                id: AccountId::new("S1"),
            })
            .unwrap();
        assert_eq!(
            interest,
            CommandOutcome::Interest {
                id: AccountId::new("S1"),
                outcome: InterestOutcome::Accrued {
                    interest: Decimal::from(50),
                    balance: Decimal::from(1050),
                },
            }
        );

        let withdrawn = engine
            .execute(Command::Withdraw {
                id: AccountId::new("C1"),
                amount: Decimal::from(150),
            })
            .unwrap();
        assert_eq!(
            withdrawn,
            CommandOutcome::Withdrawn {
                id: AccountId::new("C1"),
                balance: Decimal::from(-150),
            }
        );

        let transferred = engine
            .execute(Command::Transfer {
                from: AccountId::new("S1"),
                to: AccountId::new("C1"),
                amount: Decimal::from(300),
            })
            .unwrap();
        match transferred {
            CommandOutcome::Transferred(receipt) => {
                assert_eq!(receipt.from_balance, Decimal::from(750));
                assert_eq!(receipt.to_balance, Decimal::from(150));
            }
            other => panic!("Expected Transferred, got {:?}", other),
        }

        match engine.execute(Command::List).unwrap() {
            CommandOutcome::Listed(accounts) => assert_eq!(accounts.len(), 2),
            other => panic!("Expected Listed, got {:?}", other),
        }
    }

    #[test]
    fn test_engine_reports_errors_without_mutation() {
        let mut engine = CommandEngine::new(create_ledger(LedgerBackend::Sequential));
        open_accounts(&mut engine);
        let before = engine.accounts();

        let result = engine.execute(Command::Deposit {
            id: AccountId::new("nope"),
            amount: Decimal::ONE,
        });

        assert_eq!(result, Err(LedgerError::account_not_found("nope")));
        assert_eq!(engine.accounts(), before);
        assert_eq!(engine.ledger().total_balance().unwrap(), Decimal::from(1000));
    }

    #[test]
    fn test_engine_rejects_duplicate_open() {
        let mut engine = CommandEngine::new(create_ledger(LedgerBackend::Sequential));
        open_accounts(&mut engine);

        let result = engine.execute(Command::OpenChecking {
            id: AccountId::new("S1"),
            owner: "Eve".to_string(),
            initial_balance: Decimal::ZERO,
            overdraft_limit: Decimal::ZERO,
        });

        assert_eq!(result, Err(LedgerError::duplicate_account_id("S1")));
    }
}
