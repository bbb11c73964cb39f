//! Interactive console menu
//!
//! A thin shell over the [`CommandEngine`]: it prompts for a menu choice and
//! the values the chosen operation needs, executes the resulting command and
//! renders the outcome. Ledger errors are printed and the loop continues.
//! Malformed numbers are re-prompted until a valid value is entered. End of
//! input ends the session.

use crate::cli::input::{format_currency, parse_amount};
use crate::core::CommandEngine;
use crate::types::{AccountId, Command, CommandOutcome, InterestOutcome, LedgerError};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

const MENU: &str = "\
=== Bank Ledger ===
1. Open savings account
2. Open checking account
3. Deposit
4. Withdraw
5. Apply interest
6. Transfer
7. List accounts
0. Exit
";

/// Console session reading from `input` and writing to `output`
pub struct ConsoleMenu<'a, R, W> {
    engine: &'a mut CommandEngine,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> ConsoleMenu<'a, R, W> {
    pub fn new(engine: &'a mut CommandEngine, input: R, output: W) -> Self {
        ConsoleMenu {
            engine,
            input,
            output,
        }
    }

    /// Run the menu loop until the user exits or input ends
    ///
    /// # Errors
    ///
    /// Only I/O failures on the console are returned; ledger errors are
    /// shown to the user.
    pub fn run(&mut self) -> Result<(), LedgerError> {
        loop {
            write!(self.output, "\n{MENU}")?;
            let Some(choice) = self.read_line("Choose an option: ")? else {
                break;
            };

            let command = match choice.as_str() {
                "0" => break,
                "1" => self.read_open_savings()?,
                "2" => self.read_open_checking()?,
                "3" => self.read_deposit()?,
                "4" => self.read_withdraw()?,
                "5" => self.read_account_id()?.map(|id| Command::ApplyInterest { id }),
                "6" => self.read_transfer()?,
                "7" => Some(Command::List),
                other => {
                    writeln!(self.output, "Unknown option '{other}'")?;
                    continue;
                }
            };

            let Some(command) = command else {
                break;
            };

            match self.engine.execute(command) {
                Ok(outcome) => self.render(&outcome)?,
                Err(error) => writeln!(self.output, "Error: {error}")?,
            }
        }

        writeln!(self.output, "Goodbye.")?;
        self.output.flush()?;
        Ok(())
    }

    fn read_open_savings(&mut self) -> Result<Option<Command>, LedgerError> {
        let Some((id, owner, initial_balance)) = self.read_new_account()? else {
            return Ok(None);
        };
        let Some(interest_rate) = self.read_amount("Interest rate (e.g. 0.05): ")? else {
            return Ok(None);
        };
        Ok(Some(Command::OpenSavings {
            id,
            owner,
            initial_balance,
            interest_rate,
        }))
    }

    fn read_open_checking(&mut self) -> Result<Option<Command>, LedgerError> {
        let Some((id, owner, initial_balance)) = self.read_new_account()? else {
            return Ok(None);
        };
        let Some(overdraft_limit) = self.read_amount("Overdraft limit: ")? else {
            return Ok(None);
        };
        Ok(Some(Command::OpenChecking {
            id,
            owner,
            initial_balance,
            overdraft_limit,
        }))
    }

    fn read_new_account(&mut self) -> Result<Option<(AccountId, String, Decimal)>, LedgerError> {
        let Some(id) = self.read_account_id()? else {
            return Ok(None);
        };
        let Some(owner) = self.read_text("Owner name: ")? else {
            return Ok(None);
        };
        let Some(initial_balance) = self.read_amount("Initial balance: ")? else {
            return Ok(None);
        };
        Ok(Some((id, owner, initial_balance)))
    }

    fn read_deposit(&mut self) -> Result<Option<Command>, LedgerError> {
        let Some(id) = self.read_account_id()? else {
            return Ok(None);
        };
        let Some(amount) = self.read_amount("Amount to deposit: ")? else {
            return Ok(None);
        };
        Ok(Some(Command::Deposit { id, amount }))
    }

    fn read_withdraw(&mut self) -> Result<Option<Command>, LedgerError> {
        let Some(id) = self.read_account_id()? else {
            return Ok(None);
        };
        let Some(amount) = self.read_amount("Amount to withdraw: ")? else {
            return Ok(None);
        };
        Ok(Some(Command::Withdraw { id, amount }))
    }

    fn read_transfer(&mut self) -> Result<Option<Command>, LedgerError> {
        let Some(from) = self.read_text("Source account id: ")? else {
            return Ok(None);
        };
        let Some(to) = self.read_text("Destination account id: ")? else {
            return Ok(None);
        };
        let Some(amount) = self.read_amount("Amount to transfer: ")? else {
            return Ok(None);
        };
        Ok(Some(Command::Transfer {
            from: AccountId::new(from),
            to: AccountId::new(to),
            amount,
        }))
    }

    fn read_account_id(&mut self) -> Result<Option<AccountId>, LedgerError> {
        Ok(self.read_text("Account id: ")?.map(AccountId::new))
    }

    /// Prompt until a non-empty line is entered
    fn read_text(&mut self, prompt: &str) -> Result<Option<String>, LedgerError> {
        loop {
            match self.read_line(prompt)? {
                Some(line) if line.is_empty() => writeln!(self.output, "A value is required.")?,
                other => return Ok(other),
            }
        }
    }

    /// Prompt until a parseable amount is entered
    fn read_amount(&mut self, prompt: &str) -> Result<Option<Decimal>, LedgerError> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match parse_amount(&line) {
                Ok(amount) => return Ok(Some(amount)),
                Err(error) => writeln!(self.output, "{error}. Please enter a number.")?,
            }
        }
    }

    /// Read one trimmed line; `None` at end of input
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, LedgerError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn render(&mut self, outcome: &CommandOutcome) -> Result<(), LedgerError> {
        match outcome {
            CommandOutcome::Opened(summary) => writeln!(
                self.output,
                "Opened {} account {} for {} with balance {}",
                summary.kind,
                summary.id,
                summary.owner,
                format_currency(summary.balance)
            )?,
            CommandOutcome::Deposited { id, balance } => writeln!(
                self.output,
                "Deposit to {id} complete. Balance: {}",
                format_currency(*balance)
            )?,
            CommandOutcome::Withdrawn { id, balance } => writeln!(
                self.output,
                "Withdrawal from {id} complete. Balance: {}",
                format_currency(*balance)
            )?,
            CommandOutcome::Interest {
                id,
                outcome: InterestOutcome::Accrued { interest, balance },
            } => writeln!(
                self.output,
                "Interest of {} applied to {id}. Balance: {}",
                format_currency(*interest),
                format_currency(*balance)
            )?,
            CommandOutcome::Interest {
                id,
                outcome: InterestOutcome::NotApplicable,
            } => writeln!(
                self.output,
                "Account {id} is a checking account and does not accrue interest."
            )?,
            CommandOutcome::Transferred(receipt) => writeln!(
                self.output,
                "Transferred {} from {} to {}. {} balance: {}, {} balance: {}",
                format_currency(receipt.amount),
                receipt.from,
                receipt.to,
                receipt.from,
                format_currency(receipt.from_balance),
                receipt.to,
                format_currency(receipt.to_balance)
            )?,
            CommandOutcome::Listed(accounts) if accounts.is_empty() => {
                writeln!(self.output, "No accounts.")?
            }
            CommandOutcome::Listed(accounts) => {
                for account in accounts {
                    writeln!(
                        self.output,
                        "{} ({}, {}): {}",
                        account.owner,
                        account.id,
                        account.kind,
                        format_currency(account.balance)
                    )?;
                }
            }
        }
        Ok(())
    }
}
