//! Pure parsing and rendering helpers for the shells
//!
//! Nothing here performs I/O: the console menu owns the read-retry loop and
//! only calls [`parse_amount`] to decide whether a line is acceptable.

use crate::types::LedgerError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a monetary amount or rate typed by a user
///
/// Surrounding whitespace, a leading `-`, a leading `$` and `,` thousands
/// separators are accepted. What remains must be plain digits with at most
/// one decimal point, so exponents (`1e3`) and underscores (`1_000`) are
/// rejected. The sign is preserved; range checks belong to the ledger.
///
/// # Errors
///
/// Returns `InvalidAmount` if the text is not a decimal number.
pub fn parse_amount(input: &str) -> Result<Decimal, LedgerError> {
    let trimmed = input.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let digits: String = unsigned
        .strip_prefix('$')
        .unwrap_or(unsigned)
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(LedgerError::invalid_amount(input.trim()));
    }

    let value = Decimal::from_str(&digits).map_err(|_| LedgerError::invalid_amount(input.trim()))?;
    Ok(if negative { -value } else { value })
}

/// Render an amount as currency, e.g. `$1,050.00` or `-$150.00`
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let fixed = format!("{:.2}", rounded.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${grouped}.{fraction}")
}
