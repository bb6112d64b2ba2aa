//! Monetary precision module.
//!
//! This module provides:
//! - `Money` type alias over `rust_decimal::Decimal`
//! - `parse_money()` for reading prices from raw text
//! - `format_currency()` for locale-style currency strings
//!
//! All sums are kept in `Decimal` so revenue and monetary totals reconcile
//! exactly with the item prices they were built from.

use std::str::FromStr;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Type alias for monetary amounts.
pub type Money = Decimal;

/// Decimal places shown for currency amounts.
pub const CURRENCY_SCALE: u32 = 2;

/// Parse a price from text.
///
/// Returns `None` for empty, unparseable or negative values.
pub fn parse_money(value: &str) -> Option<Money> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
        .filter(|amount| !amount.is_sign_negative())
}

/// Sum amounts without intermediate rounding.
pub fn sum_money<I: IntoIterator<Item = Money>>(amounts: I) -> Money {
    amounts.into_iter().fold(Decimal::ZERO, |acc, amount| acc + amount)
}

/// Format an amount as `<symbol><thousands-grouped>.<cents>`.
///
/// # Arguments
/// * `amount` - Amount to format, rounded half away from zero to cents
/// * `symbol` - Currency symbol placed before the digits (e.g. `R$`)
///
/// # Returns
/// e.g. `R$1,234.56`, or `-R$12.00` for negative amounts
pub fn format_currency(amount: Money, symbol: &str) -> String {
    let rounded =
        amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.2}", rounded.abs());
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}{}.{}", sign, symbol, grouped, fraction)
}
