//! Money
//!
//! Every amount handled by the storefront is an integer number of minor units (Rappen).
//! These helpers convert to and from the decimal CHF values shown to customers.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso};

/// Currency every storefront amount is denominated in.
pub const CURRENCY: &iso::Currency = iso::CHF;

/// Format an amount of minor units for display, e.g. `CHF 33.00`.
pub fn format_chf(minor: u64) -> String {
    let money = Money::from_minor(i64::try_from(minor).unwrap_or(i64::MAX), CURRENCY);

    format!("{} {:.2}", CURRENCY.iso_alpha_code, money.amount())
}

/// Convert minor units into a decimal CHF value.
pub fn to_decimal(minor: u64) -> Decimal {
    Decimal::from(minor) / Decimal::ONE_HUNDRED
}

/// Convert a decimal CHF value into minor units, rounding half away from zero.
///
/// Returns `None` for negative or unrepresentable values.
pub fn from_decimal(value: Decimal) -> Option<u64> {
    value
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
}
