//! Pricing
//!
//! Applies a promo code's discount to a cart subtotal. The discount is capped at the
//! subtotal so a total can never become negative.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

use crate::promotions::{DiscountRule, PromoCode};

/// Errors raised while pricing an order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Percentage calculation could not be represented in minor units.
    #[error("discount calculation overflowed")]
    Overflow,
}

/// Price breakdown for a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// Cart total before any discount, in minor units.
    pub subtotal: u64,

    /// Amount actually taken off, never more than `subtotal`.
    pub discount: u64,

    /// Amount payable.
    pub total: u64,
}

/// Discount a rule grants on `subtotal`, before capping.
///
/// Percentage discounts are rounded half away from zero to a whole minor unit.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] when the percentage cannot be represented.
pub fn discount_for(subtotal: u64, rule: &DiscountRule) -> Result<u64, PricingError> {
    match rule {
        DiscountRule::Fixed(amount) => Ok(*amount),
        DiscountRule::Percentage(percent) => Decimal::from(subtotal)
            .checked_mul(*percent)
            .and_then(|value| value.checked_div(Decimal::ONE_HUNDRED))
            .ok_or(PricingError::Overflow)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
            .ok_or(PricingError::Overflow),
    }
}

/// Price a subtotal with an optional promo code applied.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] when the discount cannot be represented.
pub fn quote(subtotal: u64, promo: Option<&PromoCode>) -> Result<Quote, PricingError> {
    let discount = match promo {
        Some(promo) if promo.is_active => discount_for(subtotal, &promo.rule)?.min(subtotal),
        Some(_) | None => 0,
    };

    Ok(Quote {
        subtotal,
        discount,
        total: subtotal - discount,
    })
}
