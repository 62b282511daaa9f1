//! Checkout errors.

use storefront::{payments::PaymentMethod, pricing::PricingError};
use thiserror::Error;

use crate::domain::{orders::OrdersServiceError, promo_codes::PromoCodesServiceError};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("order has no items")]
    EmptyCart,

    #[error("item quantity must be at least 1")]
    InvalidQuantity,

    #[error("invalid promo code")]
    InvalidPromoCode,

    #[error("order amounts are out of range")]
    AmountOutOfRange,

    #[error("order total {total} does not cover the items worth {items}")]
    TotalBelowItems { items: u64, total: u64 },

    #[error("order total {actual} does not match the expected {expected}")]
    TotalMismatch { expected: u64, actual: u64 },

    #[error("payment method {0} is not available for this order")]
    PaymentMethodUnavailable(PaymentMethod),

    #[error("pricing error")]
    Pricing(#[from] PricingError),

    #[error("failed to store order")]
    Orders(#[from] OrdersServiceError),

    #[error("promo code lookup failed")]
    PromoLookup(#[source] PromoCodesServiceError),
}

impl CheckoutError {
    /// Whether the customer's submission was at fault, as opposed to the shop.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Orders(_) | Self::PromoLookup(_) | Self::Pricing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failures_are_rejections() {
        assert!(CheckoutError::MissingField("customer_name").is_rejection());
        assert!(CheckoutError::PaymentMethodUnavailable(PaymentMethod::Cash).is_rejection());
        assert!(
            CheckoutError::TotalMismatch {
                expected: 1,
                actual: 2
            }
            .is_rejection()
        );
        assert!(CheckoutError::AmountOutOfRange.is_rejection());
        assert!(
            CheckoutError::TotalBelowItems {
                items: 30_00,
                total: 1
            }
            .is_rejection()
        );
    }

    #[test]
    fn storage_failures_are_not_rejections() {
        assert!(!CheckoutError::Orders(OrdersServiceError::NotFound).is_rejection());
        assert!(
            !CheckoutError::PromoLookup(PromoCodesServiceError::Sql(sqlx::Error::PoolTimedOut))
                .is_rejection()
        );
    }
}
