//! Checkout Data

use storefront::{cart::CheckoutLine, order_numbers::OrderNumber, payments::PaymentMethod};

use crate::domain::orders::records::OrderUuid;

/// A customer's order submission.
///
/// `total` is what the customer was shown, after `discount_amount` was taken off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub customer_address: String,
    pub payment_method: PaymentMethod,
    pub promo_code: Option<String>,
    pub discount_amount: u64,
    pub total: u64,
    pub items: Vec<CheckoutLine>,
}

/// Identifiers of a successfully placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedOrder {
    pub order_number: OrderNumber,
    pub order_uuid: OrderUuid,
}
