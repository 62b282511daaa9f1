//! Order Records

use jiff::Timestamp;
use storefront::{order_numbers::OrderNumber, payments::PaymentMethod, promotions::PromoCodeName};

use crate::{domain::products::records::ProductUuid, uuids::TypedUuid};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub order_number: OrderNumber,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub customer_address: String,
    pub payment_method: PaymentMethod,
    pub promo_code: Option<PromoCodeName>,
    pub discount_amount: u64,
    pub total: u64,
    pub is_paid: bool,
    pub items: Vec<OrderItemRecord>,
    pub created_at: Timestamp,
}

impl OrderRecord {
    /// Product names joined for display, e.g. `Lamp, Coaster`.
    pub fn product_summary(&self) -> String {
        self.items
            .iter()
            .map(|item| item.product_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Order Item Record
///
/// Product details are copied at order time so later catalog edits leave the order intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub color: Option<String>,
    pub quantity: u32,
    pub price: u64,
    pub shipping_time: String,
}

/// Dashboard figures across all orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderStats {
    pub total_orders: u64,
    pub paid_orders: u64,
    pub pending_orders: u64,
    pub paid_revenue: u64,
}
