//! Orders Data

use storefront::{payments::PaymentMethod, promotions::PromoCodeName};

use crate::domain::{
    orders::records::{OrderItemUuid, OrderUuid},
    products::records::ProductUuid,
};

/// New Order Data
///
/// The order number is allocated when the order is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub customer_address: String,
    pub payment_method: PaymentMethod,
    pub promo_code: Option<PromoCodeName>,
    pub discount_amount: u64,
    pub total: u64,
    pub items: Vec<NewOrderItem>,
}

/// New Order Item Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub uuid: OrderItemUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub color: Option<String>,
    pub quantity: u32,
    pub price: u64,
    pub shipping_time: String,
}
