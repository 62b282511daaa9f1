//! Order Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod lookup;
pub(crate) mod paid;
pub(crate) mod reminder;
pub(crate) mod stats;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::records::{OrderItemRecord, OrderRecord};

/// An order with its items, amounts in minor units.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// Three-digit order number shown to the customer
    pub order_number: String,

    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub customer_address: String,
    pub payment_method: String,
    pub promo_code: Option<String>,
    pub discount_amount: u64,
    pub total: u64,
    pub is_paid: bool,
    pub created_at: String,
    pub items: Vec<OrderItemResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub color: Option<String>,
    pub quantity: u32,
    pub price: u64,
    pub shipping_time: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            order_number: order.order_number.to_string(),
            customer_name: order.customer_name,
            customer_email: order.customer_email,
            customer_phone: order.customer_phone,
            customer_address: order.customer_address,
            payment_method: order.payment_method.to_string(),
            promo_code: order.promo_code.map(String::from),
            discount_amount: order.discount_amount,
            total: order.total,
            is_paid: order.is_paid,
            created_at: order.created_at.to_string(),
            items: order.items.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        OrderItemResponse {
            uuid: item.uuid.into(),
            product_id: item.product_uuid.into(),
            product_name: item.product_name,
            color: item.color,
            quantity: item.quantity,
            price: item.price,
            shipping_time: item.shipping_time,
        }
    }
}

impl From<Vec<OrderRecord>> for OrdersResponse {
    fn from(orders: Vec<OrderRecord>) -> Self {
        OrdersResponse {
            orders: orders.into_iter().map(Into::into).collect(),
        }
    }
}
