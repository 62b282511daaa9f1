//! Test Helpers

use storefront::payments::PaymentMethod;

use crate::domain::{
    orders::{
        data::{NewOrder, NewOrderItem},
        records::{OrderItemUuid, OrderUuid},
    },
    products::records::ProductUuid,
};

/// A two-line order worth `CHF 33.00`, placed with IBAN and no promo code.
pub(crate) fn new_order(phone: &str) -> NewOrder {
    NewOrder {
        uuid: OrderUuid::new(),
        customer_name: "Ada Muster".to_string(),
        customer_email: "ada@example.ch".to_string(),
        customer_phone: Some(phone.to_string()),
        customer_address: "Rue du Rhône 1, 1204 Genève".to_string(),
        payment_method: PaymentMethod::Iban,
        promo_code: None,
        discount_amount: 0,
        total: 33_00,
        items: vec![
            new_order_item("Lamp", None, 1, 20_00),
            new_order_item("Coaster", Some("black"), 2, 5_00),
        ],
    }
}

pub(crate) fn new_order_item(
    name: &str,
    color: Option<&str>,
    quantity: u32,
    price: u64,
) -> NewOrderItem {
    NewOrderItem {
        uuid: OrderItemUuid::new(),
        product_uuid: ProductUuid::new(),
        product_name: name.to_string(),
        color: color.map(str::to_string),
        quantity,
        price,
        shipping_time: "3-5 business days".to_string(),
    }
}
