//! Create Order Handler
//!
//! Checkout submission from the storefront. Failures answer with `{ "error": "..." }`.

use std::sync::Arc;

use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use storefront::{cart::CheckoutLine, payments::PaymentMethod};
use storefront_app::domain::checkout::data::CheckoutRequest;

use crate::{
    json_error::JsonError,
    observability::{CheckoutOutcome, observe_checkout},
    orders::errors::checkout_error,
    state::State,
};

/// Checkout form payload. Amounts are minor units.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CreateOrderRequest {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub payment_method: Option<String>,
    pub promo_code: Option<String>,

    #[serde(default)]
    pub discount_amount: u64,

    pub total: Option<u64>,

    #[serde(default)]
    pub items: Vec<CheckoutLine>,
}

impl CreateOrderRequest {
    fn into_checkout(self) -> Result<CheckoutRequest, JsonError> {
        let (Some(customer_name), Some(customer_email), Some(customer_address), Some(method), Some(total)) = (
            self.customer_name,
            self.customer_email,
            self.customer_address,
            self.payment_method,
            self.total,
        ) else {
            return Err(JsonError::bad_request("Missing required fields"));
        };

        if self.items.is_empty() {
            return Err(JsonError::bad_request("Missing required fields"));
        }

        let payment_method = method
            .trim()
            .to_lowercase()
            .parse::<PaymentMethod>()
            .map_err(JsonError::bad_request)?;

        Ok(CheckoutRequest {
            customer_name,
            customer_email,
            customer_phone: self.customer_phone,
            customer_address,
            payment_method,
            promo_code: self.promo_code,
            discount_amount: self.discount_amount,
            total,
            items: self.items,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct OrderCreatedResponse {
    pub order_number: String,
    pub order_id: Uuid,
}

/// Create Order Handler
#[handler]
#[tracing::instrument(name = "orders.create", skip_all, fields(order_number = tracing::field::Empty))]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<OrderCreatedResponse>, JsonError> {
    let state = depot
        .obtain::<Arc<State>>()
        .map_err(|_missing| JsonError::internal("Failed to create order"))?;

    let request = match req.parse_json::<CreateOrderRequest>().await {
        Ok(request) => request,
        Err(source) => {
            observe_checkout(CheckoutOutcome::Rejected);
            warn!("unreadable order payload: {source}");

            return Err(JsonError::bad_request("Invalid order payload"));
        }
    };

    let checkout = request.into_checkout().inspect_err(|_rejected| {
        observe_checkout(CheckoutOutcome::Rejected);
    })?;

    let placed = state
        .app
        .checkout
        .place_order(checkout)
        .await
        .map_err(checkout_error)?;

    observe_checkout(CheckoutOutcome::Placed);

    tracing::Span::current().record("order_number", tracing::field::display(placed.order_number));

    info!(order_uuid = %placed.order_uuid, "order created");

    Ok(Json(OrderCreatedResponse {
        order_number: placed.order_number.to_string(),
        order_id: placed.order_uuid.into(),
    }))
}
