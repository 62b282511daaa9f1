//! Payment Reminder Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::{error, info};
use uuid::Uuid;

use storefront_app::notifications::EmailKind;

use crate::{
    extensions::*,
    notify::NotifyResponse,
    observability::observe_email,
    orders::errors::into_status_error,
    state::State,
};

/// Payment Reminder Handler
///
/// Sends the payment reminder email for an order and reports the provider's answer.
#[endpoint(
    tags("admin"),
    summary = "Send Payment Reminder",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Reminder sent"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Email provider failed"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<NotifyResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .get_order(order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    let kind = EmailKind::PaymentReminder;

    let sent = state
        .app
        .notifier
        .send_email(kind, order.order_number, order.total, &order.customer_email)
        .await;

    observe_email(kind.as_str(), sent.is_ok());

    match sent {
        Ok(sent) => {
            info!(order_number = %order.order_number, message_id = %sent.id, "payment reminder sent");

            Ok(Json(NotifyResponse::sent(sent.id)))
        }
        Err(source) => {
            error!(order_number = %order.order_number, "failed to send payment reminder: {source}");

            Err(StatusError::bad_gateway().brief("Failed to send email"))
        }
    }
}
