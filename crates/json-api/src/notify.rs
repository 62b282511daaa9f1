//! Notify Handler
//!
//! Sends a customer email for an order on request of the storefront.

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use storefront::order_numbers::OrderNumber;
use storefront_app::notifications::EmailKind;

use crate::{json_error::JsonError, observability::observe_email, state::State};

const MISSING_FIELDS: &str = "Missing required fields: type, orderNumber, total, email";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NotifyRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,

    pub order_number: Option<String>,

    /// Order total in minor units
    pub total: Option<u64>,

    pub email: Option<String>,
}

/// Provider receipt for a sent email.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NotifyResponse {
    pub success: bool,
    pub message_id: String,
}

impl NotifyResponse {
    pub(crate) fn sent(message_id: String) -> Self {
        Self {
            success: true,
            message_id,
        }
    }
}

struct Notification {
    kind: EmailKind,
    order_number: OrderNumber,
    total: u64,
    email: String,
}

impl NotifyRequest {
    fn into_notification(self) -> Result<Notification, JsonError> {
        let (Some(kind), Some(order_number), Some(total), Some(email)) =
            (self.kind, self.order_number, self.total, self.email)
        else {
            return Err(JsonError::bad_request(MISSING_FIELDS));
        };

        if kind.trim().is_empty() || order_number.trim().is_empty() || email.trim().is_empty() {
            return Err(JsonError::bad_request(MISSING_FIELDS));
        }

        let kind = kind
            .parse::<EmailKind>()
            .map_err(|_unknown| JsonError::bad_request(format!("Unknown email type: {kind}")))?;

        let order_number = order_number
            .trim()
            .parse::<OrderNumber>()
            .map_err(|source| JsonError::bad_request(source.to_string()))?;

        Ok(Notification {
            kind,
            order_number,
            total,
            email: email.trim().to_string(),
        })
    }
}

/// Notify Handler
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<NotifyResponse>, JsonError> {
    let state = depot
        .obtain::<Arc<State>>()
        .map_err(|_missing| JsonError::internal("Failed to send email"))?;

    let request = req.parse_json::<NotifyRequest>().await.map_err(|source| {
        warn!("unreadable notify payload: {source}");

        JsonError::bad_request(MISSING_FIELDS)
    })?;

    let notification = request.into_notification()?;

    let sent = state
        .app
        .notifier
        .send_email(
            notification.kind,
            notification.order_number,
            notification.total,
            &notification.email,
        )
        .await;

    observe_email(notification.kind.as_str(), sent.is_ok());

    match sent {
        Ok(sent) => {
            info!(
                kind = %notification.kind,
                order_number = %notification.order_number,
                message_id = %sent.id,
                "email sent"
            );

            Ok(Json(NotifyResponse::sent(sent.id)))
        }
        Err(source) => {
            error!(
                kind = %notification.kind,
                order_number = %notification.order_number,
                "failed to send email: {source}"
            );

            Err(JsonError::internal("Failed to send email"))
        }
    }
}
