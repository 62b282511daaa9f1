//! Order Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use storefront_app::domain::{checkout::CheckoutError, orders::OrdersServiceError};

use crate::{
    json_error::JsonError,
    observability::{CheckoutOutcome, observe_checkout},
};

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::OrderNumbersExhausted => {
            error!("no order numbers left");

            StatusError::service_unavailable()
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Customer mistakes become 400s carrying the reason; shop failures are logged and hidden.
pub(crate) fn checkout_error(error: CheckoutError) -> JsonError {
    if error.is_rejection() {
        observe_checkout(CheckoutOutcome::Rejected);
        warn!("checkout rejected: {error}");

        return JsonError::bad_request(error.to_string());
    }

    observe_checkout(CheckoutOutcome::Failed);
    error!(error = ?error, "checkout failed");

    JsonError::internal("Failed to create order")
}

#[cfg(test)]
mod tests {
    use storefront::payments::PaymentMethod;

    use super::*;

    #[test]
    fn rejections_carry_their_reason() {
        let error = checkout_error(CheckoutError::PaymentMethodUnavailable(PaymentMethod::Cash));

        assert_eq!(
            error,
            JsonError::bad_request("payment method cash is not available for this order")
        );
    }

    #[test]
    fn storage_failures_are_hidden() {
        let error = checkout_error(CheckoutError::Orders(OrdersServiceError::InvalidData));

        assert_eq!(error, JsonError::internal("Failed to create order"));
    }
}
