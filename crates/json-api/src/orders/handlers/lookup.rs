//! Order Lookup Handler
//!
//! Lets customers find their orders by order number or by the phone number they ordered with.

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use storefront::order_numbers::OrderNumber;
use storefront_app::domain::orders::OrdersServiceError;

use crate::{
    extensions::*,
    orders::{OrdersResponse, errors::into_status_error},
    state::State,
};

/// Order Lookup Handler
#[endpoint(
    tags("orders"),
    summary = "Look Up Orders",
    responses(
        (status_code = StatusCode::OK, description = "Matching orders, newest first"),
        (status_code = StatusCode::BAD_REQUEST, description = "Neither order_number nor phone given"),
    ),
)]
pub(crate) async fn handler(
    order_number: QueryParam<String, false>,
    phone: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order_number = order_number
        .into_inner()
        .filter(|value| !value.trim().is_empty());

    let phone = phone.into_inner().filter(|value| !value.trim().is_empty());

    let orders = match (order_number, phone) {
        (Some(order_number), _) => {
            // A number that cannot exist matches no order.
            let Ok(order_number) = order_number.trim().parse::<OrderNumber>() else {
                return Ok(Json(OrdersResponse { orders: Vec::new() }));
            };

            match state.app.orders.get_order_by_number(order_number).await {
                Ok(order) => vec![order],
                Err(OrdersServiceError::NotFound) => Vec::new(),
                Err(error) => return Err(into_status_error(error)),
            }
        }
        (None, Some(phone)) => state
            .app
            .orders
            .find_orders_by_phone(phone.trim())
            .await
            .map_err(into_status_error)?,
        (None, None) => {
            return Err(StatusError::bad_request().brief("order_number or phone is required"));
        }
    };

    Ok(Json(orders.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, make_order, service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Router::with_path("orders").get(handler))
    }

    #[tokio::test]
    async fn test_lookup_by_number_returns_the_order() -> TestResult {
        let order = make_order(427);
        let uuid = order.uuid;

        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_get_order_by_number()
            .once()
            .withf(|number| number.get() == 427)
            .return_once(move |_| Ok(order));

        let response: OrdersResponse = TestClient::get("http://example.com/orders?order_number=427")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.orders.len(), 1, "expected exactly one order");
        assert_eq!(response.orders.first().map(|order| order.uuid), Some(uuid.into_uuid()));
        assert_eq!(
            response.orders.first().map(|order| order.items.len()),
            Some(1)
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_number_returns_empty_list() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_get_order_by_number()
            .once()
            .return_once(|_| Err(OrdersServiceError::NotFound));

        let response: OrdersResponse = TestClient::get("http://example.com/orders?order_number=999")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert!(response.orders.is_empty(), "expected no orders");

        Ok(())
    }

    #[tokio::test]
    async fn test_lookup_by_phone_forwards_trimmed_phone() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_find_orders_by_phone()
            .once()
            .withf(|phone| phone == "0791234567")
            .return_once(|_| Ok(vec![make_order(101), make_order(102)]));

        let response: OrdersResponse = TestClient::get("http://example.com/orders?phone=%200791234567")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.orders.len(), 2, "expected both orders");

        Ok(())
    }

    #[tokio::test]
    async fn test_lookup_without_criteria_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/orders")
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_number_returns_empty_list() -> TestResult {
        let mut res = TestClient::get("http://example.com/orders?order_number=42")
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let response: OrdersResponse = res.take_json().await?;

        assert!(response.orders.is_empty(), "expected no orders");

        Ok(())
    }
}
