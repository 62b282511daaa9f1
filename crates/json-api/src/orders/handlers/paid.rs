//! Order Payment Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetPaidRequest {
    pub is_paid: bool,
}

/// Order Payment Status Handler
#[endpoint(
    tags("admin"),
    summary = "Mark Order Paid Or Unpaid",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
#[tracing::instrument(name = "orders.set_paid", skip_all, err)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<SetPaidRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let is_paid = json.into_inner().is_paid;

    let order = state
        .app
        .orders
        .set_paid(order.into_inner().into(), is_paid)
        .await
        .map_err(into_status_error)?;

    tracing::info!(order_number = %order.order_number, is_paid, "updated payment status");

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::AUTHORIZATION,
        test::{ResponseExt, TestClient},
    };
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::orders::OrdersServiceError;

    use crate::test_helpers::{Mocks, admin_authorization, admin_service, make_order};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        admin_service(mocks, Router::with_path("orders/{order}/paid").put(handler))
    }

    #[tokio::test]
    async fn test_mark_paid_returns_updated_order() -> TestResult {
        let mut order = make_order(321);

        order.is_paid = true;

        let uuid = order.uuid;

        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_set_paid()
            .once()
            .withf(move |u, is_paid| *u == uuid && *is_paid)
            .return_once(move |_, _| Ok(order));

        let mut res = TestClient::put(format!("http://example.com/orders/{uuid}/paid"))
            .add_header(AUTHORIZATION, admin_authorization(), true)
            .json(&json!({ "is_paid": true }))
            .send(&make_service(mocks))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.is_paid, "order should be paid");

        Ok(())
    }

    #[tokio::test]
    async fn test_mark_paid_missing_order_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_set_paid()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/orders/{}/paid", Uuid::now_v7()))
            .add_header(AUTHORIZATION, admin_authorization(), true)
            .json(&json!({ "is_paid": false }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
