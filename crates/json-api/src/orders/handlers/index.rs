//! Order Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{OrdersResponse, errors::into_status_error},
    state::State,
};

/// Order Index Handler
///
/// Every order with its items, newest first.
#[endpoint(tags("admin"), summary = "List Orders", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .list_orders()
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::AUTHORIZATION,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, admin_authorization, admin_service, make_order};

    use super::*;

    #[tokio::test]
    async fn test_index_lists_orders_in_service_order() -> TestResult {
        let newest = make_order(555);
        let oldest = make_order(111);

        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_list_orders()
            .once()
            .return_once(move || Ok(vec![newest, oldest]));

        let response: OrdersResponse = TestClient::get("http://example.com/orders")
            .add_header(AUTHORIZATION, admin_authorization(), true)
            .send(&admin_service(mocks, Router::with_path("orders").get(handler)))
            .await
            .take_json()
            .await?;

        assert_eq!(
            response
                .orders
                .iter()
                .map(|order| order.order_number.as_str())
                .collect::<Vec<_>>(),
            vec!["555", "111"]
        );

        Ok(())
    }
}
