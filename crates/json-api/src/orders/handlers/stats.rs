//! Dashboard Stats Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Dashboard figures. Revenue is in minor units.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatsResponse {
    pub total_orders: u64,
    pub paid_orders: u64,
    pub pending_orders: u64,
    pub paid_revenue: u64,
    pub total_products: u64,
}

/// Dashboard Stats Handler
#[endpoint(tags("admin"), summary = "Dashboard Stats", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<StatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stats = state
        .app
        .orders
        .order_stats()
        .await
        .map_err(into_status_error)?;

    let total_products = state
        .app
        .products
        .count_products()
        .await
        .or_500("failed to count products")?;

    Ok(Json(StatsResponse {
        total_orders: stats.total_orders,
        paid_orders: stats.paid_orders,
        pending_orders: stats.pending_orders,
        paid_revenue: stats.paid_revenue,
        total_products,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::AUTHORIZATION,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use storefront_app::domain::orders::records::OrderStats;

    use crate::test_helpers::{Mocks, admin_authorization, admin_service};

    use super::*;

    #[tokio::test]
    async fn test_stats_combine_orders_and_products() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.orders.expect_order_stats().once().return_once(|| {
            Ok(OrderStats {
                total_orders: 5,
                paid_orders: 3,
                pending_orders: 2,
                paid_revenue: 120_50,
            })
        });

        mocks
            .products
            .expect_count_products()
            .once()
            .return_once(|| Ok(12));

        let response: StatsResponse = TestClient::get("http://example.com/stats")
            .add_header(AUTHORIZATION, admin_authorization(), true)
            .send(&admin_service(mocks, Router::with_path("stats").get(handler)))
            .await
            .take_json()
            .await?;

        assert_eq!(response.total_orders, 5);
        assert_eq!(response.pending_orders, 2);
        assert_eq!(response.paid_revenue, 120_50);
        assert_eq!(response.total_products, 12);

        Ok(())
    }
}
