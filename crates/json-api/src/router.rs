//! App Router

use salvo::Router;

use crate::{
    admin, healthcheck, notify, observability::metrics_handler, orders, products, promo_codes,
};

/// Routes for the storefront, the admin area and operational probes.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::with_path("orders")
                .get(orders::lookup::handler)
                .post(orders::create::handler),
        )
        .push(Router::with_path("promo-codes/validate").post(promo_codes::validate::handler))
        .push(Router::with_path("notify").post(notify::handler))
        .push(admin_router())
}

fn admin_router() -> Router {
    Router::with_path("admin")
        .hoop(admin::middleware::handler)
        .push(Router::with_path("stats").get(orders::stats::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("orders").get(orders::index::handler).push(
                Router::with_path("{order}")
                    .delete(orders::delete::handler)
                    .push(Router::with_path("paid").put(orders::paid::handler))
                    .push(Router::with_path("reminder").post(orders::reminder::handler)),
            ),
        )
        .push(
            Router::with_path("promo-codes")
                .get(promo_codes::index::handler)
                .post(promo_codes::create::handler)
                .push(
                    Router::with_path("{promo_code}")
                        .put(promo_codes::update::handler)
                        .delete(promo_codes::delete::handler),
                ),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::{StatusCode, header::AUTHORIZATION},
        test::TestClient,
    };
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, admin_authorization, service};

    use super::*;

    #[tokio::test]
    async fn admin_routes_require_a_token() -> TestResult {
        let res = TestClient::get("http://example.com/admin/orders")
            .send(&service(Mocks::default(), app_router()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn storefront_routes_are_public() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_list_products()
            .once()
            .return_once(|_| Ok(Vec::new()));

        let res = TestClient::get("http://example.com/products")
            .send(&service(mocks, app_router()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn admin_stats_are_routed_behind_the_gate() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_order_stats()
            .once()
            .return_once(|| Ok(Default::default()));

        mocks
            .products
            .expect_count_products()
            .once()
            .return_once(|| Ok(3));

        let res = TestClient::get("http://example.com/admin/stats")
            .add_header(AUTHORIZATION, admin_authorization(), true)
            .send(&service(mocks, app_router()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
