//! Update Promo Code Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use storefront_app::domain::promo_codes::data::{PromoCodeDetails, PromoCodeUpdate};

use crate::{
    extensions::*,
    promo_codes::{PromoCodeRequest, PromoCodeResponse, errors::into_status_error},
    state::State,
};

/// Update Promo Code Handler
#[endpoint(
    tags("admin"),
    summary = "Update Promo Code",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Promo code updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Promo code not found"),
        (status_code = StatusCode::CONFLICT, description = "Another promo code uses this code"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    promo_code: PathParam<Uuid>,
    json: JsonBody<PromoCodeRequest>,
    depot: &mut Depot,
) -> Result<Json<PromoCodeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let details = PromoCodeDetails::try_from(json.into_inner())?;

    let updated = state
        .app
        .promo_codes
        .update_promo_code(promo_code.into_inner().into(), PromoCodeUpdate { details })
        .await
        .map_err(into_status_error)?;

    tracing::info!(code = %updated.code, is_active = updated.is_active, "updated promo code");

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::AUTHORIZATION,
        test::{ResponseExt, TestClient},
    };
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::promo_codes::PromoCodesServiceError;

    use crate::test_helpers::{Mocks, admin_authorization, admin_service, make_promo_code, percent};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        admin_service(mocks, Router::with_path("promo-codes/{promo_code}").put(handler))
    }

    #[tokio::test]
    async fn test_deactivating_a_code() -> TestResult {
        let mut record = make_promo_code("SUMMER20", percent(20));

        record.is_active = false;

        let uuid = record.uuid;

        let mut mocks = Mocks::default();

        mocks
            .promo_codes
            .expect_update_promo_code()
            .once()
            .withf(move |u, update| *u == uuid && !update.details.is_active)
            .return_once(move |_, _| Ok(record));

        let mut res = TestClient::put(format!("http://example.com/promo-codes/{uuid}"))
            .add_header(AUTHORIZATION, admin_authorization(), true)
            .json(&json!({
                "code": "SUMMER20",
                "discount_type": "percentage",
                "discount_value": "20",
                "is_active": false
            }))
            .send(&make_service(mocks))
            .await;

        let body: PromoCodeResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(!body.is_active, "code should be inactive");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_code_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .promo_codes
            .expect_update_promo_code()
            .once()
            .return_once(|_, _| Err(PromoCodesServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/promo-codes/{}", Uuid::now_v7()))
            .add_header(AUTHORIZATION, admin_authorization(), true)
            .json(&json!({ "code": "GONE", "discount_type": "fixed", "discount_value": "100" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
