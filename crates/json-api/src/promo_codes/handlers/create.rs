//! Create Promo Code Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::extract::JsonBody,
    prelude::*,
};

use storefront_app::domain::promo_codes::{
    data::{NewPromoCode, PromoCodeDetails},
    records::PromoCodeUuid,
};

use crate::{
    extensions::*,
    promo_codes::{PromoCodeRequest, PromoCodeResponse, errors::into_status_error},
    state::State,
};

/// Create Promo Code Handler
#[endpoint(
    tags("admin"),
    summary = "Create Promo Code",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Promo code created"),
        (status_code = StatusCode::CONFLICT, description = "Promo code already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
#[tracing::instrument(name = "promo_codes.create", skip_all, err)]
pub(crate) async fn handler(
    json: JsonBody<PromoCodeRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PromoCodeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let details = PromoCodeDetails::try_from(json.into_inner())?;

    let created = state
        .app
        .promo_codes
        .create_promo_code(NewPromoCode {
            uuid: PromoCodeUuid::new(),
            details,
        })
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/admin/promo-codes/{}", created.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(code = %created.code, "created promo code");

    Ok(Json(created.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::{
        http::header::AUTHORIZATION,
        test::{ResponseExt, TestClient},
    };
    use serde_json::json;
    use testresult::TestResult;

    use storefront::promotions::DiscountRule;
    use storefront_app::domain::promo_codes::{
        PromoCodesServiceError, records::PromoCodeRecord,
    };

    use crate::test_helpers::{Mocks, admin_authorization, admin_service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        admin_service(mocks, Router::with_path("promo-codes").post(handler))
    }

    #[tokio::test]
    async fn test_create_promo_code_stores_normalised_code() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .promo_codes
            .expect_create_promo_code()
            .once()
            .withf(|new| {
                new.details.code.as_str() == "WELCOME"
                    && new.details.rule == DiscountRule::fixed(10_00)
                    && new.details.is_active
                    && new.details.unlocks_cash_payment
            })
            .return_once(|new| {
                Ok(PromoCodeRecord {
                    uuid: new.uuid,
                    code: new.details.code,
                    rule: new.details.rule,
                    is_active: new.details.is_active,
                    unlocks_cash_payment: new.details.unlocks_cash_payment,
                    created_at: Timestamp::UNIX_EPOCH,
                    updated_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::post("http://example.com/promo-codes")
            .add_header(AUTHORIZATION, admin_authorization(), true)
            .json(&json!({
                "code": "welcome",
                "discount_type": "fixed",
                "discount_value": "1000",
                "unlocks_cash_payment": true
            }))
            .send(&make_service(mocks))
            .await;

        let body: PromoCodeResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.code, "WELCOME");
        assert_eq!(body.discount_value, "1000");

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_code_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .promo_codes
            .expect_create_promo_code()
            .once()
            .return_once(|_| Err(PromoCodesServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/promo-codes")
            .add_header(AUTHORIZATION, admin_authorization(), true)
            .json(&json!({ "code": "WELCOME", "discount_type": "percentage", "discount_value": "10" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_percentage_over_100_returns_400_without_storing() -> TestResult {
        let res = TestClient::post("http://example.com/promo-codes")
            .add_header(AUTHORIZATION, admin_authorization(), true)
            .json(&json!({ "code": "TOOMUCH", "discount_type": "percentage", "discount_value": "150" }))
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
