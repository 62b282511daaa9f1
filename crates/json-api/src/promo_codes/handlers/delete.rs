//! Delete Promo Code Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, promo_codes::errors::into_status_error, state::State};

/// Delete Promo Code Handler
///
/// Orders placed with the code keep it.
#[endpoint(
    tags("admin"),
    summary = "Delete Promo Code",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Promo code deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Promo code not found"),
    ),
)]
pub(crate) async fn handler(
    promo_code: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .promo_codes
        .delete_promo_code(promo_code.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::{http::header::AUTHORIZATION, test::TestClient};
    use testresult::TestResult;

    use storefront_app::domain::promo_codes::{PromoCodesServiceError, records::PromoCodeUuid};

    use crate::test_helpers::{Mocks, admin_authorization, admin_service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        admin_service(mocks, Router::with_path("promo-codes/{promo_code}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_promo_code_success() -> TestResult {
        let uuid = PromoCodeUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .promo_codes
            .expect_delete_promo_code()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(|_| Ok(()));

        let res = TestClient::delete(format!("http://example.com/promo-codes/{uuid}"))
            .add_header(AUTHORIZATION, admin_authorization(), true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_promo_code_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .promo_codes
            .expect_delete_promo_code()
            .once()
            .return_once(|_| Err(PromoCodesServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/promo-codes/{}", PromoCodeUuid::new()))
            .add_header(AUTHORIZATION, admin_authorization(), true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
