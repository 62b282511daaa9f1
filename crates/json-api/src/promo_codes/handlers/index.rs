//! Promo Code Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    promo_codes::{PromoCodeResponse, errors::into_status_error},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromoCodesResponse {
    pub promo_codes: Vec<PromoCodeResponse>,
}

/// Promo Code Index Handler
///
/// Every promo code, newest first.
#[endpoint(tags("admin"), summary = "List Promo Codes", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PromoCodesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let promo_codes = state
        .app
        .promo_codes
        .list_promo_codes()
        .await
        .map_err(into_status_error)?;

    Ok(Json(PromoCodesResponse {
        promo_codes: promo_codes.into_iter().map(Into::into).collect(),
    }))
}
