//! Validate Promo Code Handler
//!
//! Checks a customer-entered code for the checkout form.

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront::{
    payments,
    promotions::{self, PromoError},
};

use crate::{
    extensions::*,
    promo_codes::{discount_value, errors::into_status_error},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidatePromoCodeRequest {
    pub code: String,
}

/// An applicable promo code and the payment methods it leaves open.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidPromoCodeResponse {
    pub code: String,

    /// `percentage` or `fixed`
    pub discount_type: String,

    /// Percent for percentage codes, minor units for fixed codes
    pub discount_value: String,

    pub unlocks_cash_payment: bool,
    pub payment_methods: Vec<String>,
}

/// Validate Promo Code Handler
#[endpoint(
    tags("promo-codes"),
    summary = "Validate Promo Code",
    responses(
        (status_code = StatusCode::OK, description = "Code is active"),
        (status_code = StatusCode::NOT_FOUND, description = "Code is unknown or inactive"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ValidatePromoCodeRequest>,
    depot: &mut Depot,
) -> Result<Json<ValidPromoCodeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let promo = match promotions::evaluate(state.app.promo_codes.as_ref(), &request.code).await {
        Ok(promo) => promo,
        Err(PromoError::Rejected) => {
            return Err(StatusError::not_found().brief("Invalid promo code"));
        }
        Err(PromoError::Lookup(source)) => return Err(into_status_error(source)),
    };

    Ok(Json(ValidPromoCodeResponse {
        code: promo.code.to_string(),
        discount_type: promo.rule.discount_type().as_str().to_string(),
        discount_value: discount_value(&promo.rule),
        unlocks_cash_payment: promo.unlocks_cash_payment,
        payment_methods: payments::available_methods(Some(&promo))
            .iter()
            .map(ToString::to_string)
            .collect(),
    }))
}
