//! Promo Code Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::promo_codes::PromoCodesServiceError;

pub(crate) fn into_status_error(error: PromoCodesServiceError) -> StatusError {
    match error {
        PromoCodesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Promo code already exists")
        }
        PromoCodesServiceError::NotFound => StatusError::not_found().brief("Promo code not found"),
        PromoCodesServiceError::InvalidRule(source) => StatusError::bad_request()
            .brief("Invalid discount")
            .detail(source.to_string()),
        PromoCodesServiceError::InvalidReference
        | PromoCodesServiceError::MissingRequiredData
        | PromoCodesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid promo code payload")
        }
        PromoCodesServiceError::Sql(source) => {
            error!("promo code storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
