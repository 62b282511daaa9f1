//! Promo Code Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod update;
pub(crate) mod validate;

use std::str::FromStr;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront::promotions::{DiscountRule, DiscountType, PromoCodeName};
use storefront_app::domain::promo_codes::{data::PromoCodeDetails, records::PromoCodeRecord};

use crate::extensions::*;

/// Promo code as managed in the admin area.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromoCodeResponse {
    pub uuid: Uuid,
    pub code: String,

    /// `percentage` or `fixed`
    pub discount_type: String,

    /// Percent for percentage codes, minor units for fixed codes
    pub discount_value: String,

    pub is_active: bool,
    pub unlocks_cash_payment: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PromoCodeRecord> for PromoCodeResponse {
    fn from(record: PromoCodeRecord) -> Self {
        PromoCodeResponse {
            uuid: record.uuid.into(),
            code: record.code.to_string(),
            discount_type: record.rule.discount_type().as_str().to_string(),
            discount_value: discount_value(&record.rule),
            is_active: record.is_active,
            unlocks_cash_payment: record.unlocks_cash_payment,
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

/// Promo code fields accepted by the admin create and update endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromoCodeRequest {
    pub code: String,

    /// `percentage` or `fixed`
    pub discount_type: String,

    /// Percent for percentage codes, minor units for fixed codes
    pub discount_value: String,

    #[serde(default = "active_by_default")]
    pub is_active: bool,

    #[serde(default)]
    pub unlocks_cash_payment: bool,
}

const fn active_by_default() -> bool {
    true
}

impl TryFrom<PromoCodeRequest> for PromoCodeDetails {
    type Error = StatusError;

    fn try_from(request: PromoCodeRequest) -> Result<Self, Self::Error> {
        let code = PromoCodeName::new(&request.code).or_400("invalid promo code")?;

        let discount_type = request
            .discount_type
            .trim()
            .parse::<DiscountType>()
            .or_400("invalid discount type")?;

        let value = Decimal::from_str(request.discount_value.trim())
            .or_400("invalid discount value")?;

        Ok(PromoCodeDetails {
            code,
            rule: discount_rule(discount_type, value)?,
            is_active: request.is_active,
            unlocks_cash_payment: request.unlocks_cash_payment,
        })
    }
}

fn discount_rule(discount_type: DiscountType, value: Decimal) -> Result<DiscountRule, StatusError> {
    match discount_type {
        DiscountType::Percentage => DiscountRule::percentage(value).or_400("invalid discount value"),
        DiscountType::Fixed => value
            .fract()
            .is_zero()
            .then(|| value.to_u64())
            .flatten()
            .map(DiscountRule::fixed)
            .ok_or_else(|| {
                StatusError::bad_request()
                    .brief("invalid discount value")
                    .detail("fixed discounts are whole, non-negative minor units")
            }),
    }
}

pub(crate) fn discount_value(rule: &DiscountRule) -> String {
    match rule {
        DiscountRule::Percentage(percent) => percent.normalize().to_string(),
        DiscountRule::Fixed(minor) => minor.to_string(),
    }
}
