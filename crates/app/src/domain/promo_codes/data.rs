//! Promo Codes Data

use storefront::promotions::{DiscountRule, PromoCodeName};

use crate::domain::promo_codes::records::PromoCodeUuid;

/// New Promo Code Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPromoCode {
    pub uuid: PromoCodeUuid,
    pub details: PromoCodeDetails,
}

/// Promo Code Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoCodeUpdate {
    pub details: PromoCodeDetails,
}

/// Editable promo code fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoCodeDetails {
    pub code: PromoCodeName,
    pub rule: DiscountRule,
    pub is_active: bool,
    pub unlocks_cash_payment: bool,
}
