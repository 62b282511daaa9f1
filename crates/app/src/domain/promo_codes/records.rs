//! Promo Code Records

use jiff::Timestamp;
use storefront::promotions::{DiscountRule, PromoCode, PromoCodeName};

use crate::uuids::TypedUuid;

/// Promo Code UUID
pub type PromoCodeUuid = TypedUuid<PromoCodeRecord>;

/// Promo Code Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoCodeRecord {
    pub uuid: PromoCodeUuid,
    pub code: PromoCodeName,
    pub rule: DiscountRule,
    pub is_active: bool,
    pub unlocks_cash_payment: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PromoCodeRecord {
    /// The code as seen by checkout.
    pub fn to_promo_code(&self) -> PromoCode {
        PromoCode {
            code: self.code.clone(),
            rule: self.rule,
            is_active: self.is_active,
            unlocks_cash_payment: self.unlocks_cash_payment,
        }
    }
}

impl From<PromoCodeRecord> for PromoCode {
    fn from(record: PromoCodeRecord) -> Self {
        Self {
            code: record.code,
            rule: record.rule,
            is_active: record.is_active,
            unlocks_cash_payment: record.unlocks_cash_payment,
        }
    }
}
