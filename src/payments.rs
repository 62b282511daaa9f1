//! Payment methods offered at checkout.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::promotions::PromoCode;

/// How a customer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Bank transfer to the shop's IBAN.
    Iban,

    /// TWINT mobile payment.
    Twint,

    /// Cash on delivery. Only offered when an applied promo code unlocks it.
    Cash,
}

impl PaymentMethod {
    /// Wire and storage spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Iban => "iban",
            Self::Twint => "twint",
            Self::Cash => "cash",
        }
    }

    /// Whether this method may be used with the given promo code applied.
    pub fn is_available(self, promo: Option<&PromoCode>) -> bool {
        match self {
            Self::Iban | Self::Twint => true,
            Self::Cash => promo.is_some_and(|promo| promo.is_active && promo.unlocks_cash_payment),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "iban" => Ok(Self::Iban),
            "twint" => Ok(Self::Twint),
            "cash" => Ok(Self::Cash),
            other => Err(format!("unknown payment method \"{other}\"")),
        }
    }
}

/// Payment methods offered for a checkout, in display order.
pub fn available_methods(promo: Option<&PromoCode>) -> SmallVec<[PaymentMethod; 3]> {
    let mut methods = smallvec![PaymentMethod::Iban, PaymentMethod::Twint];

    if PaymentMethod::Cash.is_available(promo) {
        methods.push(PaymentMethod::Cash);
    }

    methods
}
