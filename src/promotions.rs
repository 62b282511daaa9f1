//! Promotions
//!
//! Promo codes entered at checkout. A code is looked up case-insensitively among the active
//! codes; codes that are unknown and codes that are inactive are rejected the same way.

use std::{error::Error as StdError, fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a discount rule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountRuleError {
    /// Percentage discounts must lie within `0..=100`.
    #[error("percentage discount must be between 0 and 100, got {0}")]
    PercentageOutOfRange(Decimal),

    /// Discount values are never negative.
    #[error("discount value must not be negative")]
    Negative,
}

/// Errors raised while normalising a promo code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromoCodeNameError {
    /// The code was empty once whitespace was trimmed.
    #[error("promo code is empty")]
    Empty,
}

/// Errors raised while evaluating a customer-supplied promo code.
#[derive(Debug, Error)]
pub enum PromoError<E: StdError + 'static> {
    /// The code is unknown, inactive or malformed.
    #[error("promo code rejected")]
    Rejected,

    /// The promo code store could not be queried.
    #[error("promo code lookup failed")]
    Lookup(#[source] E),
}

/// Normalised promo code: trimmed and upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PromoCodeName(String);

impl PromoCodeName {
    /// Normalise a raw code.
    ///
    /// # Errors
    ///
    /// Returns [`PromoCodeNameError::Empty`] when nothing but whitespace was supplied.
    pub fn new(raw: &str) -> Result<Self, PromoCodeNameError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(PromoCodeNameError::Empty);
        }

        Ok(Self(trimmed.to_uppercase()))
    }

    /// The normalised code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PromoCodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PromoCodeName {
    type Err = PromoCodeNameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value)
    }
}

impl TryFrom<String> for PromoCodeName {
    type Error = PromoCodeNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<PromoCodeName> for String {
    fn from(value: PromoCodeName) -> Self {
        value.0
    }
}

/// Kind of discount a promo code grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// A percentage of the cart subtotal.
    Percentage,

    /// A fixed amount off the cart subtotal.
    Fixed,
}

impl DiscountType {
    /// Wire and storage spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
        }
    }
}

impl FromStr for DiscountType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "percentage" => Ok(Self::Percentage),
            "fixed" => Ok(Self::Fixed),
            other => Err(format!("unknown discount type \"{other}\"")),
        }
    }
}

/// Discount granted by a promo code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountRule {
    /// Percentage of the subtotal, within `0..=100`.
    Percentage(Decimal),

    /// Fixed amount in minor units.
    Fixed(u64),
}

impl DiscountRule {
    /// Build a percentage rule.
    ///
    /// # Errors
    ///
    /// Returns an error when `value` lies outside `0..=100`.
    pub fn percentage(value: Decimal) -> Result<Self, DiscountRuleError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DiscountRuleError::Negative);
        }

        if value > Decimal::ONE_HUNDRED {
            return Err(DiscountRuleError::PercentageOutOfRange(value));
        }

        Ok(Self::Percentage(value))
    }

    /// Build a fixed-amount rule from minor units.
    pub const fn fixed(minor: u64) -> Self {
        Self::Fixed(minor)
    }

    /// The kind of discount.
    pub const fn discount_type(&self) -> DiscountType {
        match self {
            Self::Percentage(_) => DiscountType::Percentage,
            Self::Fixed(_) => DiscountType::Fixed,
        }
    }
}

/// A promo code as seen by checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoCode {
    /// Normalised code.
    pub code: PromoCodeName,

    /// Discount granted.
    pub rule: DiscountRule,

    /// Inactive codes are never applied.
    pub is_active: bool,

    /// Whether applying this code makes cash on delivery available.
    pub unlocks_cash_payment: bool,
}

/// Read access to the active promo codes.
pub trait PromoLookup {
    /// Error raised by the underlying store.
    type Error: StdError + 'static;

    /// Find an active promo code with exactly this normalised code.
    async fn find_active(&self, code: &PromoCodeName) -> Result<Option<PromoCode>, Self::Error>;
}

/// Validate a customer-supplied code against the active promo codes.
///
/// # Errors
///
/// - [`PromoError::Rejected`]: the code is blank, unknown or inactive.
/// - [`PromoError::Lookup`]: the store could not be queried.
pub async fn evaluate<L>(lookup: &L, raw_code: &str) -> Result<PromoCode, PromoError<L::Error>>
where
    L: PromoLookup + ?Sized,
{
    let Ok(code) = PromoCodeName::new(raw_code) else {
        return Err(PromoError::Rejected);
    };

    match lookup.find_active(&code).await {
        Ok(Some(promo)) if promo.is_active && promo.code == code => Ok(promo),
        Ok(_) => Err(PromoError::Rejected),
        Err(source) => Err(PromoError::Lookup(source)),
    }
}

#[cfg(test)]
mod tests {
    use std::{convert::Infallible, io};

    use rustc_hash::FxHashMap;
    use testresult::TestResult;

    use super::*;

    struct FixedLookup(FxHashMap<PromoCodeName, PromoCode>);

    impl FixedLookup {
        fn with(codes: impl IntoIterator<Item = PromoCode>) -> Self {
            Self(
                codes
                    .into_iter()
                    .map(|promo| (promo.code.clone(), promo))
                    .collect(),
            )
        }
    }

    impl PromoLookup for FixedLookup {
        type Error = Infallible;

        async fn find_active(&self, code: &PromoCodeName) -> Result<Option<PromoCode>, Infallible> {
            Ok(self.0.get(code).cloned())
        }
    }

    struct BrokenLookup;

    impl PromoLookup for BrokenLookup {
        type Error = io::Error;

        async fn find_active(&self, _code: &PromoCodeName) -> Result<Option<PromoCode>, io::Error> {
            Err(io::Error::other("store offline"))
        }
    }

    fn promo(code: &str, is_active: bool) -> TestResult<PromoCode> {
        Ok(PromoCode {
            code: PromoCodeName::new(code)?,
            rule: DiscountRule::percentage(Decimal::from(20))?,
            is_active,
            unlocks_cash_payment: false,
        })
    }

    #[test]
    fn code_names_are_trimmed_and_upper_cased() -> TestResult {
        assert_eq!(PromoCodeName::new("  summer20 ")?.as_str(), "SUMMER20");
        assert_eq!(PromoCodeName::new("   "), Err(PromoCodeNameError::Empty));

        Ok(())
    }

    #[test]
    fn percentage_rule_rejects_values_above_one_hundred() {
        assert_eq!(
            DiscountRule::percentage(Decimal::from(101)),
            Err(DiscountRuleError::PercentageOutOfRange(Decimal::from(101)))
        );
        assert_eq!(
            DiscountRule::percentage(Decimal::from(-1)),
            Err(DiscountRuleError::Negative)
        );
    }

    #[tokio::test]
    async fn evaluate_matches_regardless_of_case() -> TestResult {
        let lookup = FixedLookup::with([promo("SUMMER20", true)?]);

        let applied = evaluate(&lookup, "summer20").await?;

        assert_eq!(applied.code.as_str(), "SUMMER20");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_and_inactive_codes_are_rejected_alike() -> TestResult {
        let lookup = FixedLookup::with([promo("OLD10", false)?]);

        let unknown = evaluate(&lookup, "NOPE").await;
        let inactive = evaluate(&lookup, "old10").await;
        let blank = evaluate(&lookup, "  ").await;

        assert!(matches!(unknown, Err(PromoError::Rejected)), "unknown code");
        assert!(matches!(inactive, Err(PromoError::Rejected)), "inactive code");
        assert!(matches!(blank, Err(PromoError::Rejected)), "blank code");

        Ok(())
    }

    #[tokio::test]
    async fn lookup_failures_are_not_rejections() {
        let result = evaluate(&BrokenLookup, "SUMMER20").await;

        assert!(matches!(result, Err(PromoError::Lookup(_))), "got {result:?}");
    }
}
