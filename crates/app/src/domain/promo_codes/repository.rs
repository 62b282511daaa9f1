//! Promo Codes Repository

use std::str::FromStr;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use storefront::promotions::{DiscountRule, DiscountType, PromoCodeName};

use crate::domain::promo_codes::{
    data::PromoCodeDetails,
    records::{PromoCodeRecord, PromoCodeUuid},
};

const LIST_PROMO_CODES_SQL: &str = include_str!("sql/list_promo_codes.sql");
const GET_PROMO_CODE_SQL: &str = include_str!("sql/get_promo_code.sql");
const FIND_ACTIVE_PROMO_CODE_SQL: &str = include_str!("sql/find_active_promo_code.sql");
const CREATE_PROMO_CODE_SQL: &str = include_str!("sql/create_promo_code.sql");
const UPDATE_PROMO_CODE_SQL: &str = include_str!("sql/update_promo_code.sql");
const DELETE_PROMO_CODE_SQL: &str = include_str!("sql/delete_promo_code.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPromoCodesRepository;

impl PgPromoCodesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_promo_codes(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<PromoCodeRecord>, sqlx::Error> {
        query_as::<Postgres, PromoCodeRecord>(LIST_PROMO_CODES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_promo_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promo_code: PromoCodeUuid,
    ) -> Result<PromoCodeRecord, sqlx::Error> {
        query_as::<Postgres, PromoCodeRecord>(GET_PROMO_CODE_SQL)
            .bind(promo_code.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_active_promo_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &PromoCodeName,
    ) -> Result<Option<PromoCodeRecord>, sqlx::Error> {
        query_as::<Postgres, PromoCodeRecord>(FIND_ACTIVE_PROMO_CODE_SQL)
            .bind(code.as_str())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_promo_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promo_code: PromoCodeUuid,
        details: &PromoCodeDetails,
    ) -> Result<PromoCodeRecord, sqlx::Error> {
        let (discount_type, discount_value) = rule_columns(&details.rule);

        query_as::<Postgres, PromoCodeRecord>(CREATE_PROMO_CODE_SQL)
            .bind(promo_code.into_uuid())
            .bind(details.code.as_str())
            .bind(discount_type.as_str())
            .bind(discount_value)
            .bind(details.is_active)
            .bind(details.unlocks_cash_payment)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_promo_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promo_code: PromoCodeUuid,
        details: &PromoCodeDetails,
    ) -> Result<PromoCodeRecord, sqlx::Error> {
        let (discount_type, discount_value) = rule_columns(&details.rule);

        query_as::<Postgres, PromoCodeRecord>(UPDATE_PROMO_CODE_SQL)
            .bind(promo_code.into_uuid())
            .bind(details.code.as_str())
            .bind(discount_type.as_str())
            .bind(discount_value)
            .bind(details.is_active)
            .bind(details.unlocks_cash_payment)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_promo_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promo_code: PromoCodeUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PROMO_CODE_SQL)
            .bind(promo_code.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

/// Fixed discounts are stored as whole minor units, percentages as the percentage.
fn rule_columns(rule: &DiscountRule) -> (DiscountType, Decimal) {
    match rule {
        DiscountRule::Percentage(percent) => (DiscountType::Percentage, *percent),
        DiscountRule::Fixed(minor) => (DiscountType::Fixed, Decimal::from(*minor)),
    }
}

fn rule_from_columns(discount_type: &str, value: Decimal) -> Result<DiscountRule, String> {
    match DiscountType::from_str(discount_type)? {
        DiscountType::Percentage => {
            DiscountRule::percentage(value).map_err(|error| error.to_string())
        }
        DiscountType::Fixed if value.fract().is_zero() => value
            .to_u64()
            .map(DiscountRule::fixed)
            .ok_or_else(|| format!("fixed discount {value} is out of range")),
        DiscountType::Fixed => Err(format!("fixed discount {value} is not a whole amount")),
    }
}

impl<'r> FromRow<'r, PgRow> for PromoCodeRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let code: String = row.try_get("code")?;
        let discount_type: String = row.try_get("discount_type")?;
        let discount_value: Decimal = row.try_get("discount_value")?;

        Ok(Self {
            uuid: PromoCodeUuid::from_uuid(row.try_get("uuid")?),
            code: PromoCodeName::new(&code).map_err(|error| sqlx::Error::ColumnDecode {
                index: "code".to_string(),
                source: Box::new(error),
            })?,
            rule: rule_from_columns(&discount_type, discount_value).map_err(|message| {
                sqlx::Error::ColumnDecode {
                    index: "discount_value".to_string(),
                    source: message.into(),
                }
            })?,
            is_active: row.try_get("is_active")?,
            unlocks_cash_payment: row.try_get("unlocks_cash_payment")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn rules_survive_their_columns() -> TestResult {
        let percentage = DiscountRule::percentage(Decimal::new(125, 1))?;
        let fixed = DiscountRule::fixed(15_00);

        for rule in [percentage, fixed] {
            let (discount_type, value) = rule_columns(&rule);

            assert_eq!(rule_from_columns(discount_type.as_str(), value)?, rule);
        }

        Ok(())
    }

    #[test]
    fn fractional_fixed_amounts_are_rejected() {
        assert!(rule_from_columns("fixed", Decimal::new(1_000, 2)).is_ok());
        assert!(rule_from_columns("fixed", Decimal::new(1_055, 3)).is_err());
        assert!(rule_from_columns("bogus", Decimal::ONE).is_err());
    }
}
