//! Promo codes service.

use async_trait::async_trait;
use mockall::automock;
use storefront::promotions::{PromoCode, PromoCodeName, PromoLookup};

use crate::{
    database::Db,
    domain::promo_codes::{
        data::{NewPromoCode, PromoCodeUpdate},
        errors::PromoCodesServiceError,
        records::{PromoCodeRecord, PromoCodeUuid},
        repository::PgPromoCodesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgPromoCodesService {
    db: Db,
    repository: PgPromoCodesRepository,
}

impl PgPromoCodesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgPromoCodesRepository::new(),
        }
    }
}

#[async_trait]
impl PromoCodesService for PgPromoCodesService {
    async fn list_promo_codes(&self) -> Result<Vec<PromoCodeRecord>, PromoCodesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let promo_codes = self.repository.list_promo_codes(&mut tx).await?;

        tx.commit().await?;

        Ok(promo_codes)
    }

    async fn get_promo_code(
        &self,
        promo_code: PromoCodeUuid,
    ) -> Result<PromoCodeRecord, PromoCodesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let promo_code = self.repository.get_promo_code(&mut tx, promo_code).await?;

        tx.commit().await?;

        Ok(promo_code)
    }

    async fn find_active_promo_code(
        &self,
        code: &PromoCodeName,
    ) -> Result<Option<PromoCodeRecord>, PromoCodesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let promo_code = self.repository.find_active_promo_code(&mut tx, code).await?;

        tx.commit().await?;

        Ok(promo_code)
    }

    async fn create_promo_code(
        &self,
        promo_code: NewPromoCode,
    ) -> Result<PromoCodeRecord, PromoCodesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_promo_code(&mut tx, promo_code.uuid, &promo_code.details)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_promo_code(
        &self,
        promo_code: PromoCodeUuid,
        update: PromoCodeUpdate,
    ) -> Result<PromoCodeRecord, PromoCodesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_promo_code(&mut tx, promo_code, &update.details)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_promo_code(&self, promo_code: PromoCodeUuid) -> Result<(), PromoCodesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .repository
            .delete_promo_code(&mut tx, promo_code)
            .await?;

        if rows_affected == 0 {
            return Err(PromoCodesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait PromoCodesService: Send + Sync {
    /// Retrieves all promo codes, newest first.
    async fn list_promo_codes(&self) -> Result<Vec<PromoCodeRecord>, PromoCodesServiceError>;

    /// Retrieve a single promo code.
    async fn get_promo_code(
        &self,
        promo_code: PromoCodeUuid,
    ) -> Result<PromoCodeRecord, PromoCodesServiceError>;

    /// Find the active promo code with exactly this normalised code.
    async fn find_active_promo_code(
        &self,
        code: &PromoCodeName,
    ) -> Result<Option<PromoCodeRecord>, PromoCodesServiceError>;

    /// Creates a new promo code.
    async fn create_promo_code(
        &self,
        promo_code: NewPromoCode,
    ) -> Result<PromoCodeRecord, PromoCodesServiceError>;

    /// Replaces the editable fields of a promo code.
    async fn update_promo_code(
        &self,
        promo_code: PromoCodeUuid,
        update: PromoCodeUpdate,
    ) -> Result<PromoCodeRecord, PromoCodesServiceError>;

    /// Deletes a promo code. Orders keep the code they were placed with.
    async fn delete_promo_code(&self, promo_code: PromoCodeUuid) -> Result<(), PromoCodesServiceError>;
}

impl PromoLookup for dyn PromoCodesService + '_ {
    type Error = PromoCodesServiceError;

    async fn find_active(&self, code: &PromoCodeName) -> Result<Option<PromoCode>, Self::Error> {
        Ok(self
            .find_active_promo_code(code)
            .await?
            .map(PromoCode::from))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use storefront::promotions::{DiscountRule, PromoError, evaluate};
    use testresult::TestResult;

    use crate::{domain::promo_codes::data::PromoCodeDetails, test::TestContext};

    use super::*;

    fn details(code: &str, is_active: bool) -> TestResult<PromoCodeDetails> {
        Ok(PromoCodeDetails {
            code: PromoCodeName::new(code)?,
            rule: DiscountRule::percentage(Decimal::from(20))?,
            is_active,
            unlocks_cash_payment: false,
        })
    }

    #[tokio::test]
    async fn evaluate_goes_through_the_service() -> TestResult {
        let details = details("SUMMER20", true)?;
        let record = PromoCodeRecord {
            uuid: PromoCodeUuid::new(),
            code: details.code.clone(),
            rule: details.rule,
            is_active: true,
            unlocks_cash_payment: false,
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        };

        let mut mock = MockPromoCodesService::new();

        mock.expect_find_active_promo_code()
            .withf(|code| code.as_str() == "SUMMER20")
            .return_once(move |_| Ok(Some(record)));

        let service: Arc<dyn PromoCodesService> = Arc::new(mock);

        let promo = evaluate(service.as_ref(), " summer20 ").await?;

        assert_eq!(promo.rule, details.rule);

        Ok(())
    }

    #[tokio::test]
    async fn storage_failures_surface_as_lookup_errors() {
        let mut mock = MockPromoCodesService::new();

        mock.expect_find_active_promo_code()
            .return_once(|_| Err(PromoCodesServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let service: Arc<dyn PromoCodesService> = Arc::new(mock);

        let result = evaluate(service.as_ref(), "SUMMER20").await;

        assert!(
            matches!(result, Err(PromoError::Lookup(PromoCodesServiceError::Sql(_)))),
            "got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires a docker daemon for testcontainers"]
    async fn create_promo_code_stores_upper_case_code() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .promo_codes
            .create_promo_code(NewPromoCode {
                uuid: PromoCodeUuid::new(),
                details: details("welcome", true)?,
            })
            .await?;

        assert_eq!(created.code.as_str(), "WELCOME");
        assert_eq!(created.rule, DiscountRule::percentage(Decimal::from(20))?);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a docker daemon for testcontainers"]
    async fn duplicate_codes_already_exist() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.promo_codes
            .create_promo_code(NewPromoCode {
                uuid: PromoCodeUuid::new(),
                details: details("TWICE", true)?,
            })
            .await?;

        let result = ctx
            .promo_codes
            .create_promo_code(NewPromoCode {
                uuid: PromoCodeUuid::new(),
                details: details("twice", false)?,
            })
            .await;

        assert!(
            matches!(result, Err(PromoCodesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a docker daemon for testcontainers"]
    async fn inactive_codes_are_not_found_as_active() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.promo_codes
            .create_promo_code(NewPromoCode {
                uuid: PromoCodeUuid::new(),
                details: details("PAUSED", false)?,
            })
            .await?;

        let found = ctx
            .promo_codes
            .find_active_promo_code(&PromoCodeName::new("PAUSED")?)
            .await?;

        assert!(found.is_none());

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a docker daemon for testcontainers"]
    async fn update_then_delete_promo_code() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = PromoCodeUuid::new();

        ctx.promo_codes
            .create_promo_code(NewPromoCode {
                uuid,
                details: details("FLAT", true)?,
            })
            .await?;

        let updated = ctx
            .promo_codes
            .update_promo_code(
                uuid,
                PromoCodeUpdate {
                    details: PromoCodeDetails {
                        rule: DiscountRule::fixed(5_00),
                        unlocks_cash_payment: true,
                        ..details("FLAT", true)?
                    },
                },
            )
            .await?;

        assert_eq!(updated.rule, DiscountRule::fixed(5_00));
        assert!(updated.unlocks_cash_payment);

        ctx.promo_codes.delete_promo_code(uuid).await?;

        let result = ctx.promo_codes.get_promo_code(uuid).await;

        assert!(
            matches!(result, Err(PromoCodesServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }
}
