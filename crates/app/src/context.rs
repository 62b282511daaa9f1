//! App Context

use std::sync::Arc;

use storefront::shipping::ShippingRoutes;
use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        checkout::{CheckoutService, StoreCheckoutService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        promo_codes::{PgPromoCodesService, PromoCodesService},
    },
    notifications::{
        EmailBranding, OrderNotifier, PostgrestTrackingMirror, ResendConfig, ResendMailer,
        TrackingConfig,
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migration(#[source] sqlx::migrate::MigrateError),
}

/// Everything needed to reach the email provider and the tracking store.
#[derive(Debug, Clone, Default)]
pub struct NotificationSettings {
    pub resend: ResendConfig,
    pub tracking: TrackingConfig,
    pub shipping_routes: ShippingRoutes,
    pub branding: EmailBranding,
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub promo_codes: Arc<dyn PromoCodesService>,
    pub orders: Arc<dyn OrdersService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub notifier: OrderNotifier,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        notifications: NotificationSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(Db::new(pool), notifications))
    }

    /// Wire the services over an existing pool.
    pub fn from_db(db: Db, notifications: NotificationSettings) -> Self {
        let notifier = OrderNotifier::new(
            Arc::new(ResendMailer::new(notifications.resend)),
            Arc::new(PostgrestTrackingMirror::new(notifications.tracking)),
            notifications.shipping_routes,
            notifications.branding,
        );

        let orders: Arc<dyn OrdersService> = Arc::new(PgOrdersService::new(db.clone()));
        let promo_codes: Arc<dyn PromoCodesService> = Arc::new(PgPromoCodesService::new(db.clone()));

        Self {
            products: Arc::new(PgProductsService::new(db)),
            checkout: Arc::new(StoreCheckoutService::new(
                Arc::clone(&orders),
                Arc::clone(&promo_codes),
                notifier.clone(),
            )),
            promo_codes,
            orders,
            notifier,
        }
    }
}
