//! Shipment tracking mirror.
//!
//! Placed orders are copied one way into the tracking store, a PostgREST service with an
//! `orders` table keyed by `order_code`. The store never writes back.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Serialize;
use storefront::shipping::TrackingStatus;
use thiserror::Error;
use tracing::info;

/// Row inserted into the tracking store's `orders` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackingEntry {
    pub order_code: String,
    pub customer_name: String,
    pub shipper: String,
    pub products: String,
    pub status: TrackingStatus,
}

/// Errors that can occur when mirroring an order.
#[derive(Debug, Error)]
pub enum TrackingError {
    /// No tracking store URL or key is configured.
    #[error("tracking store is not configured")]
    NotConfigured,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from tracking store: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
pub trait TrackingMirror: Send + Sync {
    /// Insert `entry` into the tracking store.
    async fn insert(&self, entry: TrackingEntry) -> Result<(), TrackingError>;
}

/// Connection details for the tracking store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingConfig {
    /// Project URL, e.g. `https://tracking.example.co`.
    pub url: Option<String>,

    /// Key sent both as `apikey` and as the bearer token.
    pub api_key: Option<String>,
}

/// Tracking mirror speaking the PostgREST insert protocol.
#[derive(Debug, Clone)]
pub struct PostgrestTrackingMirror {
    config: TrackingConfig,
    http: Client,
}

impl PostgrestTrackingMirror {
    #[must_use]
    pub fn new(config: TrackingConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl TrackingMirror for PostgrestTrackingMirror {
    async fn insert(&self, entry: TrackingEntry) -> Result<(), TrackingError> {
        let (Some(url), Some(api_key)) = (self.config.url.as_deref(), self.config.api_key.as_deref())
        else {
            return Err(TrackingError::NotConfigured);
        };

        let response = self
            .http
            .post(format!("{}/rest/v1/orders", url.trim_end_matches('/')))
            .header("apikey", api_key)
            .bearer_auth(api_key)
            .header("Prefer", "return=minimal")
            .json(&entry)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(TrackingError::UnexpectedResponse(format!(
                "insert failed with status {status}: {text}"
            )));
        }

        info!(order_code = %entry.order_code, shipper = %entry.shipper, "order mirrored to tracking");

        Ok(())
    }
}
