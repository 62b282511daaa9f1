//! Request middleware settings, fixed once at startup.

use std::{sync::OnceLock, time::Duration};

use crate::config::ServerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct RequestSettings {
    pub(super) slow_request_threshold: Duration,
    pub(super) parent_propagation: bool,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            slow_request_threshold: Duration::from_secs(1),
            parent_propagation: false,
        }
    }
}

impl RequestSettings {
    fn from_config(config: &ServerConfig) -> Self {
        Self {
            slow_request_threshold: Duration::from_millis(
                config.logging.slow_request_threshold_ms,
            ),
            parent_propagation: config.observability.otel_enabled
                && config.observability.otel_parent_propagation_enabled,
        }
    }
}

static REQUEST_SETTINGS: OnceLock<RequestSettings> = OnceLock::new();

/// Later calls keep the first configuration.
pub(super) fn apply_runtime_config(config: &ServerConfig) {
    REQUEST_SETTINGS.get_or_init(|| RequestSettings::from_config(config));
}

pub(super) fn request_settings() -> RequestSettings {
    REQUEST_SETTINGS.get().copied().unwrap_or_default()
}
