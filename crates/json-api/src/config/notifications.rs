//! Notifications Config

use std::path::PathBuf;

use clap::Args;
use storefront::shipping::{ShippingRoutes, ShippingRoutesError};
use storefront_app::{
    context::NotificationSettings,
    notifications::{EmailBranding, ResendConfig, TrackingConfig, email::RESEND_API_URL},
};

/// Email provider, tracking store and shipper routing settings.
#[derive(Debug, Args)]
pub struct NotificationsConfig {
    /// Storefront base URL used in emails
    #[arg(long, env = "SITE_URL", default_value = "https://master3d.net")]
    pub site_url: String,

    /// Tracking site base URL used in emails
    #[arg(long, env = "TRACKING_SITE_URL", default_value = "https://track.master3d.net")]
    pub tracking_site_url: String,

    /// Resend API key. Without one, email sends fail and are logged.
    #[arg(long, env = "RESEND_API_KEY", hide_env_values = true)]
    pub resend_api_key: Option<String>,

    /// Resend API base URL
    #[arg(long, env = "RESEND_API_URL", default_value = RESEND_API_URL)]
    pub resend_api_url: String,

    /// Email sender
    #[arg(
        long,
        env = "EMAIL_FROM",
        default_value = "Master 3D <contact.master3d@gmail.com>"
    )]
    pub email_from: String,

    /// Reply-to address
    #[arg(long, env = "EMAIL_REPLY_TO", default_value = "contact.master3d@gmail.com")]
    pub email_reply_to: String,

    /// Shop staff copied on every email (comma separated)
    #[arg(long, env = "EMAIL_INTERNAL_RECIPIENTS", value_delimiter = ',')]
    pub email_internal_recipients: Vec<String>,

    /// Tracking store (PostgREST) base URL
    #[arg(long, env = "TRACKING_URL")]
    pub tracking_url: Option<String>,

    /// Tracking store API key
    #[arg(long, env = "TRACKING_API_KEY", hide_env_values = true)]
    pub tracking_api_key: Option<String>,

    /// YAML file mapping address keywords to shippers
    #[arg(long, env = "SHIPPING_ROUTES_FILE")]
    pub shipping_routes_file: Option<PathBuf>,
}

impl NotificationsConfig {
    /// Resolve into the settings the app context is wired with.
    ///
    /// # Errors
    ///
    /// Returns an error when the shipping routes file cannot be read or parsed.
    pub fn to_settings(&self) -> Result<NotificationSettings, ShippingRoutesError> {
        let shipping_routes = match &self.shipping_routes_file {
            Some(path) => ShippingRoutes::from_file(path)?,
            None => ShippingRoutes::default(),
        };

        Ok(NotificationSettings {
            resend: ResendConfig {
                api_key: self.resend_api_key.clone(),
                api_url: self.resend_api_url.clone(),
                from: self.email_from.clone(),
                reply_to: self.email_reply_to.clone(),
                internal_recipients: self
                    .email_internal_recipients
                    .iter()
                    .map(|recipient| recipient.trim().to_string())
                    .filter(|recipient| !recipient.is_empty())
                    .collect(),
            },
            tracking: TrackingConfig {
                url: self.tracking_url.clone(),
                api_key: self.tracking_api_key.clone(),
            },
            shipping_routes,
            branding: EmailBranding {
                site_url: self.site_url.trim_end_matches('/').to_string(),
                tracking_site_url: self.tracking_site_url.trim_end_matches('/').to_string(),
                ..EmailBranding::default()
            },
        })
    }
}
