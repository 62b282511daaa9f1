//! Transactional email.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Resend's production endpoint.
pub const RESEND_API_URL: &str = "https://api.resend.com";

/// An email addressed to one customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Provider receipt for an accepted email.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SentEmail {
    pub id: String,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum MailerError {
    /// No provider API key is configured.
    #[error("email delivery is not configured")]
    NotConfigured,

    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a non-2xx response.
    #[error("unexpected response from email provider: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver `message`.
    async fn send(&self, message: EmailMessage) -> Result<SentEmail, MailerError>;
}

/// Configuration for the Resend email API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendConfig {
    /// Without a key every send fails with [`MailerError::NotConfigured`].
    pub api_key: Option<String>,

    /// Base URL of the API, e.g. [`RESEND_API_URL`].
    pub api_url: String,

    /// Sender, e.g. `Shop <shop@example.ch>`.
    pub from: String,

    pub reply_to: String,

    /// Shop staff copied on every email.
    pub internal_recipients: Vec<String>,
}

impl Default for ResendConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: RESEND_API_URL.to_string(),
            from: "Master 3D <contact.master3d@gmail.com>".to_string(),
            reply_to: "contact.master3d@gmail.com".to_string(),
            internal_recipients: Vec::new(),
        }
    }
}

/// Mailer backed by the Resend HTTP API.
#[derive(Debug, Clone)]
pub struct ResendMailer {
    config: ResendConfig,
    http: Client,
}

impl ResendMailer {
    #[must_use]
    pub fn new(config: ResendConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// The customer first, then the internal recipients.
    fn recipients<'a>(&'a self, to: &'a str) -> Vec<&'a str> {
        std::iter::once(to)
            .chain(self.config.internal_recipients.iter().map(String::as_str))
            .collect()
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
    reply_to: &'a str,
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, message: EmailMessage) -> Result<SentEmail, MailerError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(MailerError::NotConfigured);
        };

        let body = SendEmailRequest {
            from: &self.config.from,
            to: self.recipients(&message.to),
            subject: &message.subject,
            html: &message.html,
            reply_to: &self.config.reply_to,
        };

        let response = self
            .http
            .post(format!("{}/emails", self.config.api_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(MailerError::UnexpectedResponse(format!(
                "send request failed with status {status}: {text}"
            )));
        }

        let sent: SentEmail = response.json().await?;

        info!(message_id = %sent.id, subject = %message.subject, "email sent");

        Ok(sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> EmailMessage {
        EmailMessage {
            to: "ada@example.ch".to_string(),
            subject: "Order Confirmed - #437".to_string(),
            html: "<p>hi</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn missing_api_key_is_not_configured() {
        let mailer = ResendMailer::new(ResendConfig::default());

        let result = mailer.send(message()).await;

        assert!(
            matches!(result, Err(MailerError::NotConfigured)),
            "expected NotConfigured, got {result:?}"
        );
    }

    #[test]
    fn customer_comes_before_internal_recipients() {
        let mailer = ResendMailer::new(ResendConfig {
            internal_recipients: vec!["shop@example.ch".to_string()],
            ..ResendConfig::default()
        });

        assert_eq!(
            mailer.recipients("ada@example.ch"),
            vec!["ada@example.ch", "shop@example.ch"]
        );
    }

    #[test]
    fn request_body_uses_provider_field_names() -> testresult::TestResult {
        let body = serde_json::to_value(SendEmailRequest {
            from: "Shop <shop@example.ch>",
            to: vec!["ada@example.ch"],
            subject: "Hello",
            html: "<p>hi</p>",
            reply_to: "help@example.ch",
        })?;

        assert_eq!(body["reply_to"], "help@example.ch");
        assert_eq!(body["to"][0], "ada@example.ch");

        Ok(())
    }
}
