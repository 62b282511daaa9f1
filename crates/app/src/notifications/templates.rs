//! Email templates.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use storefront::{money::format_chf, order_numbers::OrderNumber};
use thiserror::Error;

const ACCENT: &str = "#FF6B00";

/// Emails the shop sends about an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmailKind {
    OrderConfirmation,
    PaymentReminder,
}

impl EmailKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OrderConfirmation => "order-confirmation",
            Self::PaymentReminder => "payment-reminder",
        }
    }
}

impl fmt::Display for EmailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown email type \"{0}\"")]
pub struct UnknownEmailKind(pub String);

impl FromStr for EmailKind {
    type Err = UnknownEmailKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "order-confirmation" => Ok(Self::OrderConfirmation),
            "payment-reminder" => Ok(Self::PaymentReminder),
            other => Err(UnknownEmailKind(other.to_string())),
        }
    }
}

/// Shop details printed in every email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailBranding {
    pub shop_name: String,
    pub tagline: String,

    /// Storefront base URL, without a trailing slash.
    pub site_url: String,

    pub tracking_site_url: String,
    pub contact_phone: String,
}

impl Default for EmailBranding {
    fn default() -> Self {
        Self {
            shop_name: "Master 3D".to_string(),
            tagline: "Swiss 3D Printing Excellence".to_string(),
            site_url: "https://master3d.net".to_string(),
            tracking_site_url: "https://track.master3d.net".to_string(),
            contact_phone: "+41 78 251 47 68".to_string(),
        }
    }
}

impl EmailBranding {
    fn order_link(&self, order_number: OrderNumber) -> String {
        format!(
            "{}/my-orders?order={order_number}",
            self.site_url.trim_end_matches('/')
        )
    }

    fn tracking_host(&self) -> &str {
        self.tracking_site_url
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/')
    }
}

/// Subject and body of a rendered email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

/// Render `kind` for one order.
pub fn render(
    kind: EmailKind,
    order_number: OrderNumber,
    total: u64,
    recipient: &str,
    branding: &EmailBranding,
) -> RenderedEmail {
    match kind {
        EmailKind::OrderConfirmation => RenderedEmail {
            subject: format!("Order Confirmed - #{order_number}"),
            html: order_confirmation(order_number, total, recipient, branding),
        },
        EmailKind::PaymentReminder => RenderedEmail {
            subject: format!("Payment Reminder - Order #{order_number}"),
            html: payment_reminder(order_number, total, recipient, branding),
        },
    }
}

fn order_confirmation(
    order_number: OrderNumber,
    total: u64,
    recipient: &str,
    branding: &EmailBranding,
) -> String {
    let recipient = escape(recipient);
    let total = format_chf(total);
    let link = escape(&branding.order_link(order_number));
    let tracking_url = escape(&branding.tracking_site_url);
    let tracking_host = escape(branding.tracking_host());

    let body = format!(
        r#"<p>Thank you for your order, {recipient}!</p>
      <div class="order-details">
        <p><span class="label">Order Number:</span> #{order_number}</p>
        <p><span class="label">Total Amount:</span> {total}</p>
        <p><span class="label">Status:</span> Pending Payment</p>
      </div>
      <p>We've received your order and are ready to print your custom 3D products. Payment details have been sent separately.</p>
      <p><strong>Next Steps:</strong></p>
      <ul>
        <li>Complete your payment using the provided payment instructions</li>
        <li>We'll begin production once payment is confirmed</li>
        <li>You'll receive a shipping notification when your order is on the way</li>
      </ul>
      <a href="{link}" class="cta">View Order Details</a>
      <p>For tracking updates, visit: <a href="{tracking_url}">{tracking_host}</a></p>"#
    );

    layout("Order Confirmed!", &body, true, branding)
}

fn payment_reminder(
    order_number: OrderNumber,
    total: u64,
    recipient: &str,
    branding: &EmailBranding,
) -> String {
    let recipient = escape(recipient);
    let total = format_chf(total);
    let link = escape(&branding.order_link(order_number));

    let body = format!(
        r#"<p>Hi {recipient},</p>
      <p>We're ready to start printing your order! To proceed, we need to receive your payment.</p>
      <div class="order-details">
        <p><span class="label">Order Number:</span> #{order_number}</p>
        <p><span class="label">Amount Due:</span> {total}</p>
        <p><span class="label">Payment Methods:</span> TWINT or Bank Transfer</p>
      </div>
      <p>Complete payment instructions have been sent to you. Once we receive your payment, we'll begin production immediately.</p>
      <a href="{link}" class="cta">View Payment Instructions</a>"#
    );

    layout("Payment Reminder", &body, false, branding)
}

fn layout(title: &str, body: &str, automated_notice: bool, branding: &EmailBranding) -> String {
    let shop = escape(&branding.shop_name);
    let tagline = escape(&branding.tagline);
    let phone = escape(&branding.contact_phone);
    let notice = if automated_notice {
        "<p>This is an automated email, please do not reply directly.</p>"
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <style>
      body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Arial, sans-serif; color: #333; }}
      .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
      .header {{ background: {ACCENT}; color: white; padding: 20px; border-radius: 8px 8px 0 0; text-align: center; }}
      .content {{ background: #f9f9f9; padding: 20px; border-radius: 0 0 8px 8px; }}
      .order-details {{ background: white; padding: 15px; border-radius: 6px; margin: 15px 0; border-left: 4px solid {ACCENT}; }}
      .label {{ font-weight: bold; color: {ACCENT}; }}
      .footer {{ text-align: center; margin-top: 20px; color: #666; font-size: 12px; }}
      .cta {{ display: inline-block; background: {ACCENT}; color: white; padding: 12px 24px; text-decoration: none; border-radius: 6px; margin-top: 15px; }}
    </style>
  </head>
  <body>
    <div class="container">
      <div class="header"><h1>{title}</h1></div>
      <div class="content">
      {body}
      <div class="footer">
        <p>{shop} - {tagline}</p>
        {notice}
        <p>Contact: {phone}</p>
      </div>
      </div>
    </div>
  </body>
</html>
"#
    )
}

/// Escape text for HTML element and attribute content.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }

    escaped
}
