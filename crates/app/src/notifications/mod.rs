//! Notifications
//!
//! Everything that happens after an order is stored: mirroring it into the shipment tracking
//! store and emailing the customer. None of it may fail a checkout.

mod dispatcher;
pub mod email;
mod notifier;
pub mod templates;
pub mod tracking;

pub use dispatcher::{BestEffort, Dispatched};
pub use email::{EmailMessage, Mailer, MailerError, ResendConfig, ResendMailer, SentEmail};
pub use notifier::OrderNotifier;
pub use templates::{EmailBranding, EmailKind, RenderedEmail};
pub use tracking::{PostgrestTrackingMirror, TrackingConfig, TrackingEntry, TrackingError, TrackingMirror};
