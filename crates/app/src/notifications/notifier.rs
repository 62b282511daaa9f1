//! Order notifier.

use std::sync::Arc;

use storefront::{order_numbers::OrderNumber, shipping::{ShippingRoutes, TrackingStatus}};

use crate::{
    domain::orders::records::OrderRecord,
    notifications::{
        BestEffort, Dispatched,
        email::{EmailMessage, Mailer, MailerError, SentEmail},
        templates::{self, EmailBranding, EmailKind},
        tracking::{TrackingEntry, TrackingMirror},
    },
};

/// Sends the tracking mirror entry and customer emails for stored orders.
#[derive(Clone)]
pub struct OrderNotifier {
    mailer: Arc<dyn Mailer>,
    tracking: Arc<dyn TrackingMirror>,
    routes: Arc<ShippingRoutes>,
    branding: Arc<EmailBranding>,
}

impl OrderNotifier {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        tracking: Arc<dyn TrackingMirror>,
        routes: ShippingRoutes,
        branding: EmailBranding,
    ) -> Self {
        Self {
            mailer,
            tracking,
            routes: Arc::new(routes),
            branding: Arc::new(branding),
        }
    }

    /// Kick off the side effects of a newly stored order.
    ///
    /// Both run detached and independently; their failures are logged, never returned.
    pub fn order_placed(&self, order: &OrderRecord) -> [Dispatched; 2] {
        let tracking = Arc::clone(&self.tracking);
        let entry = self.tracking_entry(order);

        let mirrored = BestEffort::spawn("tracking mirror", async move {
            tracking.insert(entry).await
        });

        let notifier = self.clone();
        let order_number = order.order_number;
        let total = order.total;
        let recipient = order.customer_email.clone();

        let emailed = BestEffort::spawn("order confirmation email", async move {
            notifier
                .send_email(EmailKind::OrderConfirmation, order_number, total, &recipient)
                .await
                .map(|_| ())
        });

        [mirrored, emailed]
    }

    /// Tracking store row for `order`, shipped according to its address.
    pub fn tracking_entry(&self, order: &OrderRecord) -> TrackingEntry {
        TrackingEntry {
            order_code: order.order_number.to_string(),
            customer_name: order.customer_name.clone(),
            shipper: self.routes.shipper_for(&order.customer_address).to_string(),
            products: order.product_summary(),
            status: TrackingStatus::Waiting,
        }
    }

    /// Render and send one email, returning the provider's receipt.
    ///
    /// # Errors
    ///
    /// Returns the mailer's error unchanged.
    pub async fn send_email(
        &self,
        kind: EmailKind,
        order_number: OrderNumber,
        total: u64,
        recipient: &str,
    ) -> Result<SentEmail, MailerError> {
        let rendered = templates::render(kind, order_number, total, recipient, &self.branding);

        self.mailer
            .send(EmailMessage {
                to: recipient.to_string(),
                subject: rendered.subject,
                html: rendered.html,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use mockall::predicate::eq;
    use storefront::payments::PaymentMethod;
    use testresult::TestResult;

    use crate::{
        domain::orders::records::{OrderItemRecord, OrderItemUuid, OrderUuid},
        domain::products::records::ProductUuid,
        notifications::{email::MockMailer, tracking::MockTrackingMirror, TrackingError},
    };

    use super::*;

    fn order(address: &str) -> TestResult<OrderRecord> {
        let uuid = OrderUuid::new();
        let item = |name: &str| OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: uuid,
            product_uuid: ProductUuid::new(),
            product_name: name.to_string(),
            color: None,
            quantity: 1,
            price: 10_00,
            shipping_time: "3-5 business days".to_string(),
        };

        Ok(OrderRecord {
            uuid,
            order_number: "437".parse()?,
            customer_name: "Ada Muster".to_string(),
            customer_email: "ada@example.ch".to_string(),
            customer_phone: None,
            customer_address: address.to_string(),
            payment_method: PaymentMethod::Twint,
            promo_code: None,
            discount_amount: 0,
            total: 33_00,
            is_paid: false,
            items: vec![item("Lamp"), item("Coaster")],
            created_at: Timestamp::now(),
        })
    }

    fn notifier(mailer: MockMailer, tracking: MockTrackingMirror) -> OrderNotifier {
        OrderNotifier::new(
            Arc::new(mailer),
            Arc::new(tracking),
            ShippingRoutes::default(),
            EmailBranding::default(),
        )
    }

    #[test]
    fn tracking_entry_routes_geneva_addresses() -> TestResult {
        let notifier = notifier(MockMailer::new(), MockTrackingMirror::new());
        let defaults = ShippingRoutes::default();

        let geneva = notifier.tracking_entry(&order("Rue du Rhône 1, 1204 GENÈVE")?);
        let zurich = notifier.tracking_entry(&order("Bahnhofstrasse 1, 8001 Zürich")?);

        assert_eq!(geneva.shipper, defaults.shipper_for("geneva"));
        assert_eq!(zurich.shipper, defaults.shipper_for("anywhere else"));
        assert_ne!(geneva.shipper, zurich.shipper);
        assert_eq!(geneva.products, "Lamp, Coaster");
        assert_eq!(geneva.order_code, "437");
        assert_eq!(geneva.status, TrackingStatus::Waiting);

        Ok(())
    }

    #[tokio::test]
    async fn order_placed_mirrors_and_emails_once_each() -> TestResult {
        let order = order("Bahnhofstrasse 1, 8001 Zürich")?;

        let mut tracking = MockTrackingMirror::new();
        tracking
            .expect_insert()
            .withf(|entry| entry.order_code == "437" && entry.status == TrackingStatus::Waiting)
            .times(1)
            .returning(|_| Ok(()));

        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .withf(|message| {
                message.to == "ada@example.ch" && message.subject == "Order Confirmed - #437"
            })
            .times(1)
            .returning(|_| {
                Ok(SentEmail {
                    id: "msg_1".to_string(),
                })
            });

        let [mirrored, emailed] = notifier(mailer, tracking).order_placed(&order);

        assert!(mirrored.settled().await, "tracking mirror failed");
        assert!(emailed.settled().await, "confirmation email failed");

        Ok(())
    }

    #[tokio::test]
    async fn failing_side_effects_settle_as_failed() -> TestResult {
        let order = order("Genève")?;

        let mut tracking = MockTrackingMirror::new();
        tracking
            .expect_insert()
            .times(1)
            .returning(|_| Err(TrackingError::NotConfigured));

        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .times(1)
            .returning(|_| Err(MailerError::NotConfigured));

        let [mirrored, emailed] = notifier(mailer, tracking).order_placed(&order);

        assert!(!mirrored.settled().await, "tracking failure was not reported");
        assert!(!emailed.settled().await, "email failure was not reported");

        Ok(())
    }

    #[tokio::test]
    async fn send_email_returns_the_provider_receipt() -> TestResult {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .with(eq(EmailMessage {
                to: "ada@example.ch".to_string(),
                subject: "Payment Reminder - Order #512".to_string(),
                html: templates::render(
                    EmailKind::PaymentReminder,
                    "512".parse()?,
                    12_50,
                    "ada@example.ch",
                    &EmailBranding::default(),
                )
                .html,
            }))
            .times(1)
            .returning(|_| {
                Ok(SentEmail {
                    id: "msg_2".to_string(),
                })
            });

        let sent = notifier(mailer, MockTrackingMirror::new())
            .send_email(EmailKind::PaymentReminder, "512".parse()?, 12_50, "ada@example.ch")
            .await?;

        assert_eq!(sent.id, "msg_2");

        Ok(())
    }
}
