//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use storefront::{
    order_numbers::OrderNumber,
    payments::PaymentMethod,
    promotions::{DiscountRule, PromoCodeName},
    shipping::ShippingRoutes,
};
use storefront_app::{
    context::AppContext,
    domain::{
        checkout::MockCheckoutService,
        orders::{
            MockOrdersService,
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        promo_codes::{
            MockPromoCodesService,
            records::{PromoCodeRecord, PromoCodeUuid},
        },
    },
    notifications::{EmailBranding, OrderNotifier, email::MockMailer, tracking::MockTrackingMirror},
};

use crate::{admin, state::State};

pub(crate) const TEST_ADMIN_TOKEN: &str = "test-admin-token";

/// Service mocks behind the app context. Any call without a matching expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) products: MockProductsService,
    pub(crate) promo_codes: MockPromoCodesService,
    pub(crate) orders: MockOrdersService,
    pub(crate) checkout: MockCheckoutService,
    pub(crate) mailer: MockMailer,
    pub(crate) tracking: MockTrackingMirror,
}

impl Mocks {
    fn into_app_context(self) -> AppContext {
        AppContext {
            products: Arc::new(self.products),
            promo_codes: Arc::new(self.promo_codes),
            orders: Arc::new(self.orders),
            checkout: Arc::new(self.checkout),
            notifier: OrderNotifier::new(
                Arc::new(self.mailer),
                Arc::new(self.tracking),
                ShippingRoutes::default(),
                EmailBranding::default(),
            ),
        }
    }
}

pub(crate) fn admin_authorization() -> String {
    format!("Bearer {TEST_ADMIN_TOKEN}")
}

pub(crate) fn state_with_token(mocks: Mocks, admin_token: Option<String>) -> Arc<State> {
    State::from_app_context(mocks.into_app_context(), admin_token)
}

pub(crate) fn service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_token(
                mocks,
                Some(TEST_ADMIN_TOKEN.to_string()),
            )))
            .push(route),
    )
}

pub(crate) fn admin_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_token(
                mocks,
                Some(TEST_ADMIN_TOKEN.to_string()),
            )))
            .hoop(admin::middleware::handler)
            .push(route),
    )
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Desk Lamp".to_string(),
        description: Some("Printed in PLA".to_string()),
        price: 20_00,
        image_url: None,
        images: Vec::new(),
        shipping_time: "3-5 business days".to_string(),
        shipping_cost: 7_00,
        featured: true,
        colors: vec!["black".to_string(), "orange".to_string()],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(number: u16) -> OrderRecord {
    let uuid = OrderUuid::new();

    OrderRecord {
        uuid,
        order_number: OrderNumber::try_from(number).expect("test order numbers are in range"),
        customer_name: "Anna Muster".to_string(),
        customer_email: "anna@example.ch".to_string(),
        customer_phone: Some("0791234567".to_string()),
        customer_address: "Bahnhofstrasse 1, 8001 Zürich".to_string(),
        payment_method: PaymentMethod::Twint,
        promo_code: None,
        discount_amount: 0,
        total: 27_00,
        is_paid: false,
        items: vec![OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: uuid,
            product_uuid: ProductUuid::new(),
            product_name: "Desk Lamp".to_string(),
            color: Some("black".to_string()),
            quantity: 1,
            price: 20_00,
            shipping_time: "3-5 business days".to_string(),
        }],
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_promo_code(code: &str, rule: DiscountRule) -> PromoCodeRecord {
    PromoCodeRecord {
        uuid: PromoCodeUuid::new(),
        code: PromoCodeName::new(code).expect("test promo codes are valid"),
        rule,
        is_active: true,
        unlocks_cash_payment: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn percent(value: i64) -> DiscountRule {
    DiscountRule::percentage(Decimal::from(value)).expect("test percentages are in range")
}
