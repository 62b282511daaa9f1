//! Checkout service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use storefront::{
    pricing::{self, PricingError},
    promotions::{self, PromoCode, PromoError},
};
use tracing::info;

use crate::{
    domain::{
        checkout::{
            data::{CheckoutRequest, PlacedOrder},
            errors::CheckoutError,
        },
        orders::{
            OrdersService,
            data::{NewOrder, NewOrderItem},
            records::{OrderItemUuid, OrderRecord, OrderUuid},
        },
        products::records::ProductUuid,
        promo_codes::PromoCodesService,
    },
    notifications::{Dispatched, OrderNotifier},
};

/// Largest amount the order tables can hold (`BIGINT`).
const MAX_AMOUNT: u64 = i64::MAX.unsigned_abs();

/// Places orders: validates, prices, stores, then notifies.
#[derive(Clone)]
pub struct StoreCheckoutService {
    orders: Arc<dyn OrdersService>,
    promo_codes: Arc<dyn PromoCodesService>,
    notifier: OrderNotifier,
}

impl StoreCheckoutService {
    pub fn new(
        orders: Arc<dyn OrdersService>,
        promo_codes: Arc<dyn PromoCodesService>,
        notifier: OrderNotifier,
    ) -> Self {
        Self {
            orders,
            promo_codes,
            notifier,
        }
    }

    /// Place an order and hand back the side effects it started.
    ///
    /// Nothing is written unless every check passes. Once the order is stored the call
    /// succeeds, whatever becomes of the side effects.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] for invalid submissions and storage failures.
    pub async fn submit(
        &self,
        request: CheckoutRequest,
    ) -> Result<(OrderRecord, [Dispatched; 2]), CheckoutError> {
        validate(&request)?;

        let promo = self.applied_promo(request.promo_code.as_deref()).await?;

        let subtotal = request
            .total
            .checked_add(request.discount_amount)
            .ok_or(PricingError::Overflow)?;

        let quote = pricing::quote(subtotal, promo.as_ref())?;

        if quote.discount != request.discount_amount || quote.total != request.total {
            return Err(CheckoutError::TotalMismatch {
                expected: quote.total,
                actual: request.total,
            });
        }

        if !request.payment_method.is_available(promo.as_ref()) {
            return Err(CheckoutError::PaymentMethodUnavailable(
                request.payment_method,
            ));
        }

        let order = self
            .orders
            .create_order(new_order(request, promo, quote.discount, quote.total))
            .await?;

        info!(
            order_number = %order.order_number,
            payment_method = %order.payment_method,
            total = order.total,
            discount = order.discount_amount,
            "order placed"
        );

        let side_effects = self.notifier.order_placed(&order);

        Ok((order, side_effects))
    }

    async fn applied_promo(&self, raw: Option<&str>) -> Result<Option<PromoCode>, CheckoutError> {
        let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
            return Ok(None);
        };

        match promotions::evaluate(self.promo_codes.as_ref(), raw).await {
            Ok(promo) => Ok(Some(promo)),
            Err(PromoError::Rejected) => Err(CheckoutError::InvalidPromoCode),
            Err(PromoError::Lookup(source)) => Err(CheckoutError::PromoLookup(source)),
        }
    }
}

fn validate(request: &CheckoutRequest) -> Result<(), CheckoutError> {
    for (field, value) in [
        ("customer_name", &request.customer_name),
        ("customer_email", &request.customer_email),
        ("customer_address", &request.customer_address),
    ] {
        if value.trim().is_empty() {
            return Err(CheckoutError::MissingField(field));
        }
    }

    if request.items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    if request.items.iter().any(|item| item.quantity == 0) {
        return Err(CheckoutError::InvalidQuantity);
    }

    let subtotal = request
        .total
        .checked_add(request.discount_amount)
        .filter(|subtotal| *subtotal <= MAX_AMOUNT)
        .ok_or(CheckoutError::AmountOutOfRange)?;

    let items = request
        .items
        .iter()
        .try_fold(0_u64, |sum, item| {
            item.price
                .checked_mul(u64::from(item.quantity))
                .and_then(|line| sum.checked_add(line))
        })
        .filter(|items| *items <= MAX_AMOUNT)
        .ok_or(CheckoutError::AmountOutOfRange)?;

    // Shipping is not part of the submission, so items only bound the subtotal from below.
    if subtotal < items {
        return Err(CheckoutError::TotalBelowItems {
            items,
            total: request.total,
        });
    }

    Ok(())
}

fn new_order(
    request: CheckoutRequest,
    promo: Option<PromoCode>,
    discount_amount: u64,
    total: u64,
) -> NewOrder {
    NewOrder {
        uuid: OrderUuid::new(),
        customer_name: request.customer_name.trim().to_string(),
        customer_email: request.customer_email.trim().to_string(),
        customer_phone: request
            .customer_phone
            .map(|phone| phone.trim().to_string())
            .filter(|phone| !phone.is_empty()),
        customer_address: request.customer_address.trim().to_string(),
        payment_method: request.payment_method,
        promo_code: promo.map(|promo| promo.code),
        discount_amount,
        total,
        items: request
            .items
            .into_iter()
            .map(|line| NewOrderItem {
                uuid: OrderItemUuid::new(),
                product_uuid: ProductUuid::from_uuid(line.product_id),
                product_name: line.product_name,
                color: line.color,
                quantity: line.quantity,
                price: line.price,
                shipping_time: line.shipping_time,
            })
            .collect(),
    }
}

#[async_trait]
impl CheckoutService for StoreCheckoutService {
    async fn place_order(&self, request: CheckoutRequest) -> Result<PlacedOrder, CheckoutError> {
        let (order, _side_effects) = self.submit(request).await?;

        Ok(PlacedOrder {
            order_number: order.order_number,
            order_uuid: order.uuid,
        })
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Place an order. Side effects run detached and never fail the call.
    async fn place_order(&self, request: CheckoutRequest) -> Result<PlacedOrder, CheckoutError>;
}
