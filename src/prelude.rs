//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        CartItem, CartKey, CartStore, CheckoutLine, NewCartItem, Subscription,
        storage::{CartStorage, CartStorageError, FileCartStorage, MemoryCartStorage},
    },
    money::{CURRENCY, format_chf},
    order_numbers::{
        AllocationError, MAX_ATTEMPTS, OrderNumber, OrderNumberAllocator, OrderNumberError,
        OrderNumberRegistry,
    },
    payments::{PaymentMethod, available_methods},
    pricing::{PricingError, Quote, discount_for, quote},
    promotions::{
        DiscountRule, DiscountRuleError, DiscountType, PromoCode, PromoCodeName, PromoError,
        PromoLookup, evaluate,
    },
    shipping::{ShippingRoute, ShippingRoutes, ShippingRoutesError, TrackingStatus},
};
