//! Storefront
//!
//! Domain core of the storefront: the shopping cart, promo code evaluation, order pricing,
//! order number allocation and shipper routing. Persistence and delivery live in the
//! `storefront-app` and `storefront-json` crates.

pub mod cart;
pub mod money;
pub mod order_numbers;
pub mod payments;
pub mod prelude;
pub mod pricing;
pub mod promotions;
pub mod shipping;
