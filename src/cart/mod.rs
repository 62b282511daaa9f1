//! Cart
//!
//! The customer's shopping cart. Lines are keyed by product and chosen colour, every mutation
//! rewrites the stored snapshot and subscribers are told about the new lines straight away.

use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};
use tracing::{debug, warn};
use uuid::Uuid;

pub mod storage;

use storage::CartStorage;

new_key_type! {
    /// Handle returned by [`CartStore::subscribe`].
    pub struct Subscription;
}

/// Identity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CartKey {
    /// Product in the line.
    pub product_id: Uuid,

    /// Colour chosen for the product, if it comes in several.
    pub color: Option<String>,
}

impl CartKey {
    /// Key for a product in a given colour.
    pub fn new(product_id: Uuid, color: Option<String>) -> Self {
        Self { product_id, color }
    }
}

/// A product about to be put in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCartItem {
    /// Product identifier.
    pub product_id: Uuid,

    /// Product name shown in the cart.
    pub name: String,

    /// Unit price in minor units.
    pub unit_price: u64,

    /// Chosen colour.
    #[serde(default)]
    pub color: Option<String>,

    /// Display string such as `3-5 business days`.
    pub shipping_time: String,

    /// Shipping charged for the line, in minor units.
    pub shipping_cost: u64,

    /// Image shown next to the line.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier.
    pub product_id: Uuid,

    /// Product name shown in the cart.
    pub name: String,

    /// Unit price in minor units.
    pub unit_price: u64,

    /// Number of units, at least one.
    pub quantity: u32,

    /// Chosen colour.
    #[serde(default)]
    pub color: Option<String>,

    /// Display string such as `3-5 business days`.
    pub shipping_time: String,

    /// Shipping charged for the line, in minor units.
    pub shipping_cost: u64,

    /// Image shown next to the line.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CartItem {
    /// Identity of this line.
    pub fn key(&self) -> CartKey {
        CartKey::new(self.product_id, self.color.clone())
    }

    fn matches(&self, key: &CartKey) -> bool {
        self.product_id == key.product_id && self.color == key.color
    }

    /// `unit_price × quantity + shipping_cost`, saturating at `u64::MAX`.
    pub fn line_total(&self) -> u64 {
        self.unit_price
            .saturating_mul(u64::from(self.quantity))
            .saturating_add(self.shipping_cost)
    }
}

impl From<NewCartItem> for CartItem {
    fn from(item: NewCartItem) -> Self {
        Self {
            product_id: item.product_id,
            name: item.name,
            unit_price: item.unit_price,
            quantity: 1,
            color: item.color,
            shipping_time: item.shipping_time,
            shipping_cost: item.shipping_cost,
            image_url: item.image_url,
        }
    }
}

/// Order line submitted at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLine {
    /// Product identifier.
    pub product_id: Uuid,

    /// Product name at the time of ordering.
    pub product_name: String,

    /// Number of units.
    pub quantity: u32,

    /// Unit price in minor units.
    pub price: u64,

    /// Shipping estimate at the time of ordering.
    pub shipping_time: String,

    /// Chosen colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl From<&CartItem> for CheckoutLine {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id,
            product_name: item.name.clone(),
            quantity: item.quantity,
            price: item.unit_price,
            shipping_time: item.shipping_time.clone(),
            color: item.color.clone(),
        }
    }
}

type Listener = Box<dyn FnMut(&[CartItem])>;

/// The shopping cart.
pub struct CartStore<S: CartStorage> {
    storage: S,
    items: Vec<CartItem>,
    listeners: SlotMap<Subscription, Listener>,
}

impl<S: CartStorage> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<S: CartStorage> CartStore<S> {
    /// Open the cart saved in `storage`.
    ///
    /// A missing, unreadable or corrupt snapshot opens as an empty cart.
    pub fn open(storage: S) -> Self {
        let items = match storage.load() {
            Ok(Some(snapshot)) => serde_json::from_str(&snapshot).unwrap_or_else(|error| {
                warn!(%error, "discarding unreadable cart snapshot");

                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(error) => {
                warn!(%error, "failed to load cart snapshot");

                Vec::new()
            }
        };

        Self {
            storage,
            items,
            listeners: SlotMap::with_key(),
        }
    }

    /// Lines currently in the cart.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Close the cart, handing back its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Add one unit of a product in the given colour.
    pub fn add(&mut self, item: NewCartItem) {
        let key = CartKey::new(item.product_id, item.color.clone());

        match self.items.iter_mut().find(|line| line.matches(&key)) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.items.push(item.into()),
        }

        self.changed();
    }

    /// Set the quantity of a line. Zero or less removes it.
    pub fn update_quantity(&mut self, key: &CartKey, quantity: i64) {
        if quantity <= 0 {
            self.remove(key);

            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        if let Some(line) = self.items.iter_mut().find(|line| line.matches(key)) {
            line.quantity = quantity;
        }

        self.changed();
    }

    /// Remove a line. Nothing happens to the lines when it is absent.
    pub fn remove(&mut self, key: &CartKey) {
        self.items.retain(|line| !line.matches(key));

        self.changed();
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();

        self.changed();
    }

    /// Amount payable before discounts: every line's units plus its own shipping.
    pub fn total(&self) -> u64 {
        self.items
            .iter()
            .fold(0, |total: u64, line| total.saturating_add(line.line_total()))
    }

    /// Number of units in the cart.
    pub fn count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Whether the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lines to submit with an order.
    pub fn checkout_items(&self) -> Vec<CheckoutLine> {
        self.items.iter().map(CheckoutLine::from).collect()
    }

    /// Call `listener` with the new lines after every change.
    pub fn subscribe(&mut self, listener: impl FnMut(&[CartItem]) + 'static) -> Subscription {
        self.listeners.insert(Box::new(listener))
    }

    /// Stop notifying a subscriber. Returns whether it was still subscribed.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.listeners.remove(subscription).is_some()
    }

    fn changed(&mut self) {
        match serde_json::to_string(&self.items) {
            Ok(snapshot) => {
                if let Err(error) = self.storage.save(&snapshot) {
                    warn!(%error, "failed to save cart snapshot");
                }
            }
            Err(error) => warn!(%error, "failed to serialise cart snapshot"),
        }

        debug!(lines = self.items.len(), "cart changed");

        for listener in self.listeners.values_mut() {
            listener(&self.items);
        }
    }
}
