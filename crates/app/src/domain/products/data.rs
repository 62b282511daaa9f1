//! Products Data

use crate::domain::products::records::ProductUuid;

/// Shipping estimate used when none is given.
pub const DEFAULT_SHIPPING_TIME: &str = "3-5 business days";

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub details: ProductDetails,
}

/// Product Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    pub details: ProductDetails,
}

/// Editable product fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetails {
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub shipping_time: String,
    pub shipping_cost: u64,
    pub featured: bool,
    pub colors: Vec<String>,
}

impl ProductDetails {
    /// Details for a plain product with the default shipping estimate.
    pub fn new(name: impl Into<String>, price: u64) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
            image_url: None,
            images: Vec::new(),
            shipping_time: DEFAULT_SHIPPING_TIME.to_string(),
            shipping_cost: 0,
            featured: false,
            colors: Vec::new(),
        }
    }
}
