//! Product Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::data::{DEFAULT_SHIPPING_TIME, ProductDetails};

/// Product fields accepted by the admin create and update endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductRequest {
    pub name: String,
    pub description: Option<String>,

    /// Unit price in minor units
    pub price: u64,

    pub image_url: Option<String>,

    #[serde(default)]
    pub images: Vec<String>,

    /// Defaults to "3-5 business days"
    pub shipping_time: Option<String>,

    /// Shipping cost in minor units
    #[serde(default)]
    pub shipping_cost: u64,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub colors: Vec<String>,
}

impl From<ProductRequest> for ProductDetails {
    fn from(request: ProductRequest) -> Self {
        ProductDetails {
            name: request.name.trim().to_string(),
            description: request.description.filter(|text| !text.trim().is_empty()),
            price: request.price,
            image_url: request.image_url.filter(|url| !url.trim().is_empty()),
            images: request.images,
            shipping_time: request
                .shipping_time
                .filter(|time| !time.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SHIPPING_TIME.to_string()),
            shipping_cost: request.shipping_cost,
            featured: request.featured,
            colors: request.colors,
        }
    }
}
