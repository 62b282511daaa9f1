//! Product Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub shipping_time: String,
    pub shipping_cost: u64,
    pub featured: bool,
    pub colors: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
