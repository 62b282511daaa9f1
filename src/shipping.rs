//! Shipping
//!
//! Maps a delivery address onto the shipper that carries the parcel, and the status values
//! used by the shipment-tracking store.

use std::{fmt, fs, io, path::Path};

use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use thiserror::Error;

/// Errors raised while loading shipping routes.
#[derive(Debug, Error)]
pub enum ShippingRoutesError {
    /// The routes file could not be read.
    #[error("failed to read shipping routes")]
    Io(#[from] io::Error),

    /// The routes file is not valid YAML for [`ShippingRoutes`].
    #[error("failed to parse shipping routes")]
    Parse(#[from] serde_norway::Error),

    /// No default shipper was configured.
    #[error("shipping routes need a default shipper")]
    MissingDefault,
}

/// A shipper and the address keywords that select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingRoute {
    /// Shipper name recorded in the tracking store.
    pub shipper: String,

    /// Case-insensitive fragments matched anywhere in the address.
    pub keywords: SmallVec<[String; 4]>,
}

impl ShippingRoute {
    fn matches(&self, address: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| address.contains(&keyword.to_lowercase()))
    }
}

/// Ordered region to shipper mapping. The first matching route wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingRoutes {
    /// Routes tried in order.
    #[serde(default)]
    pub routes: Vec<ShippingRoute>,

    /// Shipper used when no route matches.
    pub default_shipper: String,
}

impl Default for ShippingRoutes {
    fn default() -> Self {
        Self {
            routes: vec![ShippingRoute {
                shipper: "Geneva Courier".to_string(),
                keywords: smallvec![
                    "geneva".to_string(),
                    "genève".to_string(),
                    "geneve".to_string(),
                ],
            }],
            default_shipper: "Swiss Post".to_string(),
        }
    }
}

impl ShippingRoutes {
    /// Parse routes from YAML.
    ///
    /// ```yaml
    /// default_shipper: Swiss Post
    /// routes:
    ///   - shipper: Geneva Courier
    ///     keywords: [geneva, genève, geneve]
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error for malformed YAML or a blank default shipper.
    pub fn from_yaml(yaml: &str) -> Result<Self, ShippingRoutesError> {
        let routes: Self = serde_norway::from_str(yaml)?;

        if routes.default_shipper.trim().is_empty() {
            return Err(ShippingRoutesError::MissingDefault);
        }

        Ok(routes)
    }

    /// Load routes from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ShippingRoutesError> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    /// Shipper carrying parcels to `address`.
    pub fn shipper_for(&self, address: &str) -> &str {
        let address = address.to_lowercase();

        self.routes
            .iter()
            .find(|route| route.matches(&address))
            .map_or(self.default_shipper.as_str(), |route| route.shipper.as_str())
    }
}

/// Shipment progress as stored by the tracking store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackingStatus {
    /// Placed, nothing printed yet.
    #[serde(rename = "Waiting")]
    Waiting,

    /// On the printer.
    #[serde(rename = "printing")]
    Printing,

    /// Handed to the shipper.
    #[serde(rename = "shipping")]
    Shipping,

    /// Received by the customer.
    #[serde(rename = "delivered")]
    Delivered,
}

impl TrackingStatus {
    /// Wire spelling used by the tracking store.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "Waiting",
            Self::Printing => "printing",
            Self::Shipping => "shipping",
            Self::Delivered => "delivered",
        }
    }
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
