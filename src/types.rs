//! Product records as delivered by the product data source.
//!
//! These types are read-only inputs to the page logic. Every field the
//! source may omit is an `Option` (or defaults to empty), and nothing here
//! validates: absence is a normal state that the selector and pipeline
//! handle explicitly.

use crate::styling::StyleEncoder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An already-resolved media object: base dimensions plus an optional URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaRef {
    pub width: i32,
    pub height: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl MediaRef {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_physical_id(mut self, id: impl Into<String>) -> Self {
        self.physical_id = Some(id.into());
        self
    }

    /// A fresh encoder seeded with this media's dimensions, id, and extension.
    pub fn style_encoder(&self) -> StyleEncoder {
        StyleEncoder::from_media(self)
    }
}

/// One product image.
///
/// `variant` is a short role code such as `MAIN`, `PT01`, or `LOOK`. The
/// primary display image is the first in the list, not necessarily `MAIN`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageDescriptor {
    /// Detail-page sized rendition (up to 500px per side).
    pub low_res: MediaRef,
    /// Hover-zoom rendition.
    pub high_res: MediaRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductImages {
    /// Display-ordered images; the first is the primary image.
    pub images: Option<Vec<ImageDescriptor>>,
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingProgram {
    Addon,
    Fresh,
    Nonprime,
    Pantry,
    Prime,
    Primenow,
    Unknown,
}

impl ShippingProgram {
    pub const ALL: [ShippingProgram; 7] = [
        Self::Addon,
        Self::Fresh,
        Self::Nonprime,
        Self::Pantry,
        Self::Prime,
        Self::Primenow,
        Self::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Addon => "ADDON",
            Self::Fresh => "FRESH",
            Self::Nonprime => "NONPRIME",
            Self::Pantry => "PANTRY",
            Self::Prime => "PRIME",
            Self::Primenow => "PRIMENOW",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for ShippingProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ShippingProgram {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown shipping program: {s}"))
    }
}

/// A way to purchase the product ("Buy New", "Subscribe and Save", ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuyingOption {
    #[serde(rename = "type")]
    pub kind: String,
    pub merchant: Option<String>,
    pub free_returns_policy: Option<String>,
    pub price: Option<Decimal>,
}

/// A product record. Similar products nest the same shape, and any entry of
/// that list may be `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub asin: String,
    pub title: Option<String>,
    pub price: Decimal,
    pub total_benefit_amount: Decimal,
    pub shipping_programs: Vec<ShippingProgram>,
    pub is_valid: bool,
    pub images: Option<ProductImages>,
    pub similar_products: Option<Vec<Option<Product>>>,
    pub buying_options: Vec<BuyingOption>,
}

impl Product {
    /// The ordered image list, if the container and the list are both present.
    pub fn image_list(&self) -> Option<&[ImageDescriptor]> {
        self.images.as_ref()?.images.as_deref()
    }

    /// Title for display, falling back to the ASIN.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.asin)
    }
}
