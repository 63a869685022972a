//! Similar-product filtering and ordering.
//!
//! The pipeline runs one pass over the candidate list:
//!
//! ```text
//! similar_products ─► skip null ─► skip invalid ─► price filter
//!                  ─► shipping filter (first match) ─► dedup ─► stable sort
//! ```
//!
//! Missing data never fails: an absent list is an empty result and absent
//! entries are skipped. Filters are traits so callers can pass the stock
//! [`PriceRange`] / [`ShippingPrograms`] values or any closure.

use crate::types::{Product, ShippingProgram};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use tracing::{debug, warn};

// ============================================================================
// Filters
// ============================================================================

pub trait PriceFilter {
    fn price_is_within(&self, price: Decimal) -> bool;
}

impl<F: Fn(Decimal) -> bool> PriceFilter for F {
    fn price_is_within(&self, price: Decimal) -> bool {
        self(price)
    }
}

pub trait ShippingFilter {
    fn matches(&self, program: ShippingProgram) -> bool;
}

impl<F: Fn(ShippingProgram) -> bool> ShippingFilter for F {
    fn matches(&self, program: ShippingProgram) -> bool {
        self(program)
    }
}

/// Inclusive price bounds. A missing bound is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl PriceRange {
    pub fn new(min: Option<Decimal>, max: Option<Decimal>) -> Self {
        Self { min, max }
    }

    /// No bounds at all.
    pub fn unbounded() -> Self {
        Self::default()
    }
}

impl PriceFilter for PriceRange {
    fn price_is_within(&self, price: Decimal) -> bool {
        self.min.is_none_or(|min| min <= price) && self.max.is_none_or(|max| max >= price)
    }
}

/// The price-range facets offered on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceRangeOption {
    #[default]
    #[serde(rename = "any")]
    Any,
    #[serde(rename = "under-25")]
    Under25,
    #[serde(rename = "25-to-50")]
    From25To50,
    #[serde(rename = "50-to-100")]
    From50To100,
    #[serde(rename = "100-to-200")]
    From100To200,
    #[serde(rename = "200-and-above")]
    From200,
}

impl PriceRangeOption {
    pub const ALL: [PriceRangeOption; 6] = [
        Self::Any,
        Self::Under25,
        Self::From25To50,
        Self::From50To100,
        Self::From100To200,
        Self::From200,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Under25 => "under-25",
            Self::From25To50 => "25-to-50",
            Self::From50To100 => "50-to-100",
            Self::From100To200 => "100-to-200",
            Self::From200 => "200-and-above",
        }
    }

    /// Facet label; empty for [`Any`](Self::Any).
    pub fn display(self) -> &'static str {
        match self {
            Self::Any => "",
            Self::Under25 => "Under $25",
            Self::From25To50 => "$25 to $50",
            Self::From50To100 => "$50 to $100",
            Self::From100To200 => "$100 to $200",
            Self::From200 => "$200 & Above",
        }
    }

    pub fn range(self) -> PriceRange {
        let bound = |n: i64| Some(Decimal::from(n));
        match self {
            Self::Any => PriceRange::new(bound(0), None),
            Self::Under25 => PriceRange::new(bound(0), bound(25)),
            Self::From25To50 => PriceRange::new(bound(25), bound(50)),
            Self::From50To100 => PriceRange::new(bound(50), bound(100)),
            Self::From100To200 => PriceRange::new(bound(100), bound(200)),
            Self::From200 => PriceRange::new(bound(200), None),
        }
    }
}

impl std::str::FromStr for PriceRangeOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|option| option.key() == s)
            .ok_or_else(|| format!("unknown price range: {s}"))
    }
}

/// Accepts products shipped through any of the allowed programs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingPrograms {
    allowed: BTreeSet<ShippingProgram>,
}

impl ShippingPrograms {
    pub fn new(allowed: impl IntoIterator<Item = ShippingProgram>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    /// Every program, including `UNKNOWN`.
    pub fn any() -> Self {
        Self::new(ShippingProgram::ALL)
    }
}

impl ShippingFilter for ShippingPrograms {
    fn matches(&self, program: ShippingProgram) -> bool {
        self.allowed.contains(&program)
    }
}

// ============================================================================
// Ordering
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    /// Keep the order the data source returned.
    #[default]
    Relevance,
    PriceLowToHigh,
    PriceHighToLow,
    RewardLowToHigh,
    RewardHighToLow,
}

impl SortBy {
    pub fn key(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::PriceLowToHigh => "price-low-to-high",
            Self::PriceHighToLow => "price-high-to-low",
            Self::RewardLowToHigh => "reward-low-to-high",
            Self::RewardHighToLow => "reward-high-to-low",
        }
    }

    /// Resolve a request key. Unrecognised keys fall back to relevance.
    pub fn from_key(key: &str) -> Self {
        [
            Self::Relevance,
            Self::PriceLowToHigh,
            Self::PriceHighToLow,
            Self::RewardLowToHigh,
            Self::RewardHighToLow,
        ]
        .into_iter()
        .find(|sort| sort.key() == key)
        .unwrap_or_else(|| {
            warn!(key, "unrecognised sort key, keeping relevance order");
            Self::Relevance
        })
    }

    /// Total order over products for this key. Relevance treats every pair
    /// as equal, so a stable sort leaves the input order untouched.
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Relevance => Ordering::Equal,
            Self::PriceLowToHigh => a.price.cmp(&b.price),
            Self::PriceHighToLow => b.price.cmp(&a.price),
            Self::RewardLowToHigh => a.total_benefit_amount.cmp(&b.total_benefit_amount),
            Self::RewardHighToLow => b.total_benefit_amount.cmp(&a.total_benefit_amount),
        }
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Filter, deduplicate, and order a product's similar products.
///
/// Returned references point into `candidates`; relative order of products
/// that compare equal under `sort_by` matches their order in the input.
pub fn similar_products<'a>(
    candidates: Option<&'a [Option<Product>]>,
    sort_by: SortBy,
    price: &impl PriceFilter,
    shipping: &impl ShippingFilter,
) -> Vec<&'a Product> {
    let Some(candidates) = candidates else {
        return Vec::new();
    };

    let mut matching: Vec<&Product> = Vec::new();
    for (index, candidate) in candidates.iter().enumerate() {
        let Some(product) = candidate else {
            debug!(index, "skipping null similar product");
            continue;
        };
        if !product.is_valid {
            debug!(index, asin = %product.asin, "skipping invalid similar product");
            continue;
        }
        if !price.price_is_within(product.price) {
            continue;
        }
        let ships = product
            .shipping_programs
            .iter()
            .any(|program| shipping.matches(*program));
        if ships && !matching.contains(&product) {
            matching.push(product);
        }
    }

    // `sort_by` is stable.
    matching.sort_by(|a, b| sort_by.compare(a, b));
    matching
}
