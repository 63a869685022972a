//! # Product Page
//!
//! Presentation-time helpers for a product detail page: CDN image URLs with
//! style codes, image selection per display slot, and the similar-products
//! carousel.
//!
//! # Architecture: Three Small Engines
//!
//! Every piece is a pure function of an in-memory [`types::Product`] record.
//! Nothing here fetches, caches, or renders HTML.
//!
//! ```text
//! 1. Style      MediaRef + transformations  →  https://PROD/images/I/id._SL500_.jpg
//! 2. Select     image list + policy         →  first renderable URL
//! 3. Similar    candidate list + filters    →  ordered, de-duplicated products
//! ```
//!
//! [`page::ProductPage`] ties them together for one product.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`styling`] | Style-code encoder: dimension math, transformation tokens, URL assembly |
//! | [`selector`] | Picks the first renderable image matching a policy (primary or variant) |
//! | [`similar`] | Similar-product pipeline: validity, price and shipping filters, dedup, stable sort |
//! | [`page`] | Per-product facade over the three engines |
//! | [`config`] | `config.toml` loading, validation, and stock defaults |
//! | [`types`] | Product data model deserialized from JSON |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Style Codes Are a Log, Not a Setting
//!
//! The encoder records every transformation in order and the URL carries all
//! of them. The CDN applies tokens left to right, so `._SX300_SY200_.` means
//! "width 300, then height 200", not "width 300 and height 200". Dimensions
//! tracked by the encoder follow the same fold, which keeps the reported
//! [`types::MediaRef`] size in agreement with what the CDN serves.
//!
//! ## Unrenderable Is Not an Error
//!
//! A media record with a zero or negative side has no URL. Selection skips it
//! and moves on. Only caller mistakes (a negative crop offset, a zero target
//! size) are errors, and those surface as [`styling::StyleError`].
//!
//! ## Stable Ordering
//!
//! Similar products keep their source order within equal sort keys, and
//! relevance order is the source order itself. Two products at the same price
//! never swap places between requests.

pub mod config;
pub mod output;
pub mod page;
pub mod selector;
pub mod similar;
pub mod styling;
pub mod types;

pub use page::ProductPage;

#[cfg(test)]
pub(crate) mod test_helpers;
