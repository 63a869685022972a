//! Styled image URLs: dimension math plus the CDN style-code grammar.
//!
//! | Concern | Where |
//! |---|---|
//! | **Dimension math** | `calculations`: pure functions over [`Dimensions`] |
//! | **Transformations** | [`params`]: typed steps, validation, token grammar, parsing |
//! | **Encoder** | [`encoder`]: by-value accumulator, URL assembly |
//! | **Errors** | [`StyleError`]: rejected geometry only |
//!
//! No pixels are touched. The encoder only composes the URL a CDN would
//! serve and tracks the dimensions that URL is expected to produce.

mod calculations;
pub mod encoder;
mod error;
pub mod params;

pub use calculations::{
    Dimensions, crop, scale_to_height, scale_to_longest, scale_to_width, upscale_to_height,
    upscale_to_longest, upscale_to_width,
};
pub use encoder::{DEFAULT_CDN, DEFAULT_EXTENSION, StyleEncoder};
pub use error::StyleError;
pub use params::{Category, Rendering, Transformation};
