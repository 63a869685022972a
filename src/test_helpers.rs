//! Shared builders for unit tests.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let p = with_images(
//!     product("B01", "19.99", &[ShippingProgram::Prime]),
//!     vec![image_with_id(None, 500, 400, "41main")],
//! );
//! ```

use crate::types::{ImageDescriptor, MediaRef, Product, ProductImages, ShippingProgram};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a decimal literal. Panics on malformed input.
pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap_or_else(|e| panic!("bad decimal {s:?}: {e}"))
}

// =========================================================================
// Products
// =========================================================================

/// A valid product with no reward, no images, and no similar products.
pub fn product(asin: &str, price: &str, programs: &[ShippingProgram]) -> Product {
    Product {
        asin: asin.to_string(),
        price: dec(price),
        shipping_programs: programs.to_vec(),
        is_valid: true,
        ..Product::default()
    }
}

/// A valid PRIME product with a reward amount.
pub fn product_with_reward(asin: &str, price: &str, reward: &str) -> Product {
    Product {
        total_benefit_amount: dec(reward),
        ..product(asin, price, &[ShippingProgram::Prime])
    }
}

pub fn with_images(mut product: Product, images: Vec<ImageDescriptor>) -> Product {
    product.images = Some(ProductImages {
        images: Some(images),
        alt_text: None,
    });
    product
}

// =========================================================================
// Images
// =========================================================================

/// An image whose low- and high-res media share the given base size.
pub fn image(variant: Option<&str>, width: i32, height: i32) -> ImageDescriptor {
    ImageDescriptor {
        low_res: MediaRef::new(width, height),
        high_res: MediaRef::new(width, height),
        variant: variant.map(str::to_string),
    }
}

/// Like [`image`], with a physical id so URLs are distinguishable.
pub fn image_with_id(variant: Option<&str>, width: i32, height: i32, id: &str) -> ImageDescriptor {
    let mut descriptor = image(variant, width, height);
    descriptor.low_res = descriptor.low_res.with_physical_id(id);
    descriptor
}
