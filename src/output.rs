//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.
//!
//! ## Similar products
//!
//! ```text
//! Similar products (sort: price-low-to-high, price: Under $25)
//! 001 Trail Runner 2 [B07TRAIL2]
//!     Price: 19.99  Reward: 1.50
//!     Shipping: PRIME, PRIMENOW
//!     Image: https://PROD/images/I/41trail._SL160_.jpg
//! 002 B07NOIMG
//!     Price: 22.00  Reward: 0
//!     Shipping: PRIME
//!     Image: (none)
//! ```

use crate::similar::{PriceRangeOption, SortBy};
use crate::types::Product;

/// Placeholder for a missing or unrenderable image.
const NO_IMAGE: &str = "(none)";

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn product_header(index: usize, product: &Product) -> String {
    match &product.title {
        Some(title) if !title.is_empty() => {
            format!("{} {} [{}]", format_index(index), title, product.asin)
        }
        _ => format!("{} {}", format_index(index), product.asin),
    }
}

fn url_or_none(url: Option<&str>) -> &str {
    url.unwrap_or(NO_IMAGE)
}

/// Format the ordered similar-product list with one thumbnail URL per product.
pub fn format_similar_products(
    products: &[&Product],
    thumbnails: &[Option<String>],
    sort_by: SortBy,
    price_range: PriceRangeOption,
) -> Vec<String> {
    let mut lines = Vec::new();
    let price_label = match price_range.display() {
        "" => "any",
        label => label,
    };
    lines.push(format!(
        "Similar products (sort: {}, price: {})",
        sort_by.key(),
        price_label
    ));

    if products.is_empty() {
        lines.push("    (no matching products)".to_string());
        return lines;
    }

    for (i, product) in products.iter().enumerate() {
        lines.push(product_header(i + 1, product));
        lines.push(format!(
            "    Price: {}  Reward: {}",
            product.price, product.total_benefit_amount
        ));
        let programs: Vec<&str> = product
            .shipping_programs
            .iter()
            .map(|p| p.as_str())
            .collect();
        lines.push(format!("    Shipping: {}", programs.join(", ")));
        let thumbnail = thumbnails.get(i).and_then(|t| t.as_deref());
        lines.push(format!("    Image: {}", url_or_none(thumbnail)));
    }
    lines
}

pub fn print_similar_products(
    products: &[&Product],
    thumbnails: &[Option<String>],
    sort_by: SortBy,
    price_range: PriceRangeOption,
) {
    for line in format_similar_products(products, thumbnails, sort_by, price_range) {
        println!("{}", line);
    }
}

/// Format the main and look image URLs of one product.
pub fn format_product_images(
    product: &Product,
    main: Option<&str>,
    look: Option<&str>,
) -> Vec<String> {
    vec![
        product_header(1, product),
        format!("    Main: {}", url_or_none(main)),
        format!("    Look: {}", url_or_none(look)),
    ]
}

pub fn print_product_images(product: &Product, main: Option<&str>, look: Option<&str>) {
    for line in format_product_images(product, main, look) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::product;
    use crate::types::ShippingProgram::{Prime, Primenow};

    #[test]
    fn similar_products_layout() {
        let mut first = product("B07TRAIL2", "19.99", &[Prime, Primenow]);
        first.title = Some("Trail Runner 2".into());
        let second = product("B07NOIMG", "22.00", &[Prime]);
        let thumbs = vec![
            Some("https://PROD/images/I/41trail._SL160_.jpg".to_string()),
            None,
        ];

        let lines = format_similar_products(
            &[&first, &second],
            &thumbs,
            SortBy::PriceLowToHigh,
            PriceRangeOption::Under25,
        );

        assert_eq!(
            lines,
            vec![
                "Similar products (sort: price-low-to-high, price: Under $25)",
                "001 Trail Runner 2 [B07TRAIL2]",
                "    Price: 19.99  Reward: 0",
                "    Shipping: PRIME, PRIMENOW",
                "    Image: https://PROD/images/I/41trail._SL160_.jpg",
                "002 B07NOIMG",
                "    Price: 22.00  Reward: 0",
                "    Shipping: PRIME",
                "    Image: (none)",
            ]
        );
    }

    #[test]
    fn empty_similar_products() {
        let lines = format_similar_products(&[], &[], SortBy::Relevance, PriceRangeOption::Any);
        assert_eq!(
            lines,
            vec![
                "Similar products (sort: relevance, price: any)",
                "    (no matching products)",
            ]
        );
    }

    #[test]
    fn product_images_layout() {
        let p = product("B01", "1", &[Prime]);
        let lines = format_product_images(&p, Some("https://PROD/images/I/a.jpg"), None);
        assert_eq!(lines[1], "    Main: https://PROD/images/I/a.jpg");
        assert_eq!(lines[2], "    Look: (none)");
    }
}
