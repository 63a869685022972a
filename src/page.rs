//! Page assembly for one product.
//!
//! [`ProductPage`] wraps a borrowed [`Product`] and answers the questions a
//! detail page asks of it: which buying option to feature, which images to
//! show, and which similar products to list. It owns no state beyond the CDN
//! host, so pages can be built per request and dropped.

use crate::selector::{ImageSelector, LOOK_VARIANT};
use crate::similar::{self, PriceFilter, ShippingFilter, SortBy};
use crate::styling::StyleError;
use crate::types::{BuyingOption, Product};
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct ProductPage<'a> {
    product: &'a Product,
    cdn: Option<String>,
}

impl<'a> ProductPage<'a> {
    pub fn new(product: &'a Product) -> Self {
        Self { product, cdn: None }
    }

    pub fn with_cdn(mut self, host: impl Into<String>) -> Self {
        self.cdn = Some(host.into());
        self
    }

    pub fn product(&self) -> &'a Product {
        self.product
    }

    /// The winning buying option is listed first.
    pub fn first_buying_option(&self) -> Option<&'a BuyingOption> {
        self.product.buying_options.first()
    }

    fn selector(&self, longest_dimension: i32) -> ImageSelector {
        let selector = ImageSelector::new(longest_dimension);
        match &self.cdn {
            Some(cdn) => selector.with_cdn(cdn.clone()),
            None => selector,
        }
    }

    /// URL of the primary image: the first renderable image in display order.
    pub fn main_image_url(&self, longest_dimension: i32) -> Result<Option<String>, StyleError> {
        self.selector(longest_dimension)
            .primary_url(self.product.image_list())
    }

    /// URL of the first renderable `LOOK` image.
    pub fn look_image_url(&self, longest_dimension: i32) -> Result<Option<String>, StyleError> {
        self.variant_image_url(LOOK_VARIANT, longest_dimension)
    }

    pub fn variant_image_url(
        &self,
        variant: &str,
        longest_dimension: i32,
    ) -> Result<Option<String>, StyleError> {
        self.selector(longest_dimension)
            .variant_url(self.product.image_list(), variant)
    }

    /// Similar products to display, filtered and ordered.
    pub fn similar_products(
        &self,
        sort_by: SortBy,
        price: &impl PriceFilter,
        shipping: &impl ShippingFilter,
    ) -> Vec<&'a Product> {
        similar::similar_products(
            self.product.similar_products.as_deref(),
            sort_by,
            price,
            shipping,
        )
    }

    /// Primary image URL for each product, in the same order.
    ///
    /// Every encoding is independent, so they run on the rayon pool.
    pub fn thumbnail_urls(
        &self,
        products: &[&Product],
        longest_dimension: i32,
    ) -> Result<Vec<Option<String>>, StyleError> {
        let selector = self.selector(longest_dimension);
        products
            .par_iter()
            .map(|product| selector.primary_url(product.image_list()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similar::{PriceRangeOption, ShippingPrograms};
    use crate::test_helpers::{image_with_id, product, with_images};
    use crate::types::ShippingProgram::{Nonprime, Prime};

    #[test]
    fn first_buying_option_empty() {
        let product = Product::default();
        assert!(ProductPage::new(&product).first_buying_option().is_none());
    }

    #[test]
    fn first_buying_option_returns_first() {
        let product = Product {
            buying_options: vec![
                BuyingOption {
                    kind: "NEW".into(),
                    ..BuyingOption::default()
                },
                BuyingOption {
                    kind: "USED".into(),
                    ..BuyingOption::default()
                },
            ],
            ..Product::default()
        };
        let option = ProductPage::new(&product).first_buying_option().unwrap();
        assert_eq!(option.kind, "NEW");
    }

    #[test]
    fn main_and_look_images() {
        let product = with_images(
            product("P", "1", &[Prime]),
            vec![
                image_with_id(None, 200, 200, "main"),
                image_with_id(Some("LOOK"), 100, 200, "look"),
            ],
        );
        let page = ProductPage::new(&product).with_cdn("cdn.test");
        assert_eq!(
            page.main_image_url(120).unwrap().as_deref(),
            Some("https://cdn.test/images/I/main._SL120_.jpg")
        );
        assert_eq!(
            page.look_image_url(120).unwrap().as_deref(),
            Some("https://cdn.test/images/I/look._SL120_.jpg")
        );
    }

    #[test]
    fn missing_image_container_is_none() {
        let product = Product::default();
        let page = ProductPage::new(&product);
        assert_eq!(page.main_image_url(120), Ok(None));
        assert_eq!(page.look_image_url(120), Ok(None));
    }

    #[test]
    fn similar_products_delegates_to_pipeline() {
        let product = Product {
            similar_products: Some(vec![
                Some(product("P1", "30", &[Prime])),
                None,
                Some(product("P2", "30", &[Nonprime])),
                Some(product("P3", "10", &[Prime])),
            ]),
            ..Product::default()
        };
        let page = ProductPage::new(&product);
        let result = page.similar_products(
            SortBy::PriceLowToHigh,
            &PriceRangeOption::Under25.range(),
            &ShippingPrograms::new([Prime]),
        );
        let asins: Vec<&str> = result.iter().map(|p| p.asin.as_str()).collect();
        assert_eq!(asins, vec!["P3"]);
    }

    #[test]
    fn thumbnail_urls_keep_product_order() {
        let a = with_images(product("A", "1", &[Prime]), vec![image_with_id(None, 10, 10, "a")]);
        let b = product("B", "1", &[Prime]);
        let c = with_images(product("C", "1", &[Prime]), vec![image_with_id(None, 900, 300, "c")]);
        let page = ProductPage::new(&a);
        let urls = page.thumbnail_urls(&[&a, &b, &c], 300).unwrap();
        assert_eq!(
            urls,
            vec![
                Some("https://PROD/images/I/a._SL300_.jpg".to_string()),
                None,
                Some("https://PROD/images/I/c._SL300_.jpg".to_string()),
            ]
        );
    }

    #[test]
    fn thumbnail_urls_reject_bad_geometry() {
        let a = with_images(product("A", "1", &[Prime]), vec![image_with_id(None, 10, 10, "a")]);
        assert!(ProductPage::new(&a).thumbnail_urls(&[&a], -1).is_err());
    }

    #[test]
    fn products_without_images_never_fail() {
        let a = product("A", "1", &[Prime]);
        let page = ProductPage::new(&a);
        assert_eq!(page.main_image_url(0), Ok(None));
        assert_eq!(page.look_image_url(-1), Ok(None));
        assert_eq!(page.thumbnail_urls(&[&a], 0), Ok(vec![None]));
    }
}
