//! Picking one displayable image URL out of a product's image list.
//!
//! Both policies walk the list in the order the data source gave it and
//! encode each candidate's low-res media with `scale_to_longest`. The first
//! candidate that produces a URL wins; unrenderable candidates are skipped.
//!
//! | Policy | Candidates |
//! |---|---|
//! | [`SelectionPolicy::Primary`] | every image, tagged or not |
//! | [`SelectionPolicy::Variant`] | only images whose variant equals the tag |

use crate::styling::{StyleError, Transformation};
use crate::types::ImageDescriptor;
use tracing::debug;

/// Variant code of styled "look" shots.
pub const LOOK_VARIANT: &str = "LOOK";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// First renderable image of any variant.
    Primary,
    /// First renderable image whose variant tag equals this one exactly.
    Variant(String),
}

impl SelectionPolicy {
    pub fn look() -> Self {
        Self::Variant(LOOK_VARIANT.to_string())
    }

    fn accepts(&self, image: &ImageDescriptor) -> bool {
        match self {
            Self::Primary => true,
            Self::Variant(tag) => image.variant.as_deref() == Some(tag.as_str()),
        }
    }
}

/// Encodes candidate images at a fixed longest dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSelector {
    longest_dimension: i32,
    cdn: Option<String>,
}

impl ImageSelector {
    pub fn new(longest_dimension: i32) -> Self {
        Self {
            longest_dimension,
            cdn: None,
        }
    }

    pub fn with_cdn(mut self, host: impl Into<String>) -> Self {
        self.cdn = Some(host.into());
        self
    }

    pub fn longest_dimension(&self) -> i32 {
        self.longest_dimension
    }

    /// URL of the product's primary image.
    pub fn primary_url(
        &self,
        images: Option<&[ImageDescriptor]>,
    ) -> Result<Option<String>, StyleError> {
        self.select(images, &SelectionPolicy::Primary)
    }

    /// URL of the first image tagged `variant`.
    pub fn variant_url(
        &self,
        images: Option<&[ImageDescriptor]>,
        variant: &str,
    ) -> Result<Option<String>, StyleError> {
        self.select(images, &SelectionPolicy::Variant(variant.to_string()))
    }

    /// Scan `images` in order under `policy`.
    ///
    /// A missing or empty list is `Ok(None)` whatever the longest dimension.
    /// Otherwise a non-positive longest dimension is rejected before any
    /// image is looked at.
    pub fn select(
        &self,
        images: Option<&[ImageDescriptor]>,
        policy: &SelectionPolicy,
    ) -> Result<Option<String>, StyleError> {
        let images = match images {
            Some(images) if !images.is_empty() => images,
            _ => return Ok(None),
        };
        Transformation::ScaleToLongest(self.longest_dimension).validate()?;

        for (index, image) in images.iter().enumerate() {
            if !policy.accepts(image) {
                continue;
            }
            match self.encode(image)? {
                Some(url) => return Ok(Some(url)),
                None => debug!(
                    index,
                    width = image.low_res.width,
                    height = image.low_res.height,
                    "skipping unrenderable image"
                ),
            }
        }
        Ok(None)
    }

    fn encode(&self, image: &ImageDescriptor) -> Result<Option<String>, StyleError> {
        let mut encoder = image.low_res.style_encoder();
        if let Some(cdn) = &self.cdn {
            encoder = encoder.cdn(cdn.clone());
        }
        Ok(encoder.scale_to_longest(self.longest_dimension)?.build().url)
    }
}
