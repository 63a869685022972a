//! The style encoder: a by-value accumulator of transformations.
//!
//! Each call validates its arguments, folds the new [`Transformation`] into
//! the declared [`Dimensions`], and appends it to the [`Rendering`]. Calls are
//! applied strictly left to right, so a second `scale_to_width` acts on the
//! dimensions produced by the first.
//!
//! ```
//! # use product_page::styling::{StyleEncoder, StyleError};
//! # fn main() -> Result<(), StyleError> {
//! let media = StyleEncoder::new(1000, 750)
//!     .physical_id("41abcDEF")
//!     .auto_crop()
//!     .scale_to_longest(500)?
//!     .build();
//!
//! assert_eq!(media.url.as_deref(), Some("https://PROD/images/I/41abcDEF._AC_SL500_.jpg"));
//! assert_eq!((media.width, media.height), (500, 375));
//! # Ok(())
//! # }
//! ```
//!
//! ## URL layouts
//!
//! | Configured | URL |
//! |---|---|
//! | S3 bucket | `https://{cdn}/images/S/{bucket}/{id}[.{tokens}][_].{ext}` |
//! | nothing | `https://{cdn}/images/I/{id}[.{tokens}][_].{ext}` |
//! | name + org unit | `https://{cdn}/images/G/{ou}/{name}._CB{tag}{tokens}_.{ext}` |
//!
//! The trailing `_` appears whenever a cache-bypass tag is set or any token
//! was appended. Existing CDN consumers parse these byte for byte.

use super::calculations::Dimensions;
use super::error::StyleError;
use super::params::{Rendering, Transformation};
use crate::types::MediaRef;

/// CDN host used when none is configured.
pub const DEFAULT_CDN: &str = "PROD";

/// File extension used when the media record carries none.
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Path-based addressing for assets published under an organisation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NamePath {
    name: String,
    org_unit: String,
    cache_bypass_tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEncoder {
    dimensions: Dimensions,
    rendering: Rendering,
    cdn: Option<String>,
    s3_bucket: Option<String>,
    name_path: Option<NamePath>,
    physical_id: String,
    extension: String,
}

impl StyleEncoder {
    /// Start a fresh encoding from base dimensions.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            dimensions: Dimensions::new(width, height),
            rendering: Rendering::new(),
            cdn: None,
            s3_bucket: None,
            name_path: None,
            physical_id: String::new(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Start a fresh encoding seeded from a media record.
    pub fn from_media(media: &MediaRef) -> Self {
        let mut encoder = Self::new(media.width, media.height);
        if let Some(id) = &media.physical_id {
            encoder.physical_id = id.clone();
        }
        if let Some(ext) = &media.extension {
            encoder.extension = ext.clone();
        }
        encoder
    }

    // =========================================================================
    // Addressing
    // =========================================================================

    /// CDN host that serves the image. Defaults to [`DEFAULT_CDN`].
    pub fn cdn(mut self, host: impl Into<String>) -> Self {
        self.cdn = Some(host.into());
        self
    }

    /// Serve from an S3-style bucket path. Takes precedence over a name path.
    pub fn s3_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.s3_bucket = Some(bucket.into());
        self
    }

    pub fn physical_id(mut self, id: impl Into<String>) -> Self {
        self.physical_id = id.into();
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Build a path-based URL such as
    /// `https://{cdn}/images/G/01/kindle/merch/banner._CB515800720_.jpg`.
    ///
    /// One leading `/` on `name` is dropped.
    pub fn with_name_and_org_unit(
        mut self,
        name: impl Into<String>,
        org_unit: impl Into<String>,
        cache_bypass_tag: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let name = match name.strip_prefix('/') {
            Some(stripped) => stripped.to_string(),
            None => name,
        };
        self.name_path = Some(NamePath {
            name,
            org_unit: org_unit.into(),
            cache_bypass_tag: cache_bypass_tag.into(),
        });
        self
    }

    // =========================================================================
    // Transformations
    // =========================================================================

    /// Validate, resize, and record one transformation.
    pub fn apply(mut self, transformation: Transformation) -> Result<Self, StyleError> {
        transformation.validate()?;
        self.dimensions = transformation.resize(self.dimensions);
        self.rendering.push(transformation);
        Ok(self)
    }

    /// Replay every step of a rendering, stopping at the first invalid one.
    pub fn apply_all<'a>(
        self,
        rendering: impl IntoIterator<Item = &'a Transformation>,
    ) -> Result<Self, StyleError> {
        rendering
            .into_iter()
            .try_fold(self, |encoder, t| encoder.apply(t.clone()))
    }

    /// Infallible steps skip validation entirely.
    fn record(mut self, transformation: Transformation) -> Self {
        self.rendering.push(transformation);
        self
    }

    /// Crop to the rectangle whose top left corner is `(x, y)`.
    pub fn crop(self, x: i32, y: i32, width: i32, height: i32) -> Result<Self, StyleError> {
        self.apply(Transformation::Crop {
            x,
            y,
            width,
            height,
        })
    }

    /// Trim white background so the product appears larger.
    ///
    /// Call this before any other transformation; the CDN applies steps in
    /// order and would otherwise trim padding added by an earlier scale.
    pub fn auto_crop(self) -> Self {
        self.record(Transformation::AutoCrop)
    }

    /// Blur by `percent`, which must be within 1–99.
    pub fn blur(self, percent: i32) -> Result<Self, StyleError> {
        self.apply(Transformation::Blur(percent))
    }

    /// Exactly `width` x `height`, padding to keep the aspect ratio.
    pub fn scale_to_rectangle(self, width: i32, height: i32) -> Result<Self, StyleError> {
        self.apply(Transformation::ScaleToRectangle { width, height })
    }

    /// Exactly `side` x `side`, padding to keep the aspect ratio.
    pub fn scale_to_square(self, side: i32) -> Result<Self, StyleError> {
        self.apply(Transformation::ScaleToSquare(side))
    }

    /// Shrink to `width`; never enlarges. The token is appended either way.
    pub fn scale_to_width(self, width: i32) -> Result<Self, StyleError> {
        self.apply(Transformation::ScaleToWidth(width))
    }

    /// Shrink to `height`; never enlarges. The token is appended either way.
    pub fn scale_to_height(self, height: i32) -> Result<Self, StyleError> {
        self.apply(Transformation::ScaleToHeight(height))
    }

    /// Shrink the longest side to `side`; never enlarges.
    pub fn scale_to_longest(self, side: i32) -> Result<Self, StyleError> {
        self.apply(Transformation::ScaleToLongest(side))
    }

    pub fn upscale_to_height(self, height: i32) -> Result<Self, StyleError> {
        self.apply(Transformation::UpscaleToHeight(height))
    }

    pub fn upscale_to_width(self, width: i32) -> Result<Self, StyleError> {
        self.apply(Transformation::UpscaleToWidth(width))
    }

    pub fn upscale_to_longest(self, side: i32) -> Result<Self, StyleError> {
        self.apply(Transformation::UpscaleToLongest(side))
    }

    /// Append a raw style code. Dimensions are not updated.
    pub fn custom_style(self, raw: impl Into<String>) -> Self {
        self.record(Transformation::Custom(raw.into()))
    }

    // =========================================================================
    // Inspection and build
    // =========================================================================

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn rendering(&self) -> &Rendering {
        &self.rendering
    }

    /// Produce the styled media. Consumes the encoder.
    ///
    /// Non-positive final dimensions yield a media record without a URL;
    /// this is the unrenderable marker, not an error.
    pub fn build(self) -> MediaRef {
        let url = self.dimensions.is_renderable().then(|| self.url());
        MediaRef {
            width: self.dimensions.width,
            height: self.dimensions.height,
            url,
            physical_id: Some(self.physical_id).filter(|id| !id.is_empty()),
            extension: Some(self.extension),
        }
    }

    fn url(&self) -> String {
        let tokens = self.rendering.to_string();
        let cdn = self.cdn.as_deref().unwrap_or(DEFAULT_CDN);
        let dotted = |tokens: &str| {
            if tokens.is_empty() {
                String::new()
            } else {
                format!(".{tokens}")
            }
        };

        let mut url = match (&self.s3_bucket, &self.name_path) {
            (Some(bucket), _) => format!(
                "https://{cdn}/images/S/{bucket}/{}{}",
                self.physical_id,
                dotted(&tokens)
            ),
            (None, None) => format!(
                "https://{cdn}/images/I/{}{}",
                self.physical_id,
                dotted(&tokens)
            ),
            (None, Some(path)) => format!(
                "https://{cdn}/images/G/{}/{}._CB{}{tokens}",
                path.org_unit, path.name, path.cache_bypass_tag
            ),
        };

        if self.name_path.is_some() || !tokens.is_empty() {
            url.push('_');
        }
        url.push('.');
        url.push_str(&self.extension);
        url
    }
}
