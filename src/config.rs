//! Page configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. User files are
//! sparse overlays on top of stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # Every key may be omitted; the stock values are shown
//!
//! [images]
//! cdn_host = "PROD"          # CDN host for generated image URLs
//! longest_dimension = 500    # Longest side of detail-page images (px)
//! look_variant = "LOOK"      # Variant tag of styled "look" shots
//!
//! [similar]
//! sort_by = "relevance"      # relevance | price-low-to-high | price-high-to-low
//!                            # | reward-low-to-high | reward-high-to-low
//! price_range = "any"        # any | under-25 | 25-to-50 | 50-to-100
//!                            # | 100-to-200 | 200-and-above
//! shipping_programs = []     # Allowed programs; empty means any
//!
//! [processing]
//! max_processes = 4          # Max parallel encoders (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are an error, so a misspelt option never silently falls
//! back to its default.

use crate::similar::{PriceRangeOption, ShippingPrograms, SortBy};
use crate::types::ShippingProgram;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Image URL settings.
    pub images: ImagesConfig,
    /// Similar-product defaults.
    pub similar: SimilarConfig,
    /// Parallel encoding settings.
    pub processing: ProcessingConfig,
}

impl PageConfig {
    /// Reject values no page could render with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images.longest_dimension <= 0 {
            return Err(ConfigError::Validation(
                "images.longest_dimension must be greater than 0".into(),
            ));
        }
        if self.images.cdn_host.trim().is_empty() {
            return Err(ConfigError::Validation(
                "images.cdn_host must not be empty".into(),
            ));
        }
        if self.images.look_variant.is_empty() {
            return Err(ConfigError::Validation(
                "images.look_variant must not be empty".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    pub cdn_host: String,
    pub longest_dimension: i32,
    pub look_variant: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            cdn_host: crate::styling::DEFAULT_CDN.to_string(),
            longest_dimension: 500,
            look_variant: crate::selector::LOOK_VARIANT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimilarConfig {
    pub sort_by: SortBy,
    pub price_range: PriceRangeOption,
    /// Allowed shipping programs. Empty means any program.
    pub shipping_programs: Vec<ShippingProgram>,
}

impl SimilarConfig {
    pub fn shipping_filter(&self) -> ShippingPrograms {
        if self.shipping_programs.is_empty() {
            ShippingPrograms::any()
        } else {
            ShippingPrograms::new(self.shipping_programs.iter().copied())
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Cap on parallel encoding workers. Unset means one per core; larger
    /// values are clamped to the core count.
    pub max_processes: Option<usize>,
}

/// Worker count for the rayon pool: `max_processes` clamped to the core
/// count, or every core when unset.
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism().map_or(1, |n| n.get());
    match config.max_processes {
        Some(limit) => limit.min(cores),
        None => cores,
    }
}

// -----------------------------------------------------------------------------
// Loading
// -----------------------------------------------------------------------------

/// The stock defaults as a TOML table, the base every user file overlays.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(PageConfig::default())?)
}

/// Lay `overlay` over `base`. Tables merge per key and recurse; any other
/// overlay value wins outright. Base keys the overlay leaves out survive.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    use toml::Value::Table;

    match (base, overlay) {
        (Table(mut merged), Table(layer)) => {
            for (key, value) in layer {
                let value = match merged.remove(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => value,
                };
                merged.insert(key, value);
            }
            Table(merged)
        }
        (_, replacement) => replacement,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Apply the user overlay (if any), deserialize, and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<PageConfig, ConfigError> {
    let merged = match overlay {
        Some(layer) => merge_toml(base, layer),
        None => base,
    };
    let config: PageConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, over stock defaults.
pub fn load_config(dir: &Path) -> Result<PageConfig, ConfigError> {
    resolve_config(stock_defaults_value()?, load_raw_config(dir)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Printed by `product-page gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Product Page Configuration
# ==========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Image URLs
# ---------------------------------------------------------------------------
[images]
# CDN host placed in every generated image URL.
cdn_host = "PROD"

# Longest side, in pixels, that detail-page images are scaled down to.
longest_dimension = 500

# Variant tag identifying styled "look" images.
look_variant = "LOOK"

# ---------------------------------------------------------------------------
# Similar products
# ---------------------------------------------------------------------------
[similar]
# relevance | price-low-to-high | price-high-to-low
# | reward-low-to-high | reward-high-to-low
sort_by = "relevance"

# any | under-25 | 25-to-50 | 50-to-100 | 100-to-200 | 200-and-above
price_range = "any"

# Shipping programs to keep, e.g. ["PRIME", "PRIMENOW"]. Empty keeps all.
shipping_programs = []

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel encoding workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
