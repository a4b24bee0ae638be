//! Configuration types for the listings analysis pipeline.
//!
//! Defaults come from [`crate::schema`]; the builder exists so callers and
//! tests can point the pipeline at another file or tighten the thresholds
//! without touching the recorded decisions.

use crate::schema::{
    BRAND_SHARE_THRESHOLD, DEFAULT_ENCODING, DEFAULT_INPUT_PATH, PRICE_MAX, PRICE_MIN,
    REGISTRATION_YEAR_MAX, REGISTRATION_YEAR_MIN,
};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Metric used to order the brand aggregates (always descending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AggregateOrder {
    /// Highest mean price first
    #[default]
    MeanPrice,
    /// Highest mean mileage first
    MeanMileage,
}

/// Inclusive bounds applied by the range filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeBounds {
    pub price_min: i64,
    pub price_max: i64,
    pub registration_year_min: i64,
    pub registration_year_max: i64,
}

impl Default for RangeBounds {
    fn default() -> Self {
        Self {
            price_min: PRICE_MIN,
            price_max: PRICE_MAX,
            registration_year_min: REGISTRATION_YEAR_MIN,
            registration_year_max: REGISTRATION_YEAR_MAX,
        }
    }
}

impl RangeBounds {
    pub fn price(&self) -> RangeInclusive<i64> {
        self.price_min..=self.price_max
    }

    pub fn registration_year(&self) -> RangeInclusive<i64> {
        self.registration_year_min..=self.registration_year_max
    }
}

/// Configuration for the analysis pipeline.
///
/// Use [`PipelineConfig::builder()`] to create a configuration with a
/// fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use autos_analysis::config::{AggregateOrder, PipelineConfig};
///
/// let config = PipelineConfig::builder()
///     .input_path("data/autos.csv")
///     .sort_by(AggregateOrder::MeanMileage)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// CSV file to load.
    /// Default: "autos.csv"
    pub input_path: PathBuf,

    /// Encoding label of the input file (any WHATWG label).
    /// Default: "latin-1"
    pub encoding: String,

    /// Price and registration-year bounds for the range filter.
    pub bounds: RangeBounds,

    /// Minimum listing share (exclusive) for a brand to be aggregated.
    /// Default: 0.05
    pub brand_share_threshold: f64,

    /// Ordering of the aggregate table.
    /// Default: MeanPrice
    pub sort_by: AggregateOrder,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            encoding: DEFAULT_ENCODING.to_string(),
            bounds: RangeBounds::default(),
            brand_share_threshold: BRAND_SHARE_THRESHOLD,
            sort_by: AggregateOrder::default(),
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(0.0..1.0).contains(&self.brand_share_threshold) {
            return Err(ConfigValidationError::InvalidThreshold(
                self.brand_share_threshold,
            ));
        }

        if self.bounds.price_min > self.bounds.price_max {
            return Err(ConfigValidationError::EmptyRange {
                field: "price".to_string(),
                min: self.bounds.price_min,
                max: self.bounds.price_max,
            });
        }

        if self.bounds.registration_year_min > self.bounds.registration_year_max {
            return Err(ConfigValidationError::EmptyRange {
                field: "registration_year".to_string(),
                min: self.bounds.registration_year_min,
                max: self.bounds.registration_year_max,
            });
        }

        if self.encoding.trim().is_empty() {
            return Err(ConfigValidationError::MissingEncoding);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid brand share threshold: {0} (must be in [0.0, 1.0))")]
    InvalidThreshold(f64),

    #[error("Empty range for '{field}': {min} > {max}")]
    EmptyRange { field: String, min: i64, max: i64 },

    #[error("Encoding label must not be empty")]
    MissingEncoding,
}

/// Builder for [`PipelineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    input_path: Option<PathBuf>,
    encoding: Option<String>,
    bounds: Option<RangeBounds>,
    brand_share_threshold: Option<f64>,
    sort_by: Option<AggregateOrder>,
}

impl PipelineConfigBuilder {
    /// Set the CSV file to load.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the encoding label of the input file.
    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }

    /// Replace the range filter bounds.
    pub fn bounds(mut self, bounds: RangeBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Set the minimum brand share (exclusive).
    pub fn brand_share_threshold(mut self, threshold: f64) -> Self {
        self.brand_share_threshold = Some(threshold);
        self
    }

    /// Set the ordering of the aggregate table.
    pub fn sort_by(mut self, order: AggregateOrder) -> Self {
        self.sort_by = Some(order);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<PipelineConfig, ConfigValidationError> {
        let config = PipelineConfig {
            input_path: self
                .input_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH)),
            encoding: self
                .encoding
                .unwrap_or_else(|| DEFAULT_ENCODING.to_string()),
            bounds: self.bounds.unwrap_or_default(),
            brand_share_threshold: self.brand_share_threshold.unwrap_or(BRAND_SHARE_THRESHOLD),
            sort_by: self.sort_by.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}
