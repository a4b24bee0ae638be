//! Used-Car Listings Analysis Library
//!
//! Cleans a CSV of used-car listings and summarises price and mileage by
//! brand, built with Rust and Polars.
//!
//! # Overview
//!
//! The pipeline is a fixed sequence of pure stages:
//!
//! - **Loading**: decode the Latin-1 CSV and read every column as text
//! - **Schema Normalization**: snake-case renaming, degenerate-column removal
//! - **Field Coercion**: `"$1,234"` and `"150,000km"` to `Int64`
//! - **Range Filtering**: drop implausible prices and registration years
//! - **Aggregation**: mean price and mean mileage per common brand
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use autos_analysis::{Pipeline, PipelineConfig};
//!
//! let config = PipelineConfig::builder()
//!     .input_path("autos.csv")
//!     .build()?;
//!
//! let result = Pipeline::builder().config(config).build()?.run()?;
//!
//! for brand in &result.brands.brands {
//!     println!("{}: {} ({} km)", brand.brand, brand.mean_price, brand.mean_mileage);
//! }
//! ```
//!
//! Each stage is also available on its own, so a loaded table can be taken
//! through the steps by hand:
//!
//! ```rust,ignore
//! use autos_analysis::{aggregate_by_brand, coerce_fields, filter_ranges, normalize_schema};
//! use autos_analysis::config::{AggregateOrder, RangeBounds};
//!
//! let df = autos_analysis::load_listings("autos.csv", "latin-1")?;
//! let df = normalize_schema(&df)?;
//! let df = coerce_fields(&df)?;
//! let df = filter_ranges(&df, &RangeBounds::default())?;
//! let brands = aggregate_by_brand(&df, 0.05, AggregateOrder::MeanPrice)?;
//! ```

pub mod aggregator;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod reporting;
pub mod schema;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use aggregator::aggregate_by_brand;
pub use cleaner::{coerce_fields, filter_ranges, normalize_schema, parse_decorated_integer};
pub use config::{
    AggregateOrder, ConfigValidationError, PipelineConfig, PipelineConfigBuilder, RangeBounds,
};
pub use error::{AnalysisError, ResultExt};
pub use loader::{load_listings, load_listings_from_bytes};
pub use pipeline::{
    ClosureProgressReporter, Pipeline, PipelineBuilder, PipelineStage, ProgressReporter,
    ProgressUpdate,
};
pub use reporting::{AnalysisReport, ReportGenerator};
pub use types::{AnalysisResult, BrandAggregate, BrandSummary, PipelineSummary, StageRecord};
