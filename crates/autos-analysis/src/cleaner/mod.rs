//! Cleaning stages applied to the raw listings table.
//!
//! Each stage is a pure function from one table snapshot to the next:
//! - [`normalize_schema`]: snake-case renaming and degenerate-column removal
//! - [`coerce_fields`]: decorated text to `Int64`
//! - [`filter_ranges`]: inclusive price and registration-year bounds

mod converters;
mod normalizer;
mod range_filter;

pub use converters::{coerce_fields, parse_decorated_integer};
pub use normalizer::{missing_renamed_columns, normalize_schema};
pub use range_filter::filter_ranges;
