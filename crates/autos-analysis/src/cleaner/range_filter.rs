//! Inclusive range filtering on price and registration year.

use crate::config::RangeBounds;
use crate::error::Result;
use crate::schema::{PRICE_COLUMN, REGISTRATION_YEAR_COLUMN};
use crate::utils::require_column;
use polars::prelude::*;
use tracing::debug;

/// Keep rows whose price and registration year both fall inside `bounds`.
///
/// Rows failing either predicate are dropped without being reported
/// individually. Both columns must already be integers.
pub fn filter_ranges(df: &DataFrame, bounds: &RangeBounds) -> Result<DataFrame> {
    require_column(df, PRICE_COLUMN)?;
    require_column(df, REGISTRATION_YEAR_COLUMN)?;

    let in_price_range = col(PRICE_COLUMN)
        .gt_eq(lit(bounds.price_min))
        .and(col(PRICE_COLUMN).lt_eq(lit(bounds.price_max)));
    let in_year_range = col(REGISTRATION_YEAR_COLUMN)
        .gt_eq(lit(bounds.registration_year_min))
        .and(col(REGISTRATION_YEAR_COLUMN).lt_eq(lit(bounds.registration_year_max)));

    let out = df
        .clone()
        .lazy()
        .filter(in_price_range.and(in_year_range))
        .collect()?;

    debug!(
        "Range filter kept {} of {} rows (price {:?}, year {:?})",
        out.height(),
        df.height(),
        bounds.price(),
        bounds.registration_year()
    );

    Ok(out)
}
