//! Text-to-integer coercion for decorated numeric fields.

use crate::error::{AnalysisError, Result};
use crate::schema::{DECORATED_FIELDS, INTEGER_FIELDS, THOUSANDS_SEPARATOR};
use crate::utils::{has_column, require_column};
use polars::prelude::*;
use tracing::debug;

/// Parse text such as `"$1,234"` or `"150,000km"` as an integer.
///
/// The decoration is removed from either end of the trimmed text, then
/// thousands separators are removed. Returns `None` if anything other
/// than an optional sign and digits remains.
pub fn parse_decorated_integer(text: &str, decoration: &str) -> Option<i64> {
    let trimmed = text.trim();
    let stripped = trimmed.strip_prefix(decoration).unwrap_or(trimmed);
    let stripped = stripped.strip_suffix(decoration).unwrap_or(stripped);

    let digits: String = stripped
        .chars()
        .filter(|c| *c != THOUSANDS_SEPARATOR)
        .collect();

    digits.parse::<i64>().ok()
}

/// Convert one text column to `Int64`, failing on the first bad value.
///
/// Columns that already hold integers are cast without parsing.
pub(crate) fn coerce_column(df: &DataFrame, column: &str, decoration: &str) -> Result<Series> {
    let series = require_column(df, column)?;

    if series.dtype().is_integer() {
        return Ok(series.cast(&DataType::Int64)?);
    }

    let text = series.str()?;
    let mut values: Vec<i64> = Vec::with_capacity(text.len());

    for (row, opt_val) in text.into_iter().enumerate() {
        let parsed = opt_val.and_then(|val| parse_decorated_integer(val, decoration));
        match parsed {
            Some(value) => values.push(value),
            None => {
                return Err(AnalysisError::CoercionFailed {
                    column: column.to_string(),
                    row,
                    value: opt_val.map(str::to_string),
                });
            }
        }
    }

    Ok(Series::new(series.name().clone(), values))
}

/// Coerce the decorated fields and the plain integer fields to `Int64`.
///
/// Decorated fields must be present. Plain integer fields are converted
/// when present. Any null or non-numeric residue aborts the whole stage.
pub fn coerce_fields(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();

    for field in DECORATED_FIELDS {
        let coerced = coerce_column(&out, field.column, field.decoration)?;
        out.replace(field.column, coerced)?;
        debug!("Coerced '{}' (stripped {:?})", field.column, field.decoration);
    }

    for column in INTEGER_FIELDS {
        if !has_column(&out, column) {
            continue;
        }
        let coerced = coerce_column(&out, column, "")?;
        out.replace(column, coerced)?;
        debug!("Coerced '{}'", column);
    }

    Ok(out)
}
