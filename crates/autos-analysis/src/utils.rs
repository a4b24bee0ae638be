//! Shared DataFrame helpers.

use crate::error::{AnalysisError, Result};
use polars::prelude::*;

/// Owned column names, in table order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|s| s.to_string()).collect()
}

/// Check if a column exists.
#[inline]
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_index(name).is_some()
}

/// Borrow a column as a Series, mapping a missing column to
/// [`AnalysisError::ColumnNotFound`].
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    if !has_column(df, name) {
        return Err(AnalysisError::ColumnNotFound(name.to_string()));
    }
    Ok(df.column(name)?.as_materialized_series())
}

/// Borrow a text column.
pub fn string_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked> {
    Ok(require_column(df, name)?.str()?)
}

/// Borrow an integer column.
pub fn int_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Int64Chunked> {
    Ok(require_column(df, name)?.i64()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_names_and_presence() {
        let df = df!("brand" => ["audi"], "price" => [1i64]).unwrap();
        assert_eq!(column_names(&df), vec!["brand", "price"]);
        assert!(has_column(&df, "brand"));
        assert!(!has_column(&df, "model"));
    }

    #[test]
    fn test_require_column_missing() {
        let df = df!("brand" => ["audi"]).unwrap();
        assert!(matches!(
            require_column(&df, "price").unwrap_err(),
            AnalysisError::ColumnNotFound(name) if name == "price"
        ));
    }

    #[test]
    fn test_typed_accessors() {
        let df = df!("brand" => ["audi", "bmw"], "price" => [100i64, 200]).unwrap();
        assert_eq!(string_column(&df, "brand").unwrap().get(1), Some("bmw"));
        assert_eq!(int_column(&df, "price").unwrap().get(0), Some(100));
        assert!(int_column(&df, "brand").is_err());
    }
}
