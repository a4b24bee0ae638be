//! Column renaming and degenerate-column removal.

use crate::error::Result;
use crate::schema::{COLUMN_RENAMES, degenerate_column};
use crate::utils::{column_names, has_column};
use polars::prelude::*;
use tracing::debug;

/// Rename columns to snake case and drop the degenerate columns.
///
/// Source names missing from the table are skipped without complaint.
/// Degenerate columns are dropped under either naming convention, so the
/// function is safe to call on an already-normalized table.
pub fn normalize_schema(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();

    for (from, to) in COLUMN_RENAMES {
        if from == to || !has_column(&out, from) {
            continue;
        }
        out.rename(from, to.into())?;
        debug!("Renamed '{}' -> '{}'", from, to);
    }

    let mut degenerate: Vec<PlSmallStr> = Vec::new();
    for name in column_names(&out) {
        if let Some(column) = degenerate_column(&name) {
            debug!("Dropping '{}': {}", name, column.observation);
            degenerate.push(name.into());
        }
    }

    if !degenerate.is_empty() {
        out = out.drop_many(degenerate);
    }

    Ok(out)
}

/// Rename targets that are absent from a normalized table.
pub fn missing_renamed_columns(df: &DataFrame) -> Vec<&'static str> {
    COLUMN_RENAMES
        .iter()
        .map(|(_, to)| *to)
        .filter(|to| !has_column(df, to))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DEGENERATE_COLUMNS, SOURCE_COLUMNS};
    use pretty_assertions::assert_eq;

    fn source_frame() -> DataFrame {
        let columns: Vec<Column> = SOURCE_COLUMNS
            .iter()
            .map(|name| Column::new((*name).into(), &["x", "y"]))
            .collect();
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn test_every_target_appears_exactly_once() {
        let out = normalize_schema(&source_frame()).unwrap();
        let names = column_names(&out);

        assert_eq!(names.len(), COLUMN_RENAMES.len());
        for (_, to) in COLUMN_RENAMES {
            assert_eq!(names.iter().filter(|n| n.as_str() == to).count(), 1, "{to}");
        }
        assert!(missing_renamed_columns(&out).is_empty());
    }

    #[test]
    fn test_degenerate_columns_removed() {
        let out = normalize_schema(&source_frame()).unwrap();
        for column in DEGENERATE_COLUMNS {
            assert!(!has_column(&out, column.source));
            assert!(!has_column(&out, column.target));
        }
        for name in ["seller", "offer_type", "num_photos"] {
            assert!(!has_column(&out, name));
        }
    }

    #[test]
    fn test_input_not_mutated() {
        let df = source_frame();
        let _ = normalize_schema(&df).unwrap();
        assert_eq!(df.width(), SOURCE_COLUMNS.len());
        assert!(has_column(&df, "offerType"));
    }

    #[test]
    fn test_unknown_and_absent_columns_are_ignored() {
        let df = df!(
            "price" => ["$1"],
            "odometer" => ["5km"],
            "colour" => ["red"],
            "offer_type" => ["Angebot"]
        )
        .unwrap();

        let out = normalize_schema(&df).unwrap();
        assert_eq!(column_names(&out), vec!["price", "odometer_km", "colour"]);
        assert!(missing_renamed_columns(&out).contains(&"brand"));
    }

    #[test]
    fn test_idempotent_on_normalized_table() {
        let once = normalize_schema(&source_frame()).unwrap();
        let twice = normalize_schema(&once).unwrap();
        assert_eq!(column_names(&once), column_names(&twice));
    }
}
