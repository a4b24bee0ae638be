//! CSV loading with an explicit single-byte encoding.
//!
//! Polars only reads UTF-8, so the file is decoded up front with
//! `encoding_rs` and the decoded text is handed to the CSV reader. Every
//! column is read as text: the header comes through exactly as written and
//! numeric coercion stays an explicit pipeline stage.

use crate::error::{AnalysisError, Result, ResultExt};
use crate::schema::SOURCE_COLUMNS;
use encoding_rs::Encoding;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load a listings CSV from disk.
///
/// # Errors
///
/// - [`AnalysisError::Io`] if the file is missing or unreadable
/// - [`AnalysisError::UnsupportedEncoding`] if `encoding` is not a known label
/// - [`AnalysisError::Decoding`] if the bytes are invalid in that encoding
pub fn load_listings(path: impl AsRef<Path>, encoding: &str) -> Result<DataFrame> {
    let path = path.as_ref();
    info!("Loading listings from: {}", path.display());

    let bytes =
        std::fs::read(path).context(format!("Failed to read {}", path.display()))?;
    debug!("Read {} bytes", bytes.len());

    load_listings_from_bytes(&bytes, encoding)
}

/// Load a listings CSV already held in memory.
pub fn load_listings_from_bytes(bytes: &[u8], encoding: &str) -> Result<DataFrame> {
    let text = decode(bytes, encoding)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()
        .context("Failed to parse CSV")?;

    info!("Loaded {} rows x {} columns", df.height(), df.width());

    let missing: Vec<&str> = SOURCE_COLUMNS
        .iter()
        .copied()
        .filter(|name| df.get_column_index(name).is_none())
        .collect();
    if !missing.is_empty() {
        warn!("Header is missing expected columns: {:?}", missing);
    }

    Ok(df)
}

/// Decode raw bytes with the encoding named by a WHATWG label.
///
/// `latin-1` and `iso-8859-1` resolve to windows-1252, which maps every byte.
pub fn decode(bytes: &[u8], label: &str) -> Result<String> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| AnalysisError::UnsupportedEncoding(label.to_string()))?;
    debug!("Decoding input as {}", encoding.name());

    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| AnalysisError::Decoding {
            encoding: encoding.name().to_string(),
        })
}
