//! Error types for the listings analysis pipeline.
//!
//! Every failure the pipeline can hit is fatal: there is no retry and no
//! partial-result mode. Out-of-range values are not errors, they are
//! filtered out by the range filter.
//!
//! Errors are serializable so the CLI can emit them as JSON alongside the
//! report output.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the analysis pipeline.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The requested character encoding label is not known.
    #[error("Unsupported encoding '{0}'")]
    UnsupportedEncoding(String),

    /// The input bytes are not valid in the requested encoding.
    #[error("Input is not valid {encoding}")]
    Decoding { encoding: String },

    /// A decorated or plain integer field held something other than a number.
    #[error(
        "Failed to coerce column '{column}' at row {row}: '{}' is not an integer",
        .value.as_deref().unwrap_or("<null>")
    )]
    CoercionFailed {
        column: String,
        row: usize,
        value: Option<String>,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<AnalysisError>,
    },
}

impl AnalysisError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        AnalysisError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code for machine-readable output.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::UnsupportedEncoding(_) => "UNSUPPORTED_ENCODING",
            Self::Decoding { .. } => "DECODING_ERROR",
            Self::CoercionFailed { .. } => "COERCION_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Whether this error came from reading or decoding the input file.
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::Io(_) | Self::Decoding { .. } | Self::UnsupportedEncoding(_) => true,
            Self::WithContext { source, .. } => source.is_input_error(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for AnalysisError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AnalysisError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| AnalysisError::Polars(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| AnalysisError::Io(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            AnalysisError::ColumnNotFound("price".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
        assert_eq!(
            AnalysisError::CoercionFailed {
                column: "price".to_string(),
                row: 3,
                value: Some("$1,2a".to_string()),
            }
            .error_code(),
            "COERCION_FAILED"
        );
    }

    #[test]
    fn test_coercion_message_names_row_and_value() {
        let error = AnalysisError::CoercionFailed {
            column: "odometer_km".to_string(),
            row: 7,
            value: Some("lots".to_string()),
        };
        let message = error.to_string();
        assert!(message.contains("odometer_km"));
        assert!(message.contains("row 7"));
        assert!(message.contains("lots"));
    }

    #[test]
    fn test_is_input_error() {
        let io = AnalysisError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io.is_input_error());
        assert!(io.with_context("Loading autos.csv").is_input_error());
        assert!(!AnalysisError::ColumnNotFound("brand".to_string()).is_input_error());
    }

    #[test]
    fn test_error_serialization() {
        let error = AnalysisError::UnsupportedEncoding("klingon".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("UNSUPPORTED_ENCODING"));
        assert!(json.contains("klingon"));
    }

    #[test]
    fn test_with_context() {
        let error = AnalysisError::ColumnNotFound("price".to_string()).with_context("Coercing");
        assert!(error.to_string().contains("Coercing"));
        assert_eq!(error.error_code(), "COLUMN_NOT_FOUND");
    }
}
