//! Custom error types for the EDA library.
//!
//! Malformed input (ragged or duplicated columns, a missing-value report that
//! does not match its summary) is surfaced through [`EdaError`]. Degenerate
//! input such as zero rows or all-missing columns is not an error.
//!
//! Errors are serializable so a caller can hand them to a JSON consumer.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for dataset analysis.
#[derive(Error, Debug)]
pub enum EdaError {
    /// Columns of the table do not all have the same length.
    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// The same column name appears more than once.
    #[error("Column '{0}' appears more than once")]
    DuplicateColumn(String),

    /// A summary and a missing-value report describe different columns, or
    /// the report lists a column more than once.
    #[error("Column '{column}' does not match between the summary and the missing-value report")]
    ColumnMismatch { column: String },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<EdaError>,
    },
}

impl EdaError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        EdaError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code for programmatic handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::RaggedColumns { .. } => "RAGGED_COLUMNS",
            Self::DuplicateColumn(_) => "DUPLICATE_COLUMN",
            Self::ColumnMismatch { .. } => "COLUMN_MISMATCH",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error was caused by the shape or naming of the input table.
    pub fn is_malformed_input(&self) -> bool {
        match self {
            Self::RaggedColumns { .. } | Self::DuplicateColumn(_) | Self::ColumnMismatch { .. } => {
                true
            }
            Self::WithContext { source, .. } => source.is_malformed_input(),
            _ => false,
        }
    }
}

impl From<crate::config::ConfigValidationError> for EdaError {
    fn from(err: crate::config::ConfigValidationError) -> Self {
        EdaError::InvalidConfig(err.to_string())
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for EdaError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("EdaError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, EdaError>;

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
        self.map_err(|e| EdaError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        let err = EdaError::RaggedColumns {
            column: "b".to_string(),
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.error_code(), "RAGGED_COLUMNS");
        assert_eq!(
            EdaError::ColumnMismatch {
                column: "test".to_string()
            }
            .error_code(),
            "COLUMN_MISMATCH"
        );
    }

    #[test]
    fn test_ragged_message_names_column() {
        let err = EdaError::RaggedColumns {
            column: "height".to_string(),
            expected: 4,
            actual: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("height"));
        assert!(msg.contains('4'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_is_malformed_input() {
        assert!(EdaError::DuplicateColumn("a".to_string()).is_malformed_input());
        assert!(
            EdaError::ColumnMismatch {
                column: "a".to_string()
            }
            .is_malformed_input()
        );
        assert!(!EdaError::InvalidConfig("bad".to_string()).is_malformed_input());
    }

    #[test]
    fn test_error_serialization() {
        let error = EdaError::DuplicateColumn("Age".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("DUPLICATE_COLUMN"));
        assert!(json.contains("Age"));
    }

    #[test]
    fn test_with_context() {
        let error = EdaError::DuplicateColumn("id".to_string()).with_context("While building table");
        assert!(error.to_string().contains("While building table"));
        // context keeps the original code and classification
        assert_eq!(error.error_code(), "DUPLICATE_COLUMN");
        assert!(error.is_malformed_input());
    }
}
