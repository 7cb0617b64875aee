use std::path::PathBuf;

use thiserror::Error;

use super::model::ColumnKind;

/// Load-time failure. Fatal: no partial table is ever returned.
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    #[error("Row {row}: {message}")]
    InvalidRow { row: usize, message: String },
}

impl DataSourceError {
    pub(crate) fn row(row: usize, message: impl Into<String>) -> Self {
        DataSourceError::InvalidRow {
            row,
            message: message.into(),
        }
    }
}

/// Request-time contract violation. A correctly wired caller never sees
/// one; an empty result is not an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregateError {
    #[error("Column not found: '{0}'")]
    ColumnNotFound(String),

    #[error("Column '{column}' is {found}, expected numeric")]
    TypeMismatch { column: String, found: ColumnKind },

    #[error("Result limit must be a positive integer")]
    InvalidLimit,

    #[error("Invalid request: {0}")]
    InvalidRequest(&'static str),
}
