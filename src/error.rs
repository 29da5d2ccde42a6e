//! Error types for the dataset core.
//!
//! Only [`LoadError`] is fatal. Query problems are reported as
//! [`QueryError`] so callers can tell a rejected request apart from a
//! request that simply matched nothing.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Failure to bring the dataset into memory.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("failed to open dataset file {path}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The extension does not name a supported format.
    #[error("unsupported file extension: .{extension}")]
    UnsupportedFormat { extension: String },

    /// A column every record needs is absent from the header.
    #[error("dataset is missing required column '{column}'")]
    MissingColumn { column: String },

    /// The file does not have the expected overall shape.
    #[error("malformed dataset: {0}")]
    Malformed(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

impl LoadError {
    pub fn file_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileOpen {
            path: path.into(),
            source,
        }
    }

    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }
}

/// A request the query layer refuses to run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("minimum magnitude {min} is greater than maximum {max}")]
    InvertedMagnitudeRange { min: f64, max: f64 },

    #[error("magnitude {value} is outside [0, 10]")]
    MagnitudeOutOfBounds { value: f64 },

    #[error("start date {start} is after end date {end}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },

    #[error("date {date} is outside the test era")]
    DateOutOfBounds { date: NaiveDate },

    /// A search pattern that does not compile.
    #[error("malformed search pattern: {0}")]
    MalformedPattern(String),
}

/// Failure writing a result set out.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
