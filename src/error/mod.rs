//! Error handling for the projection explorer.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use itertools::Itertools;
use parquet::errors::ParquetError;

use crate::models::LabelValue;

/// Renders observed label values as `[a, b, c]` for diagnostics
fn format_observed(values: &[LabelValue]) -> String {
    format!("[{}]", values.iter().map(LabelValue::to_debug_string).join(", "))
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" ({})", p.display()))
        .unwrap_or_default()
}

/// A scenario or age-group label could not be detected from the distinct
/// categorical values present in the source
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    /// None of the scenario rules matched
    #[error("scenario label not found; unique values: {}", format_observed(.observed))]
    ScenarioNotFound {
        /// Distinct scenario values seen in the source, in encounter order
        observed: Vec<LabelValue>,
    },

    /// None of the age-group rules matched
    #[error("youth age-group label not found; unique values: {}", format_observed(.observed))]
    AgeGroupNotFound {
        /// Distinct age-group values seen in the source, in encounter order
        observed: Vec<LabelValue>,
    },
}

impl ResolutionError {
    /// The distinct values that were inspected before giving up
    #[must_use]
    pub fn observed(&self) -> &[LabelValue] {
        match self {
            Self::ScenarioNotFound { observed } | Self::AgeGroupNotFound { observed } => observed,
        }
    }
}

/// The resolved slice cannot produce a comparable near/far table
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    /// One or both target years are absent from the filtered slice
    #[error(
        "expected years {near_year} and {far_year} not found in the resolved slice; \
         available years: {available:?}"
    )]
    MissingYears {
        near_year: i64,
        far_year: i64,
        /// Sorted distinct years present in the slice
        available: Vec<i64>,
    },

    /// The inner join between the two years produced no rows
    #[error("no overlapping countries for {near_year} and {far_year} in the resolved slice")]
    NoOverlap { near_year: i64, far_year: i64 },

    /// A country appears more than once for the same year within the slice
    #[error("country '{country}' has more than one row for year {year} in the resolved slice")]
    DuplicateCountryYear { country: String, year: i64 },
}

/// Crate-level error type
#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// IO failure, optionally tied to a path
    #[error("IO error{}: {message}", path_suffix(.path))]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<io::Error>,
    },

    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configured column is absent from the source
    #[error("Column '{column}' not found")]
    ColumnNotFound { column: String },

    /// A column has a type the loader cannot normalize
    #[error("Column '{column}' has unsupported type: {detail}")]
    ColumnType { column: String, detail: String },

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid delta {value}: {reason}")]
    InvalidDelta { value: f64, reason: String },

    #[error("Filter error: {0}")]
    Filter(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl ExplorerError {
    /// Create an IO error without an underlying source
    pub fn io_error(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Create an IO error wrapping the original failure
    pub fn io_error_with_source(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            source: Some(source),
        }
    }

    /// Attach a path to an IO error; other variants are returned unchanged
    #[must_use]
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Io {
                message, source, ..
            } => Self::Io {
                message,
                path: Some(path.into()),
                source,
            },
            other => other,
        }
    }

    pub fn filter_error(message: impl Into<String>) -> Self {
        Self::Filter(message.into())
    }

    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }
}

impl From<io::Error> for ExplorerError {
    fn from(error: io::Error) -> Self {
        Self::io_error_with_source(error.to_string(), error)
    }
}

/// Result type for explorer operations
pub type Result<T> = std::result::Result<T, ExplorerError>;
