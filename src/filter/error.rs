//! Error handling utilities for the filter module
//!
//! Consistent constructors for filter failures.

use crate::error::{ExplorerError, Result};

/// Create a filter error with the given message
pub fn filter_err<T>(message: impl AsRef<str>) -> Result<T> {
    Err(ExplorerError::filter_error(message.as_ref()))
}

/// Create a column not found error
pub fn column_not_found<T>(column_name: &str) -> Result<T> {
    Err(ExplorerError::column_not_found(column_name))
}

/// Create a column type error
///
/// # Arguments
/// * `column_name` - The name of the column
/// * `expected_type` - The expected type
pub fn column_type_error<T>(column_name: &str, expected_type: &str) -> Result<T> {
    filter_err(format!(
        "Column '{column_name}' is not a {expected_type} array"
    ))
}
