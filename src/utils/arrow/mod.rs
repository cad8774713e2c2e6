//! Arrow data handling utilities
//!
//! Helpers for column lookup, type conversion and typed value extraction.

pub mod array_utils;
pub mod extractors;

// Re-export commonly used functions for convenience
pub use array_utils::{
    downcast_array, get_column_by_name, get_column_index, normalize_label_column, strict_cast,
};
pub use extractors::{label_at, labels};
