//! Field extraction utilities for Arrow record batches
//!
//! Typed value extraction from normalized columns.

use arrow::array::{Array, ArrayRef, Int64Array, StringArray};
use arrow::datatypes::DataType;

use crate::error::{ExplorerError, Result};
use crate::models::LabelValue;
use crate::utils::arrow::array_utils::downcast_array;

/// Extract a label value from a normalized label column
///
/// # Returns
///
/// * `Ok(Some(LabelValue))` - The value at `row`
/// * `Ok(None)` - If the cell is null or `row` is out of range
/// * `Err` - If the column is neither `Int64` nor `Utf8`
pub fn label_at(array: &ArrayRef, row: usize, column_name: &str) -> Result<Option<LabelValue>> {
    if row >= array.len() || array.is_null(row) {
        return Ok(None);
    }

    match array.data_type() {
        DataType::Int64 => {
            let ints = downcast_array::<Int64Array>(array, column_name, "Int64")?;
            Ok(Some(LabelValue::Int(ints.value(row))))
        }
        DataType::Utf8 => {
            let text = downcast_array::<StringArray>(array, column_name, "Utf8")?;
            Ok(Some(LabelValue::Text(text.value(row).to_string())))
        }
        other => Err(ExplorerError::ColumnType {
            column: column_name.to_string(),
            detail: format!("label column must be Int64 or Utf8, found {other}"),
        }),
    }
}

/// Extract every label of a normalized label column, in row order
pub fn labels(array: &ArrayRef, column_name: &str) -> Result<Vec<Option<LabelValue>>> {
    (0..array.len())
        .map(|row| label_at(array, row, column_name))
        .collect()
}
