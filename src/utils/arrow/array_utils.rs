//! Utilities for working with Arrow arrays.
//!
//! Column lookup, checked downcasts, and conversion of columns into the
//! canonical types the explorer works with.

use arrow::array::{Array, ArrayRef, Float64Array};
use arrow::compute::{CastOptions, cast_with_options};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use log::debug;

use crate::error::{ExplorerError, Result};

/// Get the column index by name from a record batch
pub fn get_column_index(batch: &RecordBatch, column_name: &str) -> Result<usize> {
    batch
        .schema()
        .index_of(column_name)
        .map_err(|_| ExplorerError::column_not_found(column_name))
}

/// Get a column from a record batch by name
pub fn get_column_by_name(batch: &RecordBatch, column_name: &str) -> Result<ArrayRef> {
    let idx = get_column_index(batch, column_name)?;
    Ok(batch.column(idx).clone())
}

/// Downcast a column to a specific array type with clear error messages
///
/// # Type Parameters
///
/// * `A` - The target array type to downcast to
///
/// # Arguments
///
/// * `array` - The array reference to downcast
/// * `column_name` - The name of the column (for error messages)
/// * `expected_type_name` - A human-readable name of the expected type (for error messages)
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| ExplorerError::ColumnType {
            column: column_name.to_string(),
            detail: format!(
                "expected {expected_type_name}, found {}",
                array.data_type()
            ),
        })
}

/// Whether a type is one of the integer types
#[must_use]
pub fn is_integer(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Cast a column to `target`, failing on values that cannot be represented
///
/// Unlike arrow's default cast, unparseable strings are reported rather than
/// turned into nulls.
pub fn strict_cast(array: &ArrayRef, column_name: &str, target: &DataType) -> Result<ArrayRef> {
    if array.data_type() == target {
        return Ok(array.clone());
    }

    debug!(
        "Converting column '{column_name}' from {} to {target}",
        array.data_type()
    );
    let options = CastOptions {
        safe: false,
        ..Default::default()
    };
    cast_with_options(array, target, &options).map_err(|e| ExplorerError::ColumnType {
        column: column_name.to_string(),
        detail: format!("cannot convert {} to {target}: {e}", array.data_type()),
    })
}

/// Whether every non-null value of a float column is a whole number
fn is_integral_float(array: &ArrayRef, column_name: &str) -> Result<bool> {
    let floats = strict_cast(array, column_name, &DataType::Float64)?;
    let floats = downcast_array::<Float64Array>(&floats, column_name, "Float64")?;
    Ok(floats
        .iter()
        .flatten()
        .all(|v| v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15))
}

/// Normalize a categorical label column
///
/// Integer encodings, including floats that only hold whole numbers (`1.0`),
/// become `Int64`; everything else becomes `Utf8` text.
pub fn normalize_label_column(array: &ArrayRef, column_name: &str) -> Result<ArrayRef> {
    let integral = match array.data_type() {
        data_type if is_integer(data_type) => true,
        DataType::Float16 | DataType::Float32 | DataType::Float64 => {
            is_integral_float(array, column_name)?
        }
        _ => false,
    };
    if integral {
        strict_cast(array, column_name, &DataType::Int64)
    } else {
        strict_cast(array, column_name, &DataType::Utf8)
    }
}
