//! Row filtering over Arrow record batches
//!
//! A small expression-based filtering layer: expressions evaluate to a
//! boolean mask over a `RecordBatch`, and the mask is applied to every
//! column.

pub mod error;

use arrow::array::{Array, ArrayRef, BooleanArray, Int64Array, Scalar, StringArray};
use arrow::compute::filter as arrow_filter;
use arrow::compute::kernels::cmp::eq;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::{ExplorerError, Result};
use crate::models::LabelValue;
use error::{column_not_found, column_type_error};

/// Represents a filter expression for querying tabular data
#[derive(Debug, Clone)]
pub enum Expr {
    /// Column equals a literal value
    Eq(String, LiteralValue),

    /// Logical AND of expressions; empty is always true
    And(Vec<Expr>),
}

/// Represents a literal value that can be used in filter expressions
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Integer value, compared against `Int64` columns
    Int(i64),

    /// String value, compared against `Utf8` columns
    String(String),
}

impl From<&LabelValue> for LiteralValue {
    fn from(label: &LabelValue) -> Self {
        match label {
            LabelValue::Int(n) => Self::Int(*n),
            LabelValue::Text(s) => Self::String(s.clone()),
        }
    }
}

impl Expr {
    /// Equality on a column
    pub fn eq(column: impl Into<String>, value: impl Into<LiteralValue>) -> Self {
        Self::Eq(column.into(), value.into())
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<LabelValue> for LiteralValue {
    fn from(label: LabelValue) -> Self {
        Self::from(&label)
    }
}

/// Evaluates a filter expression against a record batch
///
/// Null cells never match.
pub fn evaluate_expr(batch: &RecordBatch, expr: &Expr) -> Result<BooleanArray> {
    match expr {
        Expr::And(exprs) => evaluate_and_expression(batch, exprs),
        Expr::Eq(col_name, literal_value) => evaluate_eq_expression(batch, col_name, literal_value),
    }
}

/// Evaluates a logical AND expression
fn evaluate_and_expression(batch: &RecordBatch, exprs: &[Expr]) -> Result<BooleanArray> {
    let Some((first, rest)) = exprs.split_first() else {
        return Ok(BooleanArray::from(vec![true; batch.num_rows()]));
    };

    let mut result = evaluate_expr(batch, first)?;
    for expr in rest {
        let mask = evaluate_expr(batch, expr)?;
        result = arrow::compute::and(&result, &mask)
            .map_err(|e| ExplorerError::filter_error(format!("AND failed: {e}")))?;
    }

    Ok(result)
}

/// Evaluates an equality comparison expression
fn evaluate_eq_expression(
    batch: &RecordBatch,
    col_name: &str,
    literal_value: &LiteralValue,
) -> Result<BooleanArray> {
    let Ok(col_idx) = batch.schema().index_of(col_name) else {
        return column_not_found(col_name);
    };
    let column = batch.column(col_idx);

    match (column.data_type(), literal_value) {
        (DataType::Utf8, LiteralValue::String(s)) => {
            compare_eq(column, StringArray::from(vec![s.as_str()]))
        }
        (DataType::Int64, LiteralValue::Int(n)) => compare_eq(column, Int64Array::from(vec![*n])),
        // An integer label never equals a string cell and vice versa
        (DataType::Utf8, LiteralValue::Int(_)) | (DataType::Int64, LiteralValue::String(_)) => {
            Ok(BooleanArray::from(vec![false; column.len()]))
        }
        (other, LiteralValue::String(_)) => {
            column_type_error(col_name, &format!("Utf8 (found {other})"))
        }
        (other, LiteralValue::Int(_)) => {
            column_type_error(col_name, &format!("Int64 (found {other})"))
        }
    }
}

fn compare_eq<T: Array>(column: &ArrayRef, literal: T) -> Result<BooleanArray> {
    let scalar = Scalar::new(literal);
    let mask = eq(column, &scalar)
        .map_err(|e| ExplorerError::filter_error(format!("equality comparison failed: {e}")))?;
    // A null comparison result means "no match"
    if mask.null_count() == 0 {
        Ok(mask)
    } else {
        Ok(mask.iter().map(|v| Some(v.unwrap_or(false))).collect())
    }
}

/// Filters a record batch based on a boolean mask
pub fn filter_record_batch(batch: &RecordBatch, mask: &BooleanArray) -> Result<RecordBatch> {
    if batch.num_rows() != mask.len() {
        return Err(ExplorerError::filter_error(format!(
            "Mask length ({}) doesn't match batch row count ({})",
            mask.len(),
            batch.num_rows()
        )));
    }

    let filtered_columns: Vec<ArrayRef> = batch
        .columns()
        .iter()
        .map(|col| arrow_filter(col, mask))
        .collect::<std::result::Result<_, _>>()?;

    Ok(RecordBatch::try_new(batch.schema(), filtered_columns)?)
}

/// Evaluate `expr` and keep only the matching rows
pub fn apply_filter(batch: &RecordBatch, expr: &Expr) -> Result<RecordBatch> {
    let mask = evaluate_expr(batch, expr)?;
    let filtered = filter_record_batch(batch, &mask)?;
    log::debug!(
        "Filter {:?} kept {} of {} rows",
        expr,
        filtered.num_rows(),
        batch.num_rows()
    );
    Ok(filtered)
}
