//! Projection table loading
//!
//! Reads the country-level projection table from CSV or Parquet and
//! normalizes it to a canonical schema: text country and sex columns,
//! `Int64`/`Utf8` label columns, `Int64` years and `Float64` metric values.

use std::io::Seek;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::array::{ArrayRef, Int64Array};
use arrow::compute::concat_batches;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use regex::Regex;

use crate::config::{ColumnNames, ExplorerConfig};
use crate::error::util::safe_open_file;
use crate::error::{ExplorerError, Result};
use crate::models::LabelValue;
use crate::utils::arrow::{
    downcast_array, get_column_by_name, labels, normalize_label_column, strict_cast,
};
use crate::utils::logging::{log_source_loaded, log_source_opening};

/// The projection source, normalized and held in a single record batch
#[derive(Debug, Clone)]
pub struct RawTable {
    batch: RecordBatch,
    columns: ColumnNames,
}

impl RawTable {
    /// Normalize an in-memory batch
    ///
    /// Columns other than the six configured ones are dropped.
    pub fn from_batch(batch: &RecordBatch, columns: &ColumnNames) -> Result<Self> {
        let country = strict_cast(
            &get_column_by_name(batch, &columns.country)?,
            &columns.country,
            &DataType::Utf8,
        )?;
        let scenario = normalize_label_column(
            &get_column_by_name(batch, &columns.scenario)?,
            &columns.scenario,
        )?;
        let sex = strict_cast(
            &get_column_by_name(batch, &columns.sex)?,
            &columns.sex,
            &DataType::Utf8,
        )?;
        let age = normalize_label_column(&get_column_by_name(batch, &columns.age)?, &columns.age)?;
        let year = strict_cast(
            &get_column_by_name(batch, &columns.year)?,
            &columns.year,
            &DataType::Int64,
        )?;
        let value = strict_cast(
            &get_column_by_name(batch, &columns.value)?,
            &columns.value,
            &DataType::Float64,
        )?;

        let arrays: Vec<ArrayRef> = vec![country, scenario, sex, age, year, value];
        let fields: Vec<Field> = columns
            .all()
            .iter()
            .zip(&arrays)
            .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
            .collect();

        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?;
        Ok(Self {
            batch,
            columns: columns.clone(),
        })
    }

    #[must_use]
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    #[must_use]
    pub fn columns(&self) -> &ColumnNames {
        &self.columns
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Distinct non-null values of a label column, in first-encounter order
    pub fn distinct_labels(&self, column: &str) -> Result<Vec<LabelValue>> {
        let array = get_column_by_name(&self.batch, column)?;
        Ok(labels(&array, column)?.into_iter().flatten().unique().collect())
    }

    /// Distinct scenario values
    pub fn scenario_values(&self) -> Result<Vec<LabelValue>> {
        self.distinct_labels(&self.columns.scenario)
    }

    /// Distinct age-group values
    pub fn age_values(&self) -> Result<Vec<LabelValue>> {
        self.distinct_labels(&self.columns.age)
    }
}

/// Sorted distinct years in a normalized batch
pub fn distinct_years(batch: &RecordBatch, year_column: &str) -> Result<Vec<i64>> {
    let array = get_column_by_name(batch, year_column)?;
    let years = downcast_array::<Int64Array>(&array, year_column, "Int64")?;
    Ok(years.iter().flatten().sorted_unstable().dedup().collect())
}

/// Load and normalize the projection table at `path`
pub fn load_table(path: &Path, config: &ExplorerConfig) -> Result<RawTable> {
    let start = Instant::now();

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let (schema, batches) = match extension.as_deref() {
        Some("csv") => {
            log_source_opening(path, "CSV");
            read_csv(path, config.csv_batch_size)?
        }
        Some("parquet") => {
            log_source_opening(path, "Parquet");
            read_parquet(path)?
        }
        other => {
            return Err(ExplorerError::UnsupportedFormat(format!(
                "{} (extension {:?}; expected csv or parquet)",
                path.display(),
                other.unwrap_or("")
            )));
        }
    };

    let combined = concat_batches(&schema, &batches)?;
    let table = RawTable::from_batch(&combined, &config.columns)?;

    log_source_loaded(path, table.num_rows(), batches.len(), start.elapsed());
    Ok(table)
}

/// Cell spellings read as missing values
///
/// The empty cell plus the usual spreadsheet and dataframe markers (`NA`,
/// `N/A`, `NaN`, `null`, `None`, `#N/A`, ...).
pub const CSV_NULL_PATTERN: &str = concat!(
    r"^(|#N/A|#N/A N/A|#NA|-1\.#IND|-1\.#QNAN|-NaN|-nan|1\.#IND|1\.#QNAN",
    r"|<NA>|N/A|NA|NULL|NaN|None|n/a|nan|null)$",
);

fn csv_null_regex() -> Result<Regex> {
    Regex::new(CSV_NULL_PATTERN)
        .map_err(|e| ExplorerError::InvalidOperation(format!("invalid CSV null pattern: {e}")))
}

/// Read a CSV file with a header row, inferring column types from the whole file
///
/// Cells matching [`CSV_NULL_PATTERN`] are nulls, both for inference and
/// for reading.
pub fn read_csv(path: &Path, batch_size: usize) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let mut file = safe_open_file(path, "reading projection CSV")?;
    let null_regex = csv_null_regex()?;

    let format = Format::default()
        .with_header(true)
        .with_null_regex(null_regex.clone());
    let (schema, records) = format.infer_schema(&mut file, None)?;
    log::debug!(
        "Inferred CSV schema from {records} records: {:?}",
        schema
            .fields()
            .iter()
            .map(|f| format!("{}: {}", f.name(), f.data_type()))
            .collect::<Vec<_>>()
    );
    file.rewind().map_err(|e| {
        ExplorerError::io_error_with_source("Failed to rewind CSV file", e).with_path(path)
    })?;

    let schema = Arc::new(schema);
    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .with_null_regex(null_regex)
        .with_batch_size(batch_size)
        .build(file)?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((schema, batches))
}

/// Read a parquet file into Arrow record batches
pub fn read_parquet(path: &Path) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let file = safe_open_file(path, "reading projection parquet file")?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((schema, batches))
}
