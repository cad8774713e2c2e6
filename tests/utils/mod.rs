use std::io::Write;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use projection_explorer::models::SliceRow;
use projection_explorer::{ColumnNames, LabelValue, RawTable, ResolvedSliceTable};

/// One source row: (country, scenario, sex, age, year, value)
pub type Row = (&'static str, LabelValue, &'static str, LabelValue, i64, f64);

/// Header of the projection CSV fixtures
pub const CSV_HEADER: &str = "iso3,scenario,sex,age,year,mys";

/// Shorthand for a text label
#[must_use]
pub fn text(value: &str) -> LabelValue {
    LabelValue::from(value)
}

/// Shorthand for an integer label
#[must_use]
pub fn int(value: i64) -> LabelValue {
    LabelValue::Int(value)
}

fn label_array(values: Vec<LabelValue>) -> ArrayRef {
    if values.iter().all(|v| matches!(v, LabelValue::Int(_))) {
        let ints: Vec<i64> = values
            .iter()
            .map(|v| match v {
                LabelValue::Int(n) => *n,
                LabelValue::Text(_) => unreachable!(),
            })
            .collect();
        Arc::new(Int64Array::from(ints))
    } else {
        let strings: Vec<String> = values.iter().map(ToString::to_string).collect();
        Arc::new(StringArray::from(strings))
    }
}

/// Build an in-memory batch with the default column names
#[must_use]
pub fn batch(rows: &[Row]) -> RecordBatch {
    let country: ArrayRef = Arc::new(StringArray::from(
        rows.iter().map(|r| r.0).collect::<Vec<_>>(),
    ));
    let scenario = label_array(rows.iter().map(|r| r.1.clone()).collect());
    let sex: ArrayRef = Arc::new(StringArray::from(
        rows.iter().map(|r| r.2).collect::<Vec<_>>(),
    ));
    let age = label_array(rows.iter().map(|r| r.3.clone()).collect());
    let year: ArrayRef = Arc::new(Int64Array::from(
        rows.iter().map(|r| r.4).collect::<Vec<_>>(),
    ));
    let value: ArrayRef = Arc::new(Float64Array::from(
        rows.iter().map(|r| r.5).collect::<Vec<_>>(),
    ));

    let columns = ColumnNames::default();
    let arrays = vec![country, scenario, sex, age, year, value];
    let fields: Vec<Field> = columns
        .all()
        .iter()
        .zip(&arrays)
        .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
        .collect();
    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).unwrap()
}

/// Build a normalized raw table from rows
#[must_use]
pub fn raw_table(rows: &[Row]) -> RawTable {
    RawTable::from_batch(&batch(rows), &ColumnNames::default()).unwrap()
}

/// Rows of scenario 1, both sexes, age 15-24 for `(country, year, value)`
#[must_use]
pub fn youth_rows(entries: &[(&'static str, i64, f64)]) -> Vec<Row> {
    entries
        .iter()
        .map(|&(country, year, value)| (country, int(1), "Both", text("15-24"), year, value))
        .collect()
}

/// Write a CSV fixture with the standard header
#[must_use]
pub fn write_csv(body: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "{CSV_HEADER}").unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Build a resolved table directly
#[must_use]
pub fn slice_table(rows: &[(&str, f64, f64)]) -> ResolvedSliceTable {
    ResolvedSliceTable::new(
        2025,
        2035,
        rows.iter()
            .map(|&(country, near_value, far_value)| SliceRow {
                country_code: country.to_string(),
                near_value,
                far_value,
            })
            .collect(),
    )
}

/// Assert two floats are equal within a small tolerance
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
