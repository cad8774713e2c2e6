//! Tests for projection extraction

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::utils::{int, raw_table, text, youth_rows};
use projection_explorer::models::SliceLabels;
use projection_explorer::{
    ColumnNames, ExplorerError, ExtractionError, RawTable, SliceQuery, extract,
};

fn labels() -> SliceLabels {
    SliceLabels {
        scenario: int(1),
        age_group: text("15-24"),
    }
}

fn query() -> SliceQuery {
    SliceQuery::new("Both", 2025, 2035)
}

#[test]
fn test_join_keeps_countries_present_in_both_years() {
    let table = raw_table(&youth_rows(&[
        ("A", 2025, 1.0),
        ("B", 2025, 2.0),
        ("C", 2025, 3.0),
        ("B", 2035, 20.0),
        ("C", 2035, 30.0),
        ("D", 2035, 40.0),
    ]));
    let resolved = extract(&table, &labels(), &query()).unwrap();

    let countries: Vec<&str> = resolved.country_codes().collect();
    assert_eq!(countries, vec!["B", "C"]);
    let b = resolved.get("B").unwrap();
    assert_eq!((b.near_value, b.far_value), (2.0, 20.0));
    let c = resolved.get("C").unwrap();
    assert_eq!((c.near_value, c.far_value), (3.0, 30.0));
}

#[test]
fn test_other_slices_are_ignored() {
    let mut rows = youth_rows(&[("A", 2025, 5.0), ("A", 2035, 6.0)]);
    rows.push(("A", int(2), "Both", text("15-24"), 2035, 99.0));
    rows.push(("A", int(1), "Female", text("15-24"), 2035, 98.0));
    rows.push(("A", int(1), "Both", text("25-64"), 2035, 97.0));
    let table = raw_table(&rows);

    let resolved = extract(&table, &labels(), &query()).unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved.get("A").unwrap().far_value, 6.0);
}

#[test]
fn test_missing_year_lists_available_years() {
    let table = raw_table(&youth_rows(&[("A", 2020, 5.0), ("A", 2030, 6.0)]));
    let err = extract(&table, &labels(), &query()).unwrap_err();
    match err {
        ExplorerError::Extraction(ExtractionError::MissingYears { available, .. }) => {
            assert_eq!(available, vec![2020, 2030]);
        }
        other => panic!("expected MissingYears, got {other:?}"),
    }
}

#[test]
fn test_no_overlap_is_an_error() {
    let table = raw_table(&youth_rows(&[("A", 2025, 5.0), ("B", 2035, 6.0)]));
    let err = extract(&table, &labels(), &query()).unwrap_err();
    assert!(matches!(
        err,
        ExplorerError::Extraction(ExtractionError::NoOverlap {
            near_year: 2025,
            far_year: 2035
        })
    ));
}

#[test]
fn test_duplicate_country_year_is_rejected() {
    let table = raw_table(&youth_rows(&[
        ("A", 2025, 5.0),
        ("A", 2025, 5.1),
        ("A", 2035, 6.0),
    ]));
    let err = extract(&table, &labels(), &query()).unwrap_err();
    assert!(matches!(
        err,
        ExplorerError::Extraction(ExtractionError::DuplicateCountryYear { ref country, year: 2025 })
            if country == "A"
    ));
}

#[test]
fn test_custom_sex_label() {
    let rows = vec![
        ("A", int(1), "both", text("15-24"), 2025, 5.0),
        ("A", int(1), "both", text("15-24"), 2035, 6.0),
    ];
    let table = raw_table(&rows);
    assert!(extract(&table, &labels(), &query()).is_err());
    let resolved = extract(&table, &labels(), &SliceQuery::new("both", 2025, 2035)).unwrap();
    assert_eq!(resolved.len(), 1);
}

/// Youth slice rows that may lack a country code or a metric value
fn sparse_table(rows: &[(Option<&str>, i64, Option<f64>)]) -> RawTable {
    let n = rows.len();
    let arrays: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(rows.iter().map(|r| r.0).collect::<Vec<_>>())),
        Arc::new(Int64Array::from(vec![1_i64; n])),
        Arc::new(StringArray::from(vec!["Both"; n])),
        Arc::new(StringArray::from(vec!["15-24"; n])),
        Arc::new(Int64Array::from(rows.iter().map(|r| r.1).collect::<Vec<_>>())),
        Arc::new(Float64Array::from(rows.iter().map(|r| r.2).collect::<Vec<_>>())),
    ];
    let columns = ColumnNames::default();
    let fields: Vec<Field> = columns
        .all()
        .iter()
        .zip(&arrays)
        .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
        .collect();
    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).unwrap();
    RawTable::from_batch(&batch, &columns).unwrap()
}

#[test]
fn test_rows_missing_country_or_value_are_dropped() {
    let table = sparse_table(&[
        (Some("D"), 2025, Some(4.0)),
        (None, 2025, Some(1.0)),
        (Some("B"), 2025, Some(6.0)),
        (Some("C"), 2025, None),
        (Some("A"), 2025, Some(5.0)),
        (Some("A"), 2035, Some(9.0)),
        (Some("C"), 2035, Some(7.0)),
        (None, 2035, Some(2.0)),
        (Some("B"), 2035, Some(8.0)),
        (Some("D"), 2035, None),
    ]);
    let resolved = extract(&table, &labels(), &query()).unwrap();

    let countries: Vec<&str> = resolved.country_codes().collect();
    assert_eq!(countries, vec!["B", "A"]);
    let b = resolved.get("B").unwrap();
    assert_eq!((b.near_value, b.far_value), (6.0, 8.0));
    let a = resolved.get("A").unwrap();
    assert_eq!((a.near_value, a.far_value), (5.0, 9.0));
}

#[test]
fn test_only_incomplete_rows_leave_no_overlap() {
    let table = sparse_table(&[(Some("A"), 2025, None), (Some("A"), 2035, Some(6.0))]);
    let err = extract(&table, &labels(), &query()).unwrap_err();
    assert!(matches!(
        err,
        ExplorerError::Extraction(ExtractionError::NoOverlap { .. })
    ));
}
