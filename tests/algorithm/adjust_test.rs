//! Tests for the scenario adjuster and color ranges

use crate::utils::{assert_close, slice_table};
use projection_explorer::{adjust, baseline_color_range};

#[test]
fn test_zero_delta_is_identity() {
    let table = slice_table(&[("A", 4.2, 5.1), ("B", 9.7, 9.3), ("C", 0.0, 1.0)]);
    let view = adjust(&table, 0.0);
    for (row, adjusted) in table.rows().iter().zip(view.rows()) {
        assert_eq!(adjusted.far_value_sim, row.far_value);
        assert_eq!(adjusted.delta_metric, row.far_value - row.near_value);
        assert_eq!(adjusted.country_code, row.country_code);
    }
}

#[test]
fn test_deltas_compose_additively() {
    let table = slice_table(&[("A", 4.2, 5.1), ("B", 9.7, 9.3)]);
    for (d1, d2) in [(0.3, 1.2), (-1.0, 2.5), (4.9, -0.7)] {
        let combined = adjust(&table, d1 + d2);
        let first = adjust(&table, d1);
        for (c, f) in combined.rows().iter().zip(first.rows()) {
            assert_close(c.far_value_sim, f.far_value_sim + d2);
        }
    }
}

#[test]
fn test_no_rows_dropped() {
    let table = slice_table(&[("A", 1.0, 2.0), ("B", 3.0, 4.0), ("C", 5.0, 6.0)]);
    assert_eq!(adjust(&table, 12.0).len(), table.len());
}

#[test]
fn test_baseline_range_independent_of_delta() {
    let table = slice_table(&[("A", 4.0, 6.0), ("B", 8.0, 11.0)]);
    let before = baseline_color_range(&table);
    for delta in [-1.0, 0.0, 2.5, 5.0] {
        let _view = adjust(&table, delta);
        assert_eq!(baseline_color_range(&table), before);
    }
    let range = before.unwrap();
    assert_eq!((range.min, range.max), (4.0, 11.0));
}
