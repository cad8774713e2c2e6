//! Scenario adjustment
//!
//! Shifts every country's far-year value by a uniform delta and derives the
//! change from the near year. Total over finite deltas; range limits belong
//! to the control surface, not here.

use crate::models::{AdjustedRow, AdjustedView, ResolvedSliceTable};

/// Apply `delta` to the far-year value of every row
#[must_use]
pub fn adjust(table: &ResolvedSliceTable, delta: f64) -> AdjustedView {
    let rows = table
        .rows()
        .iter()
        .map(|row| {
            let far_value_sim = row.far_value + delta;
            AdjustedRow {
                country_code: row.country_code.clone(),
                near_value: row.near_value,
                far_value: row.far_value,
                far_value_sim,
                delta_metric: far_value_sim - row.near_value,
            }
        })
        .collect();

    AdjustedView::new(delta, table.near_year, table.far_year, rows)
}
