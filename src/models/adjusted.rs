//! Adjusted view model
//!
//! Per-interaction projection of the resolved slice with the user's delta
//! applied. Never cached.

use serde::Serialize;

/// A resolved slice row extended with the simulated columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustedRow {
    pub country_code: String,
    pub near_value: f64,
    pub far_value: f64,
    /// `far_value + delta`
    pub far_value_sim: f64,
    /// `far_value_sim - near_value`
    pub delta_metric: f64,
}

/// The resolved slice after applying one delta
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustedView {
    /// Delta that produced this view
    pub delta: f64,
    pub near_year: i64,
    pub far_year: i64,
    rows: Vec<AdjustedRow>,
}

impl AdjustedView {
    #[must_use]
    pub fn new(delta: f64, near_year: i64, far_year: i64, rows: Vec<AdjustedRow>) -> Self {
        Self {
            delta,
            near_year,
            far_year,
            rows,
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[AdjustedRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn far_value_sim(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|row| row.far_value_sim)
    }

    pub fn delta_metric(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|row| row.delta_metric)
    }
}
