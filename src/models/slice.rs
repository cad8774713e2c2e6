//! Resolved slice model
//!
//! One row per country present in both target years of the resolved
//! scenario/sex/age-group slice. Built once per source load and shared
//! read-only afterwards.

use serde::Serialize;

use crate::models::LabelValue;

/// The labels the slice resolver picked for the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SliceLabels {
    /// Label representing the target scenario
    pub scenario: LabelValue,
    /// Label representing the youth age group
    pub age_group: LabelValue,
}

/// Near-year and far-year metric for one country
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliceRow {
    pub country_code: String,
    pub near_value: f64,
    pub far_value: f64,
}

/// Inner join of the near-year and far-year subsets on country code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSliceTable {
    /// Year of the baseline values
    pub near_year: i64,
    /// Year of the projected values
    pub far_year: i64,
    rows: Vec<SliceRow>,
}

impl ResolvedSliceTable {
    /// Create a table from already-joined rows
    #[must_use]
    pub fn new(near_year: i64, far_year: i64, rows: Vec<SliceRow>) -> Self {
        Self {
            near_year,
            far_year,
            rows,
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[SliceRow] {
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

    /// Look up a country's row
    #[must_use]
    pub fn get(&self, country_code: &str) -> Option<&SliceRow> {
        self.rows.iter().find(|row| row.country_code == country_code)
    }

    /// Country codes in table order
    pub fn country_codes(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.country_code.as_str())
    }

    pub fn near_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|row| row.near_value)
    }

    pub fn far_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|row| row.far_value)
    }
}

/// Everything derived from one load of the projection source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionData {
    pub labels: SliceLabels,
    /// The sex value the slice was filtered on
    pub sex_label: String,
    pub table: ResolvedSliceTable,
}
