//! Projection extraction
//!
//! Filters the raw table to the resolved scenario, sex and age group, splits
//! the slice into the near and far years, and inner-joins the two on country
//! code. Countries missing from either year are dropped, not filled.

use arrow::array::{Float64Array, StringArray};
use arrow::record_batch::RecordBatch;
use log::{debug, info};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::config::ExplorerConfig;
use crate::error::{ExtractionError, Result};
use crate::filter::{Expr, apply_filter};
use crate::loader::{RawTable, distinct_years};
use crate::models::{ResolvedSliceTable, SliceLabels, SliceRow};
use crate::utils::arrow::{downcast_array, get_column_by_name};
use crate::utils::logging::log_dropped_row;

/// Fixed parts of the slice: the sex value and the two compared years
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SliceQuery {
    pub sex_label: String,
    pub near_year: i64,
    pub far_year: i64,
}

impl SliceQuery {
    #[must_use]
    pub fn new(sex_label: impl Into<String>, near_year: i64, far_year: i64) -> Self {
        Self {
            sex_label: sex_label.into(),
            near_year,
            far_year,
        }
    }
}

impl From<&ExplorerConfig> for SliceQuery {
    fn from(config: &ExplorerConfig) -> Self {
        Self::new(config.sex_label.clone(), config.near_year, config.far_year)
    }
}

/// Build the near/far table for the resolved slice
pub fn extract(
    table: &RawTable,
    labels: &SliceLabels,
    query: &SliceQuery,
) -> Result<ResolvedSliceTable> {
    let columns = table.columns();
    let slice_filter = Expr::And(vec![
        Expr::eq(&columns.scenario, &labels.scenario),
        Expr::eq(&columns.sex, query.sex_label.as_str()),
        Expr::eq(&columns.age, &labels.age_group),
    ]);
    let slice = apply_filter(table.batch(), &slice_filter)?;
    debug!(
        "Slice scenario={} sex={} age={} has {} rows",
        labels.scenario,
        query.sex_label,
        labels.age_group,
        slice.num_rows()
    );

    let available = distinct_years(&slice, &columns.year)?;
    if !available.contains(&query.near_year) || !available.contains(&query.far_year) {
        return Err(ExtractionError::MissingYears {
            near_year: query.near_year,
            far_year: query.far_year,
            available,
        }
        .into());
    }

    let near = year_values(table, &slice, query.near_year)?;
    let far = year_values(table, &slice, query.far_year)?;
    let rows = inner_join(near, &far);

    if rows.is_empty() {
        return Err(ExtractionError::NoOverlap {
            near_year: query.near_year,
            far_year: query.far_year,
        }
        .into());
    }

    info!(
        "Joined {} countries present in both {} and {}",
        rows.len(),
        query.near_year,
        query.far_year
    );
    Ok(ResolvedSliceTable::new(query.near_year, query.far_year, rows))
}

/// (country, metric) pairs for one year of the slice, in row order
///
/// Rows with a null country or metric are dropped. A country appearing twice
/// is a data-quality failure.
fn year_values(table: &RawTable, slice: &RecordBatch, year: i64) -> Result<Vec<(String, f64)>> {
    let columns = table.columns();
    let rows = apply_filter(slice, &Expr::eq(&columns.year, year))?;

    let country_array = get_column_by_name(&rows, &columns.country)?;
    let value_array = get_column_by_name(&rows, &columns.value)?;
    let countries = downcast_array::<StringArray>(&country_array, &columns.country, "Utf8")?;
    let values = downcast_array::<Float64Array>(&value_array, &columns.value, "Float64")?;

    let mut seen = FxHashSet::default();
    let mut out = Vec::with_capacity(rows.num_rows());
    for (country, value) in countries.iter().zip(values.iter()) {
        let (Some(country), Some(value)) = (country, value) else {
            log_dropped_row(year, country);
            continue;
        };
        if !seen.insert(country) {
            return Err(ExtractionError::DuplicateCountryYear {
                country: country.to_string(),
                year,
            }
            .into());
        }
        out.push((country.to_string(), value));
    }
    Ok(out)
}

/// Inner join on country code, keeping the near-year order
fn inner_join(near: Vec<(String, f64)>, far: &[(String, f64)]) -> Vec<SliceRow> {
    let far_by_country: FxHashMap<&str, f64> = far
        .iter()
        .map(|(country, value)| (country.as_str(), *value))
        .collect();

    near.into_iter()
        .filter_map(|(country_code, near_value)| {
            far_by_country
                .get(country_code.as_str())
                .map(|&far_value| SliceRow {
                    country_code,
                    near_value,
                    far_value,
                })
        })
        .collect()
}
