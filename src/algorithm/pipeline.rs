//! Load → resolve → extract
//!
//! The expensive, cacheable half of the explorer. The result is immutable and
//! shared for the lifetime of the source file.

use std::path::Path;
use std::time::Instant;

use log::info;

use crate::algorithm::extract::{SliceQuery, extract};
use crate::algorithm::resolve::resolve_labels;
use crate::config::ExplorerConfig;
use crate::error::Result;
use crate::loader::{RawTable, load_table};
use crate::models::ProjectionData;

/// Resolve labels and extract the near/far table from a loaded table
pub fn build_projection(table: &RawTable, query: &SliceQuery) -> Result<ProjectionData> {
    let labels = resolve_labels(table)?;
    let resolved = extract(table, &labels, query)?;
    Ok(ProjectionData {
        labels,
        sex_label: query.sex_label.clone(),
        table: resolved,
    })
}

/// Load the source at `path` and build its projection data
pub fn load_projection(path: &Path, config: &ExplorerConfig) -> Result<ProjectionData> {
    let start = Instant::now();
    let table = load_table(path, config)?;
    let data = build_projection(&table, &SliceQuery::from(config))?;
    info!(
        "Built projection for {} countries from {} in {:?}",
        data.table.len(),
        path.display(),
        start.elapsed()
    );
    Ok(data)
}
