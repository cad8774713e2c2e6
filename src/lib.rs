//! Scenario-adjustment explorer for country-level education projections.
//!
//! Loads a projection table, detects the target scenario and youth age-group
//! labels, joins the near-year and far-year values per country, and turns a
//! user-supplied delta into three choropleth map payloads.

pub mod algorithm;
pub mod cache;
pub mod config;
pub mod error;
pub mod explorer;
pub mod filter;
pub mod loader;
pub mod models;
pub mod render;
pub mod utils;

// Re-export the most common types for easier use
pub use algorithm::{
    ColorRange, SliceQuery, adjust, baseline_color_range, build_projection, diverging_color_range,
    extract, load_projection, resolve_labels,
};
pub use cache::{SliceCache, global_cache, reset_global_cache};
pub use config::{ColumnNames, DeltaControl, ExplorerConfig};
pub use error::{ExplorerError, ExtractionError, ResolutionError, Result};
pub use explorer::Explorer;
pub use loader::{RawTable, load_table};
pub use models::{AdjustedView, LabelValue, ProjectionData, ResolvedSliceTable, SliceLabels};
pub use render::{Dashboard, MapLayer, build_dashboard, write_dashboard_json};

// Arrow types
pub use arrow::record_batch::RecordBatch;
