//! Domain models for the projection explorer
//!
//! Label values read from the source, the resolved slice table built once
//! per load, and the per-interaction adjusted view.

pub mod adjusted;
pub mod slice;
pub mod types;

// Re-export commonly used types
pub use adjusted::{AdjustedRow, AdjustedView};
pub use slice::{ProjectionData, ResolvedSliceTable, SliceLabels, SliceRow};
pub use types::LabelValue;
