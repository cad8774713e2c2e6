//! Algorithm implementations for the projection explorer
//!
//! Label resolution, projection extraction, scenario adjustment and color
//! range normalization.

pub mod adjust;
pub mod color;
pub mod extract;
pub mod pipeline;
pub mod resolve;

// Re-export commonly used items
pub use adjust::adjust;
pub use color::{ColorRange, baseline_color_range, diverging_color_range};
pub use extract::{SliceQuery, extract};
pub use pipeline::{build_projection, load_projection};
pub use resolve::{resolve_from_values, resolve_labels};
