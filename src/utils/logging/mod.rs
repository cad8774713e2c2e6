//! Logging utilities for output and summaries
//!
//! This module provides utilities for operation logging and console output.

pub mod console;
pub mod log;

// Re-export commonly used functions for convenience
pub use console::print_dashboard_summary;
pub use log::{log_dropped_row, log_source_loaded, log_source_opening};
