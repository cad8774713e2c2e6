//! Shared utilities: Arrow helpers and logging/console output

pub mod arrow;
pub mod logging;
