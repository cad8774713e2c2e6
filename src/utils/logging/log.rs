//! Load and data-quality logging
//!
//! One place for the messages the loader and extractor emit, so the console
//! output keeps a stable shape across sources.

use std::path::Path;
use std::time::Duration;

/// Announce that a projection source is about to be read
pub fn log_source_opening(path: &Path, format: &str) {
    log::info!("Loading {format} projection table from {}", path.display());
}

/// Report a loaded and normalized projection source
///
/// # Arguments
/// * `path` - The source that was read
/// * `rows` - Number of rows after normalization
/// * `batches` - Number of record batches the reader produced
/// * `elapsed` - Time spent reading and normalizing
pub fn log_source_loaded(path: &Path, rows: usize, batches: usize, elapsed: Duration) {
    log::info!(
        "Loaded {rows} rows in {batches} batch(es) from {} in {elapsed:?}",
        path.display()
    );
}

/// Warn about a slice row that cannot take part in the join
///
/// `country` is `None` when the country code itself is the missing part.
pub fn log_dropped_row(year: i64, country: Option<&str>) {
    match country {
        Some(country) => log::warn!("Dropping {year} row for {country}: metric value is missing"),
        None => log::warn!("Dropping {year} row: country code is missing"),
    }
}
