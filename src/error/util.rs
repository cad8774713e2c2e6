//! Utility functions for error handling
//!
//! File access helpers that attach the path and purpose of the access to
//! any failure.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{ExplorerError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(
            ExplorerError::io_error(format!("File not found (needed for: {purpose})"))
                .with_path(path),
        );
    }

    if !path.is_file() {
        return Err(
            ExplorerError::io_error(format!("Path is not a file (expected for: {purpose})"))
                .with_path(path),
        );
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check file permissions".to_string()
            }
            io::ErrorKind::NotFound => {
                "File not found - it may have been deleted during operation".to_string()
            }
            _ => format!("Failed to open file for: {purpose}"),
        };
        ExplorerError::io_error_with_source(context, e).with_path(path)
    })
}

/// Read the metadata of a file, reporting failures against its path
pub fn safe_metadata(path: &Path, purpose: &str) -> Result<fs::Metadata> {
    fs::metadata(path).map_err(|e| {
        ExplorerError::io_error_with_source(format!("Failed to stat file for: {purpose}"), e)
            .with_path(path)
    })
}
