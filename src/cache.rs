//! Process-wide cache of resolved projection data
//!
//! Loading, label resolution and extraction run once per source file; every
//! later interaction reuses the cached `ProjectionData`. Entries are keyed by
//! the file's identity (canonical path, size, modification time) together with
//! the slice query, so an edited file or a different year pair loads afresh.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use lazy_static::lazy_static;
use log::debug;

use crate::algorithm::extract::SliceQuery;
use crate::algorithm::pipeline::load_projection;
use crate::config::ExplorerConfig;
use crate::error::util::safe_metadata;
use crate::error::{ExplorerError, Result};
use crate::models::ProjectionData;

/// Identity of a source file at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceKey {
    pub path: PathBuf,
    pub len: u64,
    pub modified: Option<SystemTime>,
}

impl SourceKey {
    /// Fingerprint the file currently at `path`
    pub fn for_path(path: &Path) -> Result<Self> {
        let metadata = safe_metadata(path, "fingerprinting projection source")?;
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Ok(Self {
            path,
            len: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }
}

fn lock_error(kind: &str) -> ExplorerError {
    ExplorerError::InvalidOperation(format!("Failed to acquire {kind} lock on slice cache"))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    source: SourceKey,
    query: SliceQuery,
}

/// Keyed cache of projection data
#[derive(Debug, Default)]
pub struct SliceCache {
    entries: RwLock<HashMap<CacheKey, Arc<ProjectionData>>>,
}

impl SliceCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return cached data for the configured source, loading it on a miss
    pub fn get_or_load(&self, config: &ExplorerConfig) -> Result<Arc<ProjectionData>> {
        self.get_or_insert_with(&config.data_path, SliceQuery::from(config), || {
            load_projection(&config.data_path, config)
        })
    }

    /// Return cached data for `path` and `query`, computing it with `load` on a miss
    ///
    /// A failed load leaves the cache unchanged.
    pub fn get_or_insert_with<F>(
        &self,
        path: &Path,
        query: SliceQuery,
        load: F,
    ) -> Result<Arc<ProjectionData>>
    where
        F: FnOnce() -> Result<ProjectionData>,
    {
        let key = CacheKey {
            source: SourceKey::for_path(path)?,
            query,
        };

        {
            let entries = self.entries.read().map_err(|_| lock_error("read"))?;
            if let Some(data) = entries.get(&key) {
                debug!("Slice cache hit for {}", path.display());
                return Ok(Arc::clone(data));
            }
        }

        debug!("Slice cache miss for {}", path.display());
        let data = Arc::new(load()?);

        let mut entries = self.entries.write().map_err(|_| lock_error("write"))?;
        // Older fingerprints of the same file are stale now
        entries.retain(|existing, _| {
            existing.source.path != key.source.path || existing.source == key.source
        });
        entries.insert(key, Arc::clone(&data));
        Ok(data)
    }

    /// Drop every entry for `path`
    pub fn invalidate(&self, path: &Path) -> Result<usize> {
        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let mut entries = self.entries.write().map_err(|_| lock_error("write"))?;
        let before = entries.len();
        entries.retain(|key, _| key.source.path != canonical);
        Ok(before - entries.len())
    }

    /// Drop every entry
    pub fn clear(&self) -> Result<()> {
        self.entries
            .write()
            .map_err(|_| lock_error("write"))?
            .clear();
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

lazy_static! {
    static ref GLOBAL_CACHE: SliceCache = SliceCache::new();
}

/// The cache shared by the whole process
#[must_use]
pub fn global_cache() -> &'static SliceCache {
    &GLOBAL_CACHE
}

/// Empty the process-wide cache
pub fn reset_global_cache() -> Result<()> {
    global_cache().clear()
}
