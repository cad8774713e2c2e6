//! Tests for projection caching across explorer sessions

use std::io::Write;
use std::sync::Arc;

use crate::utils::write_csv;
use projection_explorer::{Explorer, ExplorerConfig, SliceCache, global_cache, reset_global_cache};

const BODY: &str = "\
A,1,Both,15-24,2025,5.0
A,1,Both,15-24,2035,6.0
";

#[test]
fn test_sessions_share_loaded_data() {
    let file = write_csv(BODY);
    let config = ExplorerConfig::default().with_data_path(file.path());
    let cache = SliceCache::new();

    let first = cache.get_or_load(&config).unwrap();
    let second = cache.get_or_load(&config).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);

    let other_years = config.clone().with_years(2020, 2030);
    let _ = cache.get_or_load(&other_years);
    assert_eq!(cache.len(), 1, "failed loads are not cached");
}

#[test]
fn test_changed_file_is_reloaded() {
    let mut file = write_csv(BODY);
    let config = ExplorerConfig::default().with_data_path(file.path());
    let cache = SliceCache::new();

    let before = Explorer::open(&config, &cache).unwrap();
    assert_eq!(before.data().table.len(), 1);

    file.write_all(b"B,1,Both,15-24,2025,7.0\nB,1,Both,15-24,2035,7.5\n")
        .unwrap();
    file.flush().unwrap();

    let after = Explorer::open(&config, &cache).unwrap();
    assert_eq!(after.data().table.len(), 2);
    // the stale fingerprint is evicted
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_global_cache_reset() {
    let file = write_csv(BODY);
    let config = ExplorerConfig::default().with_data_path(file.path());

    let first = global_cache().get_or_load(&config).unwrap();
    reset_global_cache().unwrap();
    let second = global_cache().get_or_load(&config).unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first.table, second.table);
}
