//! Disk cache behaviour against a real temp directory.

use std::sync::Arc;
use std::time::Duration;

use card_common::DeviceClass;
use storage::{CacheKey, CardCache, ManualClock, SystemClock, DEFAULT_TTL};

fn key() -> CacheKey {
    CacheKey::new("London", "uk", DeviceClass::Mobile)
}

#[tokio::test]
async fn test_lookup_after_write_is_hit() {
    let dir = tempfile::tempdir().unwrap();
    let cache = CardCache::new(dir.path(), DEFAULT_TTL, Arc::new(SystemClock));

    assert!(cache.lookup(&key()).await.is_none());

    let path = cache.write(&key(), b"png-bytes").await.unwrap();
    assert_eq!(path, dir.path().join("london-uk-mob.png"));

    let hit = cache.lookup(&key()).await.unwrap();
    assert_eq!(&hit[..], b"png-bytes");
}

#[tokio::test]
async fn test_entry_goes_stale_after_ttl() {
    let dir = tempfile::tempdir().unwrap();
    let clock = Arc::new(ManualClock::starting_now());
    let cache = CardCache::new(dir.path(), DEFAULT_TTL, clock.clone());

    cache.write(&key(), b"card").await.unwrap();
    assert!(cache.lookup(&key()).await.is_some());

    clock.advance(DEFAULT_TTL - Duration::from_secs(60));
    assert!(cache.lookup(&key()).await.is_some());

    clock.advance(Duration::from_secs(61));
    assert!(cache.lookup(&key()).await.is_none());

    // Stale files stay on disk until overwritten.
    let entry = cache.entry(&key()).await.unwrap();
    assert!(entry.file_path.exists());
}

#[tokio::test]
async fn test_rewrite_replaces_content() {
    let dir = tempfile::tempdir().unwrap();
    let cache = CardCache::new(dir.path(), DEFAULT_TTL, Arc::new(SystemClock));

    cache.write(&key(), b"first").await.unwrap();
    cache.write(&key(), b"second").await.unwrap();
    assert_eq!(&cache.lookup(&key()).await.unwrap()[..], b"second");

    // Only the card itself is left behind, no temp files.
    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["london-uk-mob.png".to_string()]);
}

#[tokio::test]
async fn test_write_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let cache = CardCache::new(&nested, DEFAULT_TTL, Arc::new(SystemClock));

    cache.write(&key(), b"x").await.unwrap();
    assert!(nested.join("london-uk-mob.png").is_file());
}

#[tokio::test]
async fn test_devices_do_not_share_entries() {
    let dir = tempfile::tempdir().unwrap();
    let cache = CardCache::new(dir.path(), DEFAULT_TTL, Arc::new(SystemClock));

    cache.write(&key(), b"mobile").await.unwrap();
    let desktop = CacheKey::new("London", "uk", DeviceClass::Desktop);
    assert!(cache.lookup(&desktop).await.is_none());
}

#[tokio::test]
async fn test_write_into_unusable_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"file").unwrap();

    let cache = CardCache::new(&blocker, DEFAULT_TTL, Arc::new(SystemClock));
    let err = cache.write(&key(), b"x").await.unwrap_err();
    assert_eq!(err.kind(), "cache");
}
