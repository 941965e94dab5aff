//! Disk cache for rendered cards.
//!
//! One PNG per key under the cache directory. An entry is fresh while
//! `now - mtime < ttl`; stale files are left in place and simply overwritten
//! by the next successful render for the same key.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use bytes::Bytes;
use tracing::{debug, info, warn};

use card_common::{normalize_component, CardError, CardResult, DeviceClass, RenderRequest};

use crate::clock::Clock;

/// Default freshness window: 10 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Identifies one cached card: `{city}-{country}-{mob|desk}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    city: String,
    country: String,
    device: DeviceClass,
}

impl CacheKey {
    /// Normalizes both components so the key is safe as a file name.
    pub fn new(city: &str, country: &str, device: DeviceClass) -> Self {
        Self {
            city: normalize_component(city),
            country: normalize_component(country),
            device,
        }
    }

    /// The API key override and units do not participate in the key.
    pub fn for_request(request: &RenderRequest) -> Self {
        Self::new(&request.location, &request.country_code, request.device_class)
    }

    pub fn device(&self) -> DeviceClass {
        self.device
    }

    pub fn file_name(&self) -> String {
        format!("{}.png", self)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.city, self.country, self.device.cache_suffix())
    }
}

/// What is on disk for a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub file_path: PathBuf,
    pub created_at: SystemTime,
}

impl CacheEntry {
    /// Age relative to `now`. Timestamps in the future count as age zero.
    pub fn age(&self, now: SystemTime) -> Duration {
        now.duration_since(self.created_at).unwrap_or(Duration::ZERO)
    }

    pub fn is_fresh(&self, now: SystemTime, ttl: Duration) -> bool {
        self.age(now) < ttl
    }
}

/// Filesystem-backed card cache with TTL freshness.
pub struct CardCache {
    dir: PathBuf,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl CardCache {
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            dir: dir.into(),
            ttl,
            clock,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Path and modification time of the file for `key`, if one exists.
    pub async fn entry(&self, key: &CacheKey) -> Option<CacheEntry> {
        let file_path = self.path_for(key);
        let metadata = tokio::fs::metadata(&file_path).await.ok()?;
        if !metadata.is_file() {
            return None;
        }
        let created_at = metadata.modified().ok()?;
        Some(CacheEntry {
            key: key.clone(),
            file_path,
            created_at,
        })
    }

    /// Fresh bytes for `key`. Missing, stale or unreadable files are a miss.
    pub async fn lookup(&self, key: &CacheKey) -> Option<Bytes> {
        let Some(entry) = self.entry(key).await else {
            debug!(key = %key, "Card cache miss");
            return None;
        };

        let now = self.clock.now();
        if !entry.is_fresh(now, self.ttl) {
            debug!(
                key = %key,
                age_secs = entry.age(now).as_secs(),
                "Card cache entry is stale"
            );
            return None;
        }

        match tokio::fs::read(&entry.file_path).await {
            Ok(data) if !data.is_empty() => {
                info!(key = %key, bytes = data.len(), "Card cache hit");
                Some(Bytes::from(data))
            }
            Ok(_) => {
                warn!(key = %key, "Ignoring empty cache file");
                None
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read cache file");
                None
            }
        }
    }

    /// Store `data` for `key`, replacing any previous file.
    ///
    /// Writes a sibling temp file and renames it over the target, so a
    /// concurrent reader sees either the old card or the new one.
    pub async fn write(&self, key: &CacheKey, data: &[u8]) -> CardResult<PathBuf> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| CardError::Cache(format!("create {}: {}", self.dir.display(), e)))?;

        let target = self.path_for(key);
        let temp = self.dir.join(format!(
            ".{}.{}-{}.tmp",
            key.file_name(),
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        if let Err(e) = tokio::fs::write(&temp, data).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(CardError::Cache(format!("write {}: {}", temp.display(), e)));
        }
        if let Err(e) = tokio::fs::rename(&temp, &target).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(CardError::Cache(format!("rename to {}: {}", target.display(), e)));
        }

        debug!(key = %key, path = %target.display(), bytes = data.len(), "Card cached");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        let key = CacheKey::new("London", "GB", DeviceClass::Mobile);
        assert_eq!(key.to_string(), "london-gb-mob");
        assert_eq!(key.file_name(), "london-gb-mob.png");

        let key = CacheKey::new("New York", "us", DeviceClass::Desktop);
        assert_eq!(key.file_name(), "new_york-us-desk.png");
    }

    #[test]
    fn test_key_cannot_escape_directory() {
        let key = CacheKey::new("../../etc/passwd", "uk", DeviceClass::Desktop);
        assert!(!key.file_name().contains('/'));
        assert!(!key.file_name().contains(".."));
    }

    #[test]
    fn test_key_ignores_api_key_override() {
        let plain = RenderRequest::new("Paris", Some("fr"), DeviceClass::Desktop, None, "uk");
        let keyed = RenderRequest::new(
            "Paris",
            Some("fr"),
            DeviceClass::Desktop,
            Some("secret".to_string()),
            "uk",
        );
        assert_eq!(CacheKey::for_request(&plain), CacheKey::for_request(&keyed));
    }

    #[test]
    fn test_entry_freshness_boundary() {
        let created_at = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
        let entry = CacheEntry {
            key: CacheKey::new("a", "b", DeviceClass::Mobile),
            file_path: PathBuf::from("a-b-mob.png"),
            created_at,
        };
        let ttl = Duration::from_secs(600);
        assert!(entry.is_fresh(created_at + Duration::from_secs(599), ttl));
        assert!(!entry.is_fresh(created_at + ttl, ttl));
        assert!(entry.is_fresh(created_at - Duration::from_secs(5), ttl));
    }
}
