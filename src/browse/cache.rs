//! Listing cache: bounded LRU with per-entry expiry
//!
//! Maps an absolute directory path to the last sorted listing built for
//! it. Capacity is a count of directories, not entries. A slot older than
//! the TTL is treated as absent and dropped on lookup.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use lru::LruCache;

use super::sort::{SortDirection, SortKey};
use crate::config::BrowseConfig;
use crate::model::entry::DirectoryEntry;
use crate::services::time_source::{RealTimeSource, SharedTimeSource};

/// One sorted snapshot of a directory's children
///
/// The sequence is fixed once built: page offsets index into it directly.
/// Entries still pick up metadata in place as pages are emitted.
#[derive(Debug)]
pub struct CachedListing {
    entries: Vec<DirectoryEntry>,
    sort_key: SortKey,
    direction: SortDirection,
}

impl CachedListing {
    pub fn new(entries: Vec<DirectoryEntry>, sort_key: SortKey, direction: SortDirection) -> Self {
        Self {
            entries,
            sort_key,
            direction,
        }
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Key the listing was actually sorted by (may differ from the request)
    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

struct CacheSlot {
    listing: Arc<CachedListing>,
    inserted_at: Instant,
}

/// Thread-safe listing cache shared by all browse requests
pub struct ListingCache {
    slots: Mutex<LruCache<PathBuf, CacheSlot>>,
    ttl: Duration,
    time_source: SharedTimeSource,
}

impl ListingCache {
    pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self::with_time_source(capacity, ttl, RealTimeSource::shared())
    }

    pub fn with_time_source(
        capacity: NonZeroUsize,
        ttl: Duration,
        time_source: SharedTimeSource,
    ) -> Self {
        Self {
            slots: Mutex::new(LruCache::new(capacity)),
            ttl,
            time_source,
        }
    }

    pub fn from_config(config: &BrowseConfig) -> Self {
        Self::new(config.capacity(), config.cache_ttl())
    }

    // A panic while holding the lock cannot leave a slot half-written
    fn lock(&self) -> MutexGuard<'_, LruCache<PathBuf, CacheSlot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a live listing, marking it most recently used
    pub fn get(&self, path: &Path) -> Option<Arc<CachedListing>> {
        let now = self.time_source.now();
        let mut slots = self.lock();

        let expired = match slots.get(path) {
            Some(slot) => now.saturating_duration_since(slot.inserted_at) >= self.ttl,
            None => return None,
        };

        if expired {
            tracing::debug!("cached listing for {:?} expired", path);
            slots.pop(path);
            return None;
        }

        slots.get(path).map(|slot| Arc::clone(&slot.listing))
    }

    /// Store a listing, replacing any previous one for the same directory
    pub fn put(&self, path: PathBuf, listing: CachedListing) -> Arc<CachedListing> {
        let listing = Arc::new(listing);
        let slot = CacheSlot {
            listing: Arc::clone(&listing),
            inserted_at: self.time_source.now(),
        };

        let mut slots = self.lock();
        // push hands back the old slot on replacement as well as on eviction
        if let Some((displaced, _)) = slots.push(path.clone(), slot) {
            if displaced == path {
                tracing::trace!("replaced cached listing for {:?}", path);
            } else {
                tracing::trace!("evicted cached listing for {:?}", displaced);
            }
        }
        listing
    }

    /// Number of resident slots, including expired ones not yet looked up
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl std::fmt::Debug for ListingCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingCache")
            .field("len", &self.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::time_source::TestTimeSource;

    fn listing(names: &[&str]) -> CachedListing {
        let entries = names
            .iter()
            .map(|n| DirectoryEntry::new(PathBuf::from("/d").join(n)))
            .collect();
        CachedListing::new(entries, SortKey::Path, SortDirection::Ascending)
    }

    fn cache_with_clock(capacity: usize) -> (ListingCache, Arc<TestTimeSource>) {
        let clock = TestTimeSource::shared();
        let cache = ListingCache::with_time_source(
            NonZeroUsize::new(capacity).unwrap(),
            Duration::from_secs(300),
            clock.clone(),
        );
        (cache, clock)
    }

    #[test]
    fn test_put_then_get() {
        let (cache, _clock) = cache_with_clock(4);
        cache.put(PathBuf::from("/d"), listing(&["a", "b"]));

        let found = cache.get(Path::new("/d")).unwrap();
        assert_eq!(found.len(), 2);
        assert!(cache.get(Path::new("/other")).is_none());
    }

    #[test]
    fn test_put_overwrites() {
        let (cache, _clock) = cache_with_clock(4);
        cache.put(PathBuf::from("/d"), listing(&["a", "b"]));
        cache.put(
            PathBuf::from("/d"),
            CachedListing::new(Vec::new(), SortKey::Size, SortDirection::Descending),
        );

        let found = cache.get(Path::new("/d")).unwrap();
        assert!(found.is_empty());
        assert_eq!(found.sort_key(), SortKey::Size);
        assert_eq!(found.direction(), SortDirection::Descending);
        assert_eq!(cache.len(), 1);
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_replacement_is_not_logged_as_eviction() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();

        let (cache, _clock) = cache_with_clock(2);
        tracing::subscriber::with_default(subscriber, || {
            cache.put(PathBuf::from("/a"), listing(&["x"]));
            cache.put(PathBuf::from("/a"), listing(&["y"]));
        });

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("replaced cached listing"));
        assert!(!output.contains("evicted"));

        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            cache.put(PathBuf::from("/b"), listing(&["x"]));
            cache.put(PathBuf::from("/c"), listing(&["x"]));
        });

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("evicted cached listing for \"/a\""));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_expiry() {
        let (cache, clock) = cache_with_clock(4);
        cache.put(PathBuf::from("/d"), listing(&["a"]));

        clock.advance(Duration::from_secs(299));
        assert!(cache.get(Path::new("/d")).is_some());

        clock.advance(Duration::from_secs(1));
        assert!(cache.get(Path::new("/d")).is_none());
        // Expired slot is dropped on lookup
        assert!(cache.is_empty());
    }

    #[test]
    fn test_expiry_is_not_refreshed_by_reads() {
        let (cache, clock) = cache_with_clock(4);
        cache.put(PathBuf::from("/d"), listing(&["a"]));

        for _ in 0..5 {
            clock.advance(Duration::from_secs(60));
            let _ = cache.get(Path::new("/d"));
        }
        assert!(cache.get(Path::new("/d")).is_none());
    }

    #[test]
    fn test_lru_eviction() {
        let (cache, _clock) = cache_with_clock(2);
        cache.put(PathBuf::from("/one"), listing(&["a"]));
        cache.put(PathBuf::from("/two"), listing(&["a"]));

        // Touch /one so /two becomes least recently used
        assert!(cache.get(Path::new("/one")).is_some());
        cache.put(PathBuf::from("/three"), listing(&["a"]));

        assert_eq!(cache.len(), 2);
        assert!(cache.get(Path::new("/one")).is_some());
        assert!(cache.get(Path::new("/two")).is_none());
        assert!(cache.get(Path::new("/three")).is_some());
    }

    #[test]
    fn test_concurrent_access() {
        let (cache, _clock) = cache_with_clock(8);

        std::thread::scope(|s| {
            for t in 0..4 {
                let cache = &cache;
                s.spawn(move || {
                    for i in 0..100 {
                        let path = PathBuf::from(format!("/dir{}", (t + i) % 16));
                        cache.put(path.clone(), listing(&["x"]));
                        let _ = cache.get(&path);
                    }
                });
            }
        });

        assert!(cache.len() <= 8);
    }
}
