//! Time-bounded response cache for listing requests.
//!
//! One instance exists per listing context and lives exactly as long as its
//! owning [`crate::listing::ListingController`]; there is no module-level
//! singleton, so tests can run independent caches side by side. The cache
//! is purely in-memory and scoped to a single session.
//!
//! Expired entries count as misses but are not swept in the background;
//! they are simply overwritten by the next `set` for the same key or
//! dropped with the cache itself.

use std::collections::HashMap;
use std::time::{Duration, Instant};

struct CacheEntry<T> {
    data: T,
    fetched_at: Instant,
}

/// A process-local cache keyed by canonical query strings.
///
/// Exactly one entry exists per key at a time; a write overwrites.
pub struct ResponseCache<T> {
    entries: HashMap<String, CacheEntry<T>>,
    ttl: Duration,
}

impl<T: Clone> ResponseCache<T> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Returns the cached data for `key` if an entry exists and is younger
    /// than the TTL. An expired entry is a miss.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<T> {
        let entry = self.entries.get(key)?;
        if entry.fetched_at.elapsed() < self.ttl {
            tracing::debug!(key, "cache hit");
            Some(entry.data.clone())
        } else {
            tracing::debug!(key, "cache entry expired");
            None
        }
    }

    /// Stores `data` under `key`, replacing any previous entry.
    pub fn set(&mut self, key: impl Into<String>, data: T) {
        self.entries.insert(
            key.into(),
            CacheEntry {
                data,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Drops the entry for `key`, forcing the next read to fetch.
    pub fn invalidate(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Drops every entry. Used after mutating admin operations whose effect
    /// on individual keys is unknown.
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIVE_MINUTES: Duration = Duration::from_secs(300);

    #[test]
    fn set_then_get_within_ttl_returns_data() {
        let mut cache = ResponseCache::new(FIVE_MINUTES);
        cache.set("page=1&pageSize=12", vec![1, 2, 3]);
        assert_eq!(cache.get("page=1&pageSize=12"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn get_unknown_key_is_a_miss() {
        let cache: ResponseCache<Vec<i32>> = ResponseCache::new(FIVE_MINUTES);
        assert!(cache.get("page=1&pageSize=12").is_none());
    }

    #[test]
    fn zero_ttl_makes_every_entry_stale() {
        let mut cache = ResponseCache::new(Duration::ZERO);
        cache.set("page=1&pageSize=12", vec![1]);
        assert!(cache.get("page=1&pageSize=12").is_none());
    }

    #[test]
    fn expired_entry_is_not_purged_until_overwritten() {
        let mut cache = ResponseCache::new(Duration::ZERO);
        cache.set("page=1&pageSize=12", vec![1]);
        assert!(cache.get("page=1&pageSize=12").is_none());
        assert_eq!(cache.len(), 1);

        cache.set("page=1&pageSize=12", vec![2]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn write_overwrites_never_appends() {
        let mut cache = ResponseCache::new(FIVE_MINUTES);
        cache.set("k", vec![1]);
        cache.set("k", vec![2]);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("k"), Some(vec![2]));
    }

    #[test]
    fn invalidate_removes_single_key() {
        let mut cache = ResponseCache::new(FIVE_MINUTES);
        cache.set("a", vec![1]);
        cache.set("b", vec![2]);
        cache.invalidate("a");
        assert!(cache.get("a").is_none());
        assert_eq!(cache.get("b"), Some(vec![2]));
    }

    #[test]
    fn invalidate_all_empties_the_cache() {
        let mut cache = ResponseCache::new(FIVE_MINUTES);
        cache.set("a", vec![1]);
        cache.set("b", vec![2]);
        cache.invalidate_all();
        assert!(cache.is_empty());
    }

    #[test]
    fn instances_are_independent() {
        let mut listing_cache = ResponseCache::new(FIVE_MINUTES);
        let category_cache: ResponseCache<Vec<i32>> = ResponseCache::new(FIVE_MINUTES);
        listing_cache.set("page=1&pageSize=12", vec![1]);
        assert!(category_cache.get("page=1&pageSize=12").is_none());
    }
}
