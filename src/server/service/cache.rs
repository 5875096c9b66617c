//! In-memory cache with per-entry expiry.
//!
//! Entries are stored with the instant they stop being valid. Reads never return an
//! expired value; expired entries are dropped on read or by `purge_expired`, which the
//! maintenance scheduler calls every minute.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Cached value with its expiration timestamp.
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Shared key-value cache where every entry lives for a fixed TTL.
///
/// Clones share the same underlying map, so one instance can be stored in `AppState`
/// and handed to services and the scheduler.
pub struct TtlCache<K, V> {
    entries: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
    ttl: Duration,
}

impl<K, V> Clone for TtlCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            ttl: self.ttl,
        }
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Creates an empty cache whose entries expire `ttl` after insertion.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Returns a clone of the cached value if it has not expired.
    ///
    /// An expired entry is removed and reported as a miss.
    pub async fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();

        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
        }

        None
    }

    /// Stores a value, replacing any previous entry and restarting its TTL.
    pub async fn insert(&self, key: K, value: V) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.write().await.insert(key, entry);
    }

    /// Removes the entry for `key`, if any.
    pub async fn invalidate(&self, key: &K) {
        self.entries.write().await.remove(key);
    }

    /// Removes every expired entry and returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));

        before - entries.len()
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    /// Tests that a fresh entry is returned.
    ///
    /// Expected: inserted value is returned until invalidated
    #[tokio::test]
    async fn returns_fresh_entry() {
        let cache: TtlCache<i32, String> = TtlCache::new(Duration::from_secs(60));

        cache.insert(1, "Goa".to_string()).await;

        assert_eq!(cache.get(&1).await, Some("Goa".to_string()));
        assert_eq!(cache.get(&2).await, None);
    }

    /// Tests that an expired entry is a miss and is removed on read.
    ///
    /// Expected: None, and the entry no longer counts towards `len`
    #[tokio::test]
    async fn expired_entry_is_removed_on_read() {
        let cache: TtlCache<i32, String> = TtlCache::new(Duration::from_millis(20));

        cache.insert(1, "Goa".to_string()).await;
        sleep(Duration::from_millis(40)).await;

        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get(&1).await, None);
        assert_eq!(cache.len().await, 0);
    }

    /// Tests that re-inserting a key replaces the value.
    #[tokio::test]
    async fn insert_replaces_existing_value() {
        let cache: TtlCache<i32, String> = TtlCache::new(Duration::from_secs(60));

        cache.insert(1, "Goa".to_string()).await;
        cache.insert(1, "Leh".to_string()).await;

        assert_eq!(cache.get(&1).await, Some("Leh".to_string()));
        assert_eq!(cache.len().await, 1);
    }

    /// Tests invalidation of a single key.
    #[tokio::test]
    async fn invalidate_removes_only_that_key() {
        let cache: TtlCache<i32, String> = TtlCache::new(Duration::from_secs(60));

        cache.insert(1, "Goa".to_string()).await;
        cache.insert(2, "Leh".to_string()).await;
        cache.invalidate(&1).await;

        assert_eq!(cache.get(&1).await, None);
        assert_eq!(cache.get(&2).await, Some("Leh".to_string()));
    }

    /// Tests purging with a zero TTL, where every entry is expired immediately.
    ///
    /// Expected: purge reports every entry and leaves the cache empty
    #[tokio::test]
    async fn purge_drops_expired_entries() {
        let cache: TtlCache<i32, String> = TtlCache::new(Duration::ZERO);

        cache.insert(1, "Goa".to_string()).await;
        cache.insert(2, "Leh".to_string()).await;

        assert_eq!(cache.purge_expired().await, 2);
        assert!(cache.is_empty().await);
    }

    /// Tests that purging keeps live entries.
    #[tokio::test]
    async fn purge_keeps_live_entries() {
        let cache: TtlCache<i32, String> = TtlCache::new(Duration::from_secs(60));

        cache.insert(1, "Goa".to_string()).await;

        assert_eq!(cache.purge_expired().await, 0);
        assert_eq!(cache.len().await, 1);
    }

    /// Tests that clones observe each other's writes.
    #[tokio::test]
    async fn clones_share_entries() {
        let cache: TtlCache<i32, String> = TtlCache::new(Duration::from_secs(60));
        let clone = cache.clone();

        clone.insert(7, "Hampi".to_string()).await;

        assert_eq!(cache.get(&7).await, Some("Hampi".to_string()));
    }
}
