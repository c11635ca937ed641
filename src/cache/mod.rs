//! Bounded TTL cache keyed by string.
//!
//! Shared by the validation engine (per-address results) and the
//! routability checker (per-domain MX answers). Eviction is
//! oldest-insertion-first; expiry is lazy, collected when a stale entry
//! is next read or when [`TtlCache::purge_expired`] runs.

mod types;

pub use types::CacheStats;

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

pub struct TtlCache<T: Clone> {
    inner: RwLock<Inner<T>>,
    capacity: usize,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

struct Inner<T> {
    entries: HashMap<String, Entry<T>>,
    /// Insertion order, front = oldest. Refreshing a key does not move it.
    order: VecDeque<String>,
}

struct Entry<T> {
    value: T,
    stored_at: Instant,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            inner: RwLock::new(Inner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
            capacity: capacity.max(1),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns a clone of the fresh value under `key`, if any. A stale
    /// entry counts as a miss and is removed on the spot.
    pub async fn get(&self, key: &str) -> Option<T> {
        {
            let inner = self.inner.read().await;
            match inner.entries.get(key) {
                Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Some(entry.value.clone());
                }
                Some(_) => {} // stale, collect below
                None => {
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    return None;
                }
            }
        }

        let mut inner = self.inner.write().await;
        match inner.entries.get(key) {
            // A racing insert may have refreshed the slot between locks.
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.value.clone());
            }
            Some(_) => {
                inner.entries.remove(key);
                inner.order.retain(|stored| stored != key);
            }
            None => {}
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Stores `value` under `key`. Re-inserting an existing key refreshes
    /// its TTL in place without changing its eviction position. When the
    /// cache is full, the oldest insertion is dropped first.
    pub async fn insert(&self, key: impl Into<String>, value: T) {
        let key = key.into();
        let mut inner = self.inner.write().await;

        if let Some(entry) = inner.entries.get_mut(&key) {
            entry.value = value;
            entry.stored_at = Instant::now();
            return;
        }

        while inner.entries.len() >= self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
        }
        inner.order.push_back(key.clone());
        inner.entries.insert(
            key,
            Entry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drops every expired entry, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut inner = self.inner.write().await;
        let Inner { entries, order } = &mut *inner;
        let before = entries.len();
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        order.retain(|key| entries.contains_key(key));
        before - entries.len()
    }

    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.entries.clear();
        inner.order.clear();
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.inner.read().await.entries.len(),
            capacity: self.capacity,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(capacity: usize, ttl_secs: u64) -> TtlCache<u32> {
        TtlCache::new(capacity, Duration::from_secs(ttl_secs))
    }

    #[tokio::test]
    async fn stores_and_returns_values() {
        let cache = cache(4, 60);
        cache.insert("a", 1).await;
        assert_eq!(cache.get("a").await, Some(1));
        assert_eq!(cache.get("b").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_ttl() {
        let cache = cache(4, 60);
        cache.insert("a", 1).await;
        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(cache.get("a").await, None);
        // The stale slot was collected by the read.
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn reinsert_refreshes_ttl() {
        let cache = cache(4, 60);
        cache.insert("a", 1).await;
        tokio::time::advance(Duration::from_secs(40)).await;
        cache.insert("a", 2).await;
        tokio::time::advance(Duration::from_secs(40)).await;
        // 80s after the first insert, 40s after the refresh.
        assert_eq!(cache.get("a").await, Some(2));
    }

    #[tokio::test]
    async fn evicts_oldest_insertion_first() {
        let cache = cache(2, 60);
        cache.insert("a", 1).await;
        cache.insert("b", 2).await;
        cache.insert("c", 3).await;
        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.get("b").await, Some(2));
        assert_eq!(cache.get("c").await, Some(3));
    }

    #[tokio::test]
    async fn refresh_does_not_change_eviction_position() {
        let cache = cache(2, 60);
        cache.insert("a", 1).await;
        cache.insert("b", 2).await;
        // "a" stays the oldest insertion even after a refresh.
        cache.insert("a", 10).await;
        cache.insert("c", 3).await;
        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.get("b").await, Some(2));
        assert_eq!(cache.get("c").await, Some(3));
    }

    #[tokio::test(start_paused = true)]
    async fn purge_drops_only_expired_entries() {
        let cache = cache(4, 60);
        cache.insert("old", 1).await;
        tokio::time::advance(Duration::from_secs(50)).await;
        cache.insert("young", 2).await;
        tokio::time::advance(Duration::from_secs(20)).await;

        assert_eq!(cache.purge_expired().await, 1);
        assert_eq!(cache.get("old").await, None);
        assert_eq!(cache.get("young").await, Some(2));
    }

    #[tokio::test]
    async fn stats_track_hits_and_misses() {
        let cache = cache(4, 60);
        cache.insert("a", 1).await;
        cache.get("a").await;
        cache.get("a").await;
        cache.get("missing").await;

        let stats = cache.stats().await;
        assert_eq!(stats.size, 1);
        assert_eq!(stats.capacity, 4);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test]
    async fn clear_empties_the_cache() {
        let cache = cache(4, 60);
        cache.insert("a", 1).await;
        cache.insert("b", 2).await;
        cache.clear().await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn zero_capacity_is_clamped_to_one() {
        let cache: TtlCache<u32> = TtlCache::new(0, Duration::from_secs(60));
        cache.insert("a", 1).await;
        assert_eq!(cache.get("a").await, Some(1));
        cache.insert("b", 2).await;
        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.get("b").await, Some(2));
    }
}
