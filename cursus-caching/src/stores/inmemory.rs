//! Simple in-memory cache implementation

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    cache::{key_matches, Cache, CacheEntry, CacheValue},
    stats::{create_stats_collector, SharedStatsCollector},
    CacheResult, CacheStats,
};

/// Simple in-memory cache with per-entry TTL
pub struct InMemoryCache<V> {
    store: Arc<RwLock<HashMap<String, CacheEntry<V>>>>,
    stats: SharedStatsCollector,
}

impl<V: CacheValue + 'static> InMemoryCache<V> {
    /// Create a new in-memory cache
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(HashMap::new())),
            stats: create_stats_collector(),
        }
    }

    /// Create with initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(HashMap::with_capacity(capacity))),
            stats: create_stats_collector(),
        }
    }
}

impl<V: CacheValue + 'static> Default for InMemoryCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<V: CacheValue + 'static> Cache<V> for InMemoryCache<V> {
    async fn get(&self, key: &str) -> CacheResult<Option<V>> {
        let result = {
            let mut store = self.store.write();
            match store.get(key) {
                Some(entry) => {
                    if entry.is_expired() {
                        store.remove(key);
                        self.stats.record_miss();
                        None
                    } else {
                        self.stats.record_hit();
                        Some(entry.value.clone())
                    }
                }
                None => {
                    self.stats.record_miss();
                    None
                }
            }
        };

        Ok(result)
    }

    async fn put(&self, key: String, value: V) -> CacheResult<()> {
        let mut store = self.store.write();
        store.insert(key, CacheEntry::new(value));
        self.stats.record_put();
        Ok(())
    }

    async fn put_with_ttl(&self, key: String, value: V, ttl: Duration) -> CacheResult<()> {
        let mut store = self.store.write();
        store.insert(key, CacheEntry::with_ttl(value, ttl));
        self.stats.record_put();
        Ok(())
    }

    async fn remove(&self, key: &str) -> CacheResult<Option<V>> {
        let mut store = self.store.write();
        match store.remove(key) {
            Some(entry) if !entry.is_expired() => Ok(Some(entry.value)),
            _ => Ok(None),
        }
    }

    async fn invalidate_pattern(&self, pattern: &str) -> CacheResult<usize> {
        let mut store = self.store.write();
        let keys: Vec<String> = store
            .keys()
            .filter(|k| key_matches(pattern, k))
            .cloned()
            .collect();
        for key in &keys {
            store.remove(key);
        }
        Ok(keys.len())
    }

    async fn clear(&self) -> CacheResult<()> {
        self.store.write().clear();
        Ok(())
    }

    async fn len(&self) -> CacheResult<usize> {
        Ok(self.store.read().len())
    }

    async fn stats(&self) -> CacheResult<CacheStats> {
        let entry_count = self.store.read().len();
        Ok(self.stats.snapshot(entry_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_remove() {
        let cache: InMemoryCache<String> = InMemoryCache::new();
        cache.put("a".to_string(), "1".to_string()).await.unwrap();

        assert_eq!(cache.get("a").await.unwrap(), Some("1".to_string()));
        assert_eq!(cache.remove("a").await.unwrap(), Some("1".to_string()));
        assert_eq!(cache.get("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ttl_expiry() {
        let cache: InMemoryCache<u32> = InMemoryCache::new();
        cache
            .put_with_ttl("k".to_string(), 1, Duration::from_millis(1))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalidate_pattern() {
        let cache: InMemoryCache<u32> = InMemoryCache::new();
        cache.put("org-1:salles:p1".to_string(), 1).await.unwrap();
        cache.put("org-1:salles:p2".to_string(), 2).await.unwrap();
        cache.put("org-2:salles:p1".to_string(), 3).await.unwrap();

        let removed = cache.invalidate_pattern("org-1:salles:*").await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(cache.get("org-1:salles:p1").await.unwrap(), None);
        assert_eq!(cache.get("org-2:salles:p1").await.unwrap(), Some(3));
    }

    #[tokio::test]
    async fn test_stats() {
        let cache: InMemoryCache<u32> = InMemoryCache::new();
        cache.put("k".to_string(), 1).await.unwrap();
        let _ = cache.get("k").await.unwrap();
        let _ = cache.get("absent").await.unwrap();

        let stats = cache.stats().await.unwrap();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entry_count, 1);
    }
}
