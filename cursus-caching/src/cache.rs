//! Core cache trait and entry type
//!
//! Keys are strings so invalidation patterns can be matched against them;
//! the convention is `org-{id}:{resource}:{discriminator}` so a whole
//! resource family can be dropped with one `org-1:salles:*` call.

use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;

use crate::{CacheResult, CacheStats};

/// Trait for types that can be cached
pub trait CacheValue: Clone + Debug + Send + Sync {}

// Blanket implementation
impl<T> CacheValue for T where T: Clone + Debug + Send + Sync {}

/// Core cache trait
#[async_trait]
pub trait Cache<V: CacheValue + 'static>: Send + Sync {
    /// Get a value from the cache
    async fn get(&self, key: &str) -> CacheResult<Option<V>>;

    /// Put a value into the cache
    async fn put(&self, key: String, value: V) -> CacheResult<()>;

    /// Put a value with TTL
    async fn put_with_ttl(&self, key: String, value: V, _ttl: Duration) -> CacheResult<()> {
        // Default implementation ignores TTL
        self.put(key, value).await
    }

    /// Remove a value from the cache
    async fn remove(&self, key: &str) -> CacheResult<Option<V>>;

    /// Remove every entry whose key matches the pattern (exact string, or
    /// a prefix followed by a trailing `*`). Returns the number removed.
    async fn invalidate_pattern(&self, pattern: &str) -> CacheResult<usize>;

    /// Clear all entries
    async fn clear(&self) -> CacheResult<()>;

    /// Get the number of entries
    async fn len(&self) -> CacheResult<usize>;

    /// Check if cache is empty
    async fn is_empty(&self) -> CacheResult<bool> {
        Ok(self.len().await? == 0)
    }

    /// Get cache statistics
    async fn stats(&self) -> CacheResult<CacheStats>;
}

/// Whether `key` matches an invalidation `pattern`
pub fn key_matches(pattern: &str, key: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => key.starts_with(prefix),
        None => key == pattern,
    }
}

/// Cache entry with expiry metadata
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The cached value
    pub value: V,

    /// When the entry was created
    pub created_at: std::time::Instant,

    /// When the entry expires (if applicable)
    pub expires_at: Option<std::time::Instant>,
}

impl<V: CacheValue> CacheEntry<V> {
    /// Create a new cache entry
    pub fn new(value: V) -> Self {
        Self {
            value,
            created_at: std::time::Instant::now(),
            expires_at: None,
        }
    }

    /// Create a new cache entry with TTL
    pub fn with_ttl(value: V, ttl: Duration) -> Self {
        let mut entry = Self::new(value);
        entry.expires_at = Some(entry.created_at + ttl);
        entry
    }

    /// Check if the entry is expired
    pub fn is_expired(&self) -> bool {
        if let Some(expires_at) = self.expires_at {
            std::time::Instant::now() > expires_at
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_matches() {
        assert!(key_matches("org-1:salles:*", "org-1:salles:page-2"));
        assert!(key_matches("org-1:salles:page-2", "org-1:salles:page-2"));
        assert!(!key_matches("org-1:salles:*", "org-2:salles:page-2"));
        assert!(!key_matches("org-1:salles:page-2", "org-1:salles:page-3"));
    }

    #[test]
    fn test_entry_expiry() {
        let entry = CacheEntry::with_ttl(1u32, Duration::from_secs(0));
        std::thread::sleep(Duration::from_millis(5));
        assert!(entry.is_expired());

        let entry = CacheEntry::new(1u32);
        assert!(!entry.is_expired());
    }
}
