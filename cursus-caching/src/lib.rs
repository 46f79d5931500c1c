//! Best-effort caching layer for Cursus
//!
//! The cache is a non-authoritative accelerator: every read through it
//! must be able to fall through to the source of truth, and no correctness
//! property may depend on it being present or consistent. The process-wide
//! handle is lazily initialized; an unconfigured cache is a valid state,
//! not an error.

pub mod cache;
pub mod errors;
pub mod stats;
pub mod stores;

use std::sync::Arc;

use once_cell::sync::OnceCell;

// Re-export main types
pub use cache::{Cache, CacheValue};
pub use errors::{CacheError, CacheResult};
pub use stats::CacheStats;
pub use stores::InMemoryCache;

/// The shared value type used by the global cache
pub type SharedCache = Arc<dyn Cache<serde_json::Value>>;

static GLOBAL_CACHE: OnceCell<SharedCache> = OnceCell::new();

/// Install the process-wide cache handle. Later calls are ignored so a
/// racing double-initialization cannot swap the handle mid-flight.
pub fn init_global(cache: SharedCache) {
    if GLOBAL_CACHE.set(cache).is_err() {
        tracing::debug!("global cache already initialized, keeping existing handle");
    }
}

/// The process-wide cache, or `None` when caching is not configured.
/// Call sites must treat `None` as an expected state and fall through to
/// the source of truth.
pub fn global() -> Option<&'static SharedCache> {
    GLOBAL_CACHE.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_global_starts_unconfigured_then_sticks() {
        // Note: OnceCell is process-wide, so this test covers both states
        // in one flow.
        if global().is_none() {
            init_global(Arc::new(InMemoryCache::<serde_json::Value>::new()));
        }
        assert!(global().is_some());

        // A second init does not replace the handle
        let first = Arc::as_ptr(global().unwrap());
        init_global(Arc::new(InMemoryCache::<serde_json::Value>::new()));
        assert_eq!(first, Arc::as_ptr(global().unwrap()));
    }
}
