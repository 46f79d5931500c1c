//! Cache statistics

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Cache statistics snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    /// Total number of get requests
    pub total_gets: u64,

    /// Number of cache hits
    pub hits: u64,

    /// Number of cache misses
    pub misses: u64,

    /// Total number of put requests
    pub total_puts: u64,

    /// Current number of entries
    pub entry_count: usize,

    /// Hit rate (0.0 to 1.0)
    pub hit_rate: f64,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the hit rate from the counters
    pub fn calculate_hit_rate(&mut self) {
        if self.total_gets > 0 {
            self.hit_rate = self.hits as f64 / self.total_gets as f64;
        } else {
            self.hit_rate = 0.0;
        }
    }
}

/// Thread-safe statistics collector
#[derive(Debug, Default)]
pub struct StatsCollector {
    total_gets: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    total_puts: AtomicU64,
}

/// Shared statistics collector handle
pub type SharedStatsCollector = Arc<StatsCollector>;

/// Create a new shared statistics collector
pub fn create_stats_collector() -> SharedStatsCollector {
    Arc::new(StatsCollector::default())
}

impl StatsCollector {
    pub fn record_hit(&self) {
        self.total_gets.fetch_add(1, Ordering::Relaxed);
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.total_gets.fetch_add(1, Ordering::Relaxed);
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_put(&self) {
        self.total_puts.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot the counters into a [`CacheStats`]
    pub fn snapshot(&self, entry_count: usize) -> CacheStats {
        let mut stats = CacheStats {
            total_gets: self.total_gets.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            total_puts: self.total_puts.load(Ordering::Relaxed),
            entry_count,
            hit_rate: 0.0,
        };
        stats.calculate_hit_rate();
        stats
    }
}
