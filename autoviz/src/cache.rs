//! Memoization of analyses by dataset identity and version.
//!
//! Profiling and planning are pure functions of the records, so an analysis can
//! be reused for as long as the dataset is unchanged. A [`Dataset`] bumps its
//! version whenever its records are replaced; the cache keys entries by
//! [`DatasetKey`] so a new version is always a miss.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::data::{Dataset, DatasetKey};
use crate::engine::{Analysis, AutoVisualizer};

/// Cache entry with timestamp.
#[derive(Debug, Clone)]
struct CacheEntry {
    analysis: Arc<Analysis>,
    timestamp: Instant,
}

/// Caches analyses to avoid re-profiling unchanged datasets.
#[derive(Debug)]
pub struct AnalysisCache {
    /// The cache storage
    cache: HashMap<DatasetKey, CacheEntry>,
    /// Time-to-live for cache entries
    ttl: Duration,
    /// Maximum number of entries
    max_entries: usize,
    hits: u64,
    misses: u64,
}

impl AnalysisCache {
    /// Creates a new analysis cache.
    pub fn new() -> Self {
        Self::with_config(Duration::from_secs(300), 64)
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(ttl: Duration, max_entries: usize) -> Self {
        Self {
            cache: HashMap::new(),
            ttl,
            max_entries: max_entries.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Gets a live analysis from the cache.
    pub fn get(&self, key: &DatasetKey) -> Option<Arc<Analysis>> {
        self.cache.get(key).and_then(|entry| {
            if entry.timestamp.elapsed() < self.ttl {
                Some(Arc::clone(&entry.analysis))
            } else {
                None
            }
        })
    }

    /// Stores an analysis, dropping analyses of older versions of the same dataset.
    pub fn insert(&mut self, key: DatasetKey, analysis: Arc<Analysis>) {
        self.cache
            .retain(|existing, _| existing.id != key.id || existing.version > key.version);

        if self.cache.len() >= self.max_entries && !self.cache.contains_key(&key) {
            self.evict_oldest();
        }

        self.cache.insert(
            key,
            CacheEntry {
                analysis,
                timestamp: Instant::now(),
            },
        );
    }

    /// Returns the cached analysis of `dataset`, analyzing it on a miss.
    pub fn get_or_analyze(
        &mut self,
        visualizer: &AutoVisualizer,
        dataset: &Dataset,
    ) -> Arc<Analysis> {
        let key = dataset.key();
        if let Some(analysis) = self.get(&key) {
            self.hits += 1;
            debug!(dataset = key.id, version = key.version, "Analysis cache hit");
            return analysis;
        }

        self.misses += 1;
        debug!(dataset = key.id, version = key.version, "Analysis cache miss");
        let analysis = Arc::new(visualizer.analyze(dataset.records()));
        self.insert(key, Arc::clone(&analysis));
        analysis
    }

    /// Removes every cached version of a dataset.
    pub fn invalidate(&mut self, dataset_id: u64) {
        self.cache.retain(|key, _| key.id != dataset_id);
    }

    /// Clears the entire cache.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Removes expired entries.
    pub fn remove_expired(&mut self) {
        let now = Instant::now();
        self.cache
            .retain(|_, entry| now.duration_since(entry.timestamp) < self.ttl);
    }

    /// Gets the current size of the cache.
    pub fn size(&self) -> usize {
        self.cache.len()
    }

    /// Evicts the oldest entry.
    fn evict_oldest(&mut self) {
        if let Some(oldest_key) = self
            .cache
            .iter()
            .min_by_key(|(_, entry)| entry.timestamp)
            .map(|(key, _)| *key)
        {
            self.cache.remove(&oldest_key);
        }
    }

    /// Gets cache statistics.
    pub fn stats(&self) -> CacheStats {
        let total_entries = self.cache.len();
        let expired_entries = self
            .cache
            .values()
            .filter(|entry| entry.timestamp.elapsed() >= self.ttl)
            .count();

        CacheStats {
            total_entries,
            expired_entries,
            active_entries: total_entries - expired_entries,
            hits: self.hits,
            misses: self.misses,
        }
    }
}

/// Statistics about the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Total number of entries
    pub total_entries: usize,
    /// Number of expired entries
    pub expired_entries: usize,
    /// Number of active (non-expired) entries
    pub active_entries: usize,
    /// Lookups through `get_or_analyze` served from the cache
    pub hits: u64,
    /// Lookups through `get_or_analyze` that ran a fresh analysis
    pub misses: u64,
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::new()
    }
}
