//! In-memory prayer-time cache with staleness-aware lookup.

use crate::cache::stats::{CacheStats, CacheStatsSnapshot};
use crate::cache::types::{CacheConfig, CacheEntry, CacheKey};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

/// Concurrent cache of computed prayer-time sets.
///
/// Keys are computation-deterministic, so `put` is last-writer-wins with
/// no conflict resolution. Stale entries are treated as absent by `get`
/// and lazily evicted; `sweep` evicts them eagerly.
pub struct TimesCache {
    entries: DashMap<CacheKey, CacheEntry>,
    stats: CacheStats,
    capacity: usize,
}

impl TimesCache {
    /// Creates a cache with the given configuration.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            stats: CacheStats::new(),
            capacity: config.capacity.max(1),
        }
    }

    /// Looks up a fresh entry, evaluating staleness against `Utc::now()`.
    pub fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.get_at(key, Utc::now())
    }

    /// Looks up a fresh entry, evaluating staleness against `now`.
    ///
    /// A stale entry counts as a miss and is evicted on the way out.
    pub fn get_at(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<CacheEntry> {
        let stale = match self.entries.get(key) {
            Some(entry) if !entry.is_stale(now) => {
                self.stats.record_hit();
                return Some(entry.clone());
            }
            Some(_) => true,
            None => false,
        };

        if stale {
            self.entries.remove(key);
            self.stats.record_evictions(1);
            debug!(?key, "evicted stale entry on access");
        }
        self.stats.record_miss();
        None
    }

    /// Stores an entry, overwriting any previous value for the key.
    ///
    /// When the cache is over capacity the entries closest to their
    /// staleness horizon are evicted first.
    pub fn put(&self, key: CacheKey, entry: CacheEntry) {
        self.entries.insert(key, entry);
        self.stats.record_insertion();

        while self.entries.len() > self.capacity {
            let victim = self
                .entries
                .iter()
                .min_by_key(|e| e.value().expires_at)
                .map(|e| e.key().clone());
            match victim {
                Some(key) => {
                    self.entries.remove(&key);
                    self.stats.record_evictions(1);
                }
                None => break,
            }
        }
    }

    /// Removes every entry whose key matches the predicate.
    ///
    /// Used for settings changes: e.g. invalidate all entries for a
    /// madhab, or everything for a bucket.
    pub fn invalidate(&self, predicate: impl Fn(&CacheKey) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !predicate(key));
        let removed = before - self.entries.len();
        if removed > 0 {
            self.stats.record_evictions(removed as u64);
            debug!(removed, "invalidated cache entries");
        }
        removed
    }

    /// Evicts every entry that is stale at `now`. Returns the count.
    pub fn sweep(&self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_stale(now));
        let removed = before - self.entries.len();
        if removed > 0 {
            self.stats.record_evictions(removed as u64);
            debug!(removed, "swept stale cache entries");
        }
        removed
    }

    /// Relaxed-key lookup powering the degrade path.
    ///
    /// Finds the entry matching `key` in everything but the date, with the
    /// closest date at or before the requested one. Staleness is ignored:
    /// a stale yesterday is precisely what a degraded result serves.
    pub fn find_fallback(&self, key: &CacheKey) -> Option<(CacheKey, CacheEntry)> {
        self.entries
            .iter()
            .filter(|e| key.same_except_date(e.key()) && e.key().date <= key.date)
            .max_by_key(|e| e.key().date)
            .map(|e| (e.key().clone(), e.value().clone()))
    }

    /// Number of entries currently held (fresh or stale).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Snapshot of the hit/miss/eviction counters.
    pub fn stats(&self) -> CacheStatsSnapshot {
        self.stats.snapshot()
    }
}

impl Default for TimesCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
