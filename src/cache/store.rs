//! Bounded TTL Cache Module
//!
//! Single-namespace cache engine: insertion-ordered storage, oldest-first
//! eviction and lazy TTL expiration.

use lru::LruCache;
use tracing::debug;

use crate::cache::clock::{system_clock, SharedClock};
use crate::cache::{CacheEntry, CacheStats, DEFAULT_TTL_SECONDS};
use crate::error::{CacheError, Result};

// == Bounded TTL Cache ==
/// Key/value store holding at most `capacity` entries, each with its own TTL.
///
/// When full, `set` evicts the oldest inserted entry. Reads never reorder
/// entries and never extend a TTL. Expired entries are removed only when a
/// `get` observes them.
#[derive(Debug)]
pub struct BoundedTtlCache {
    /// Entries in insertion order. Only `put` moves a key to the newest end;
    /// reads go through `peek` so the order never changes on access.
    entries: LruCache<String, CacheEntry>,
    /// Counters since the last reset
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Source of "now" for every expiration decision
    clock: SharedClock,
}

impl BoundedTtlCache {
    // == Constructor ==
    /// Creates an empty cache reading time from the system clock.
    ///
    /// # Errors
    /// `CacheError::Configuration` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_clock(capacity, system_clock())
    }

    /// Creates an empty cache reading time from `clock`.
    pub fn with_clock(capacity: usize, clock: SharedClock) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::Configuration(
                "Cache capacity must be greater than zero".to_string(),
            ));
        }

        // Capacity is enforced in `set` so every eviction is counted
        Ok(Self {
            entries: LruCache::unbounded(),
            stats: CacheStats::new(),
            capacity,
            clock,
        })
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl_seconds` (default 60).
    ///
    /// Any previous entry for `key` is dropped first, so an overwrite never
    /// counts twice toward capacity and moves the key to the newest position.
    ///
    /// # Errors
    /// `CacheError::InvalidArgument` if `ttl_seconds` is `Some(0)`. The cache
    /// is left untouched in that case.
    pub fn set(&mut self, key: String, value: String, ttl_seconds: Option<u64>) -> Result<()> {
        let ttl = ttl_seconds.unwrap_or(DEFAULT_TTL_SECONDS);
        if ttl == 0 {
            return Err(CacheError::InvalidArgument(
                "TTL must be greater than zero seconds".to_string(),
            ));
        }

        self.entries.pop(&key);

        if self.entries.len() >= self.capacity {
            self.evict_oldest();
        }

        let now = self.clock.now_ms();
        let entry = CacheEntry::new(value, ttl, now);
        debug!(key = %key, expires_at = entry.expires_at, "cache set");

        self.entries.put(key, entry);
        self.stats.record_set();

        Ok(())
    }

    // == Get ==
    /// Returns the live value for `key`, or `None` if absent or expired.
    ///
    /// An expired entry is removed as a side effect of being observed.
    pub fn get(&mut self, key: &str) -> Option<String> {
        self.get_with_ttl(key).map(|(value, _)| value)
    }

    /// Same as [`get`](Self::get), also returning the whole seconds the value
    /// has left to live (rounded up).
    pub fn get_with_ttl(&mut self, key: &str) -> Option<(String, u64)> {
        let now = self.clock.now_ms();

        let live = match self.entries.peek(key) {
            None => {
                self.stats.record_miss();
                return None;
            }
            Some(entry) if entry.is_expired_at(now) => {
                debug!(
                    key = %key,
                    expired_ms_ago = now - entry.expires_at,
                    "cache get found expired entry"
                );
                None
            }
            Some(entry) => Some((entry.value.clone(), entry.ttl_remaining(now))),
        };

        match live {
            Some(found) => {
                self.stats.record_hit();
                Some(found)
            }
            None => {
                self.entries.pop(key);
                self.stats.record_expired();
                None
            }
        }
    }

    // == Contains Live ==
    /// Checks for a live entry without touching counters or removing anything.
    pub fn contains_live(&self, key: &str) -> bool {
        let now = self.clock.now_ms();
        self.entries
            .peek(key)
            .is_some_and(|entry| !entry.is_expired_at(now))
    }

    // == Stats ==
    /// Returns the current counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Zeroes all counters.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
        debug!("cache stats reset");
    }

    /// Returns the current counters and zeroes them in the same step.
    pub fn snapshot_and_reset_stats(&mut self) -> CacheStats {
        self.stats.take()
    }

    /// Human-readable form of the current counters.
    pub fn format_stats(&self) -> String {
        self.stats.to_string()
    }

    // == Length ==
    /// Number of stored entries, including expired ones not yet observed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn evict_oldest(&mut self) {
        if let Some((victim, _)) = self.entries.pop_lru() {
            self.stats.record_eviction();
            debug!(key = %victim, capacity = self.capacity, "cache at capacity, evicted oldest entry");
        }
    }
}
