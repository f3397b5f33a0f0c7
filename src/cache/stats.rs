//! Cache Statistics Module
//!
//! Operation counters for a single cache, reset together on each stats cycle.

use std::fmt;

use serde::Serialize;

// == Cache Stats ==
/// Operation counters since the last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of `set` calls (inserts and overwrites)
    pub set_count: u64,
    /// Number of `get` calls that returned a live value
    pub hit_count: u64,
    /// Number of `get` calls for a key that was not present
    pub miss_count: u64,
    /// Number of `get` calls that found an expired entry and removed it
    pub expired_count: u64,
    /// Number of entries dropped to make room for a new one
    pub eviction_count: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses + expired), or 0.0 with no lookups.
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.lookups();
        if lookups == 0 {
            0.0
        } else {
            self.hit_count as f64 / lookups as f64
        }
    }

    /// Total number of `get` calls counted.
    pub fn lookups(&self) -> u64 {
        self.hit_count + self.miss_count + self.expired_count
    }

    pub fn record_set(&mut self) {
        self.set_count += 1;
    }

    pub fn record_hit(&mut self) {
        self.hit_count += 1;
    }

    pub fn record_miss(&mut self) {
        self.miss_count += 1;
    }

    pub fn record_expired(&mut self) {
        self.expired_count += 1;
    }

    pub fn record_eviction(&mut self) {
        self.eviction_count += 1;
    }

    // == Reset ==
    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // == Take ==
    /// Returns the current counters and zeroes them in one step.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CacheStats {{ set_count: {}, hit_count: {}, miss_count: {}, expired_count: {}, eviction_count: {} }}",
            self.set_count, self.hit_count, self.miss_count, self.expired_count, self.eviction_count
        )
    }
}
