//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with an absolute
//! expiration time.

// == Cache Entry ==
/// A single cached value and the moment it stops being valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry inserted at `now_ms` that lives for `ttl_seconds`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl_seconds` - Lifetime in seconds
    /// * `now_ms` - Insertion time in Unix milliseconds
    pub fn new(value: String, ttl_seconds: u64, now_ms: u64) -> Self {
        Self {
            value,
            expires_at: now_ms.saturating_add(ttl_seconds.saturating_mul(1000)),
        }
    }

    // == Is Expired ==
    /// Checks whether the entry is expired at `now_ms`.
    ///
    /// An entry is expired once `expires_at <= now`, so a value is never
    /// served at the exact instant its TTL elapses.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        self.expires_at <= now_ms
    }

    // == Time To Live ==
    /// Returns remaining lifetime in seconds at `now_ms`, rounded up so a
    /// live entry never reports 0. Expired entries report 0.
    pub fn ttl_remaining(&self, now_ms: u64) -> u64 {
        self.expires_at.saturating_sub(now_ms).div_ceil(1000)
    }
}
