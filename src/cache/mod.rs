//! Cache Module
//!
//! Bounded in-memory caching with TTL expiration, insertion-order eviction
//! and stage-partitioned routing.

mod clock;
mod entry;
mod registry;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, system_clock, Clock, ManualClock, SharedClock, SystemClock};
pub use entry::CacheEntry;
pub use registry::{stage_name, CacheRegistry, SharedCache, StageStats, DEFAULT_STAGE};
pub use stats::CacheStats;
pub use store::BoundedTtlCache;

// == Public Constants ==
/// TTL applied when `set` is called without one
pub const DEFAULT_TTL_SECONDS: u64 = 60;

/// Maximum allowed key length in bytes, enforced at the API boundary
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes, enforced at the API boundary
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

/// Maximum allowed stage name length in bytes, enforced at the API boundary
pub const MAX_STAGE_NAME_LENGTH: usize = 64;
