//! Stage Cache - bounded in-memory TTL caching with named stages
//!
//! Provides a capacity-bounded cache with lazy TTL expiration and
//! insertion-order eviction, plus a registry that partitions keys into
//! independently sized and expiring stages.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{BoundedTtlCache, CacheRegistry, CacheStats, DEFAULT_STAGE};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::{log_reporter, spawn_stats_reset_task};
