//! Cache Registry Module
//!
//! Routes keys to independent [`BoundedTtlCache`] instances by stage name.
//! Each stage owns its own capacity, entries and counters; nothing is shared
//! between stages except the default capacity used for lazily created ones
//! and an optional cap on how many stages may exist.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::clock::{system_clock, SharedClock};
use crate::cache::{BoundedTtlCache, CacheStats};
use crate::error::{CacheError, Result};

/// Stage used when a caller does not name one.
pub const DEFAULT_STAGE: &str = "default";

/// A stage cache behind its own lock.
pub type SharedCache = Arc<RwLock<BoundedTtlCache>>;

// == Stage Stats ==
/// Counters of one stage plus its current size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageStats {
    #[serde(flatten)]
    pub counters: CacheStats,
    /// Stored entries, including expired ones not yet observed
    pub entries: usize,
    pub capacity: usize,
}

// == Cache Registry ==
/// Stage name to cache mapping with lazy stage creation on write.
#[derive(Debug)]
pub struct CacheRegistry {
    /// Stage caches, each independently locked
    caches: RwLock<HashMap<String, SharedCache>>,
    /// Capacity given to stages created by `set`
    default_capacity: usize,
    /// Upper bound on the number of stages, lazily created or not
    max_stages: usize,
    clock: SharedClock,
}

impl CacheRegistry {
    // == Constructor ==
    /// Creates an empty registry.
    ///
    /// # Errors
    /// `CacheError::Configuration` if `default_capacity` is zero.
    pub fn new(default_capacity: usize) -> Result<Self> {
        Self::with_clock(default_capacity, system_clock())
    }

    /// Creates an empty registry whose stages all read time from `clock`.
    pub fn with_clock(default_capacity: usize, clock: SharedClock) -> Result<Self> {
        if default_capacity == 0 {
            return Err(CacheError::Configuration(
                "Default stage capacity must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            caches: RwLock::new(HashMap::new()),
            default_capacity,
            max_stages: usize::MAX,
            clock,
        })
    }

    /// Caps the number of stages. Creating one more fails with
    /// `CacheError::StageLimitReached`; existing stages are unaffected.
    pub fn with_max_stages(mut self, max_stages: usize) -> Self {
        self.max_stages = max_stages;
        self
    }

    pub fn default_capacity(&self) -> usize {
        self.default_capacity
    }

    // == Get ==
    /// Looks up `key` in `stage` (default stage when `None` or empty).
    ///
    /// An unknown stage yields `None` without creating anything.
    pub async fn get(&self, key: &str, stage: Option<&str>) -> Option<String> {
        let cache = self.lookup(stage_name(stage)).await?;
        let mut cache = cache.write().await;
        cache.get(key)
    }

    /// Same as [`get`](Self::get), also returning the seconds left to live.
    pub async fn get_with_ttl(&self, key: &str, stage: Option<&str>) -> Option<(String, u64)> {
        let cache = self.lookup(stage_name(stage)).await?;
        let mut cache = cache.write().await;
        cache.get_with_ttl(key)
    }

    // == Set ==
    /// Stores `value` under `key` in `stage`, creating the stage with the
    /// default capacity on first write.
    ///
    /// # Errors
    /// `CacheError::StageLimitReached` if the stage is new and the registry
    /// already holds `max_stages` stages.
    pub async fn set(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
        ttl_seconds: Option<u64>,
        stage: Option<&str>,
    ) -> Result<()> {
        let cache = self.get_or_create(stage_name(stage)).await?;
        let mut cache = cache.write().await;
        cache.set(key.into(), value.into(), ttl_seconds)
    }

    // == Create Stage ==
    /// Creates `stage` with its own `capacity`.
    ///
    /// If the stage exists, it is kept as is unless `overwrite_existing` is
    /// set, in which case it is replaced by an empty cache and its entries and
    /// counters are lost.
    pub async fn create_stage(
        &self,
        stage: &str,
        capacity: usize,
        overwrite_existing: bool,
    ) -> Result<()> {
        let stage = stage_name(Some(stage));
        let mut caches = self.caches.write().await;

        let exists = caches.contains_key(stage);
        if exists && !overwrite_existing {
            debug!(stage = %stage, "stage already exists, keeping it");
            return Ok(());
        }
        if !exists {
            self.check_stage_limit(stage, caches.len())?;
        }

        let cache = self.new_cache(capacity)?;
        let replaced = caches.insert(stage.to_string(), cache).is_some();
        info!(stage = %stage, capacity, replaced, "stage created");
        Ok(())
    }

    // == Stats ==
    /// Returns the counters and size of one stage.
    pub async fn stage_stats(&self, stage: &str) -> Option<StageStats> {
        let cache = self.lookup(stage_name(Some(stage))).await?;
        let cache = cache.read().await;
        Some(stage_stats_of(&cache))
    }

    /// Returns counters and size of every stage, ordered by name.
    pub async fn all_stats(&self) -> BTreeMap<String, StageStats> {
        let mut out = BTreeMap::new();
        for (name, cache) in self.snapshot_caches().await {
            let cache = cache.read().await;
            out.insert(name, stage_stats_of(&cache));
        }
        out
    }

    /// Zeroes the counters of every stage.
    pub async fn reset_all_stats(&self) {
        for (_, cache) in self.snapshot_caches().await {
            cache.write().await.reset_stats();
        }
    }

    /// Reads and zeroes the counters of every stage, one stage lock at a time.
    pub async fn snapshot_and_reset_all(&self) -> BTreeMap<String, CacheStats> {
        let mut out = BTreeMap::new();
        for (name, cache) in self.snapshot_caches().await {
            let stats = cache.write().await.snapshot_and_reset_stats();
            out.insert(name, stats);
        }
        out
    }

    /// Names of all known stages, sorted.
    pub async fn stage_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.caches.read().await.keys().cloned().collect();
        names.sort();
        names
    }

    // == Internals ==
    async fn lookup(&self, stage: &str) -> Option<SharedCache> {
        self.caches.read().await.get(stage).cloned()
    }

    async fn get_or_create(&self, stage: &str) -> Result<SharedCache> {
        if let Some(cache) = self.lookup(stage).await {
            return Ok(cache);
        }

        let mut caches = self.caches.write().await;
        // Another writer may have created it between the two locks
        if let Some(cache) = caches.get(stage) {
            return Ok(Arc::clone(cache));
        }

        self.check_stage_limit(stage, caches.len())?;
        let cache = self.new_cache(self.default_capacity)?;
        caches.insert(stage.to_string(), Arc::clone(&cache));
        info!(stage = %stage, capacity = self.default_capacity, "stage created on first write");
        Ok(cache)
    }

    fn check_stage_limit(&self, stage: &str, current: usize) -> Result<()> {
        if current >= self.max_stages {
            warn!(stage = %stage, max_stages = self.max_stages, "stage limit reached");
            return Err(CacheError::StageLimitReached(format!(
                "cannot create stage '{}', limit of {} stages reached",
                stage, self.max_stages
            )));
        }
        Ok(())
    }

    fn new_cache(&self, capacity: usize) -> Result<SharedCache> {
        let cache = BoundedTtlCache::with_clock(capacity, Arc::clone(&self.clock))?;
        Ok(Arc::new(RwLock::new(cache)))
    }

    /// Clones the stage handles so no stage lock is taken under the map lock.
    async fn snapshot_caches(&self) -> Vec<(String, SharedCache)> {
        self.caches
            .read()
            .await
            .iter()
            .map(|(name, cache)| (name.clone(), Arc::clone(cache)))
            .collect()
    }
}

/// Maps a missing or empty stage name to [`DEFAULT_STAGE`].
pub fn stage_name(stage: Option<&str>) -> &str {
    match stage {
        Some(name) if !name.is_empty() => name,
        _ => DEFAULT_STAGE,
    }
}

fn stage_stats_of(cache: &BoundedTtlCache) -> StageStats {
    StageStats {
        counters: cache.stats(),
        entries: cache.len(),
        capacity: cache.capacity(),
    }
}
