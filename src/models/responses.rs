//! Response DTOs for the stage cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cache::StageStats;

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub key: String,
    pub value: String,
    /// Stage the value was read from
    pub stage: String,
    /// Seconds until the value expires
    pub ttl: u64,
}

impl GetResponse {
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        stage: impl Into<String>,
        ttl: u64,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            stage: stage.into(),
            ttl,
        }
    }
}

/// Response body for the SET operation (PUT /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    pub key: String,
    pub stage: String,
}

impl SetResponse {
    pub fn new(key: impl Into<String>, stage: impl Into<String>) -> Self {
        let key = key.into();
        let stage = stage.into();
        Self {
            message: format!("Key '{}' set successfully in stage '{}'", key, stage),
            key,
            stage,
        }
    }
}

/// Response body for stage creation (PUT /stages/:stage)
#[derive(Debug, Clone, Serialize)]
pub struct StageResponse {
    pub message: String,
    pub stage: String,
    /// Capacity the stage actually has after the call
    pub capacity: usize,
}

impl StageResponse {
    pub fn new(stage: impl Into<String>, capacity: usize) -> Self {
        let stage = stage.into();
        Self {
            message: format!("Stage '{}' ready", stage),
            stage,
            capacity,
        }
    }
}

/// Response body for a single stage's stats (GET /stats/:stage)
#[derive(Debug, Clone, Serialize)]
pub struct StageStatsResponse {
    pub stage: String,
    #[serde(flatten)]
    pub stats: StageStats,
    /// hits / lookups
    pub hit_rate: f64,
}

impl StageStatsResponse {
    pub fn new(stage: impl Into<String>, stats: StageStats) -> Self {
        Self {
            stage: stage.into(),
            hit_rate: stats.counters.hit_rate(),
            stats,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Stats of every stage, keyed by stage name
    pub stages: BTreeMap<String, StageStats>,
    /// Sum of stored entries across stages
    pub total_entries: usize,
}

impl StatsResponse {
    pub fn new(stages: BTreeMap<String, StageStats>) -> Self {
        let total_entries = stages.values().map(|s| s.entries).sum();
        Self {
            stages,
            total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
