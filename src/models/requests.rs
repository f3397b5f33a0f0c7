//! Request DTOs for the stage cache API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::cache::{MAX_KEY_LENGTH, MAX_STAGE_NAME_LENGTH, MAX_VALUE_SIZE};

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: The value to store
/// - `ttl`: Optional TTL in seconds (uses the configured default if absent)
/// - `stage`: Optional stage name (default stage if absent or empty)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub ttl: Option<u64>,
    #[serde(default)]
    pub stage: Option<String>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if let Some(msg) = validate_key(&self.key) {
            return Some(msg);
        }
        if self.value.len() > MAX_VALUE_SIZE {
            return Some(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            ));
        }
        if self.ttl == Some(0) {
            return Some("TTL must be greater than zero seconds".to_string());
        }
        self.stage.as_deref().and_then(validate_stage)
    }
}

/// Query string accepted by GET /get/:key
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StageQuery {
    #[serde(default)]
    pub stage: Option<String>,
}

/// Request body for PUT /stages/:stage
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStageRequest {
    /// Maximum entries for the stage
    pub capacity: usize,
    /// Replace an existing stage, dropping its entries and counters
    #[serde(default)]
    pub overwrite: bool,
}

impl CreateStageRequest {
    pub fn validate(&self) -> Option<String> {
        if self.capacity == 0 {
            return Some("Capacity must be greater than zero".to_string());
        }
        None
    }
}

/// Checks a key against the API limits.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}

/// Checks a stage name against the API limits. Empty means the default stage.
pub fn validate_stage(stage: &str) -> Option<String> {
    if stage.len() > MAX_STAGE_NAME_LENGTH {
        return Some(format!(
            "Stage name exceeds maximum length of {} bytes",
            MAX_STAGE_NAME_LENGTH
        ));
    }
    None
}
