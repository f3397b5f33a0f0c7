//! API Handlers
//!
//! HTTP request handlers for each stage cache endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::cache::{stage_name, CacheRegistry};
use crate::error::{CacheError, Result};
use crate::models::{
    requests::{validate_key, validate_stage},
    CreateStageRequest, GetResponse, HealthResponse, SetRequest, SetResponse, StageQuery,
    StageResponse, StageStatsResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// The registry does its own locking, so the state only holds an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<CacheRegistry>,
    /// TTL applied when a SET request has none
    pub default_ttl: u64,
}

impl AppState {
    /// Creates a new AppState around an existing registry.
    pub fn new(registry: CacheRegistry, default_ttl: u64) -> Self {
        Self {
            registry: Arc::new(registry),
            default_ttl,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        let registry =
            CacheRegistry::new(config.default_capacity)?.with_max_stages(config.max_stages);
        Ok(Self::new(registry, config.default_ttl))
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair in a stage, creating the stage if needed.
/// Any client can create stages this way, so the registry's stage limit
/// (`MAX_STAGES`) bounds how many exist; past it, writes to a new stage
/// answer 409.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidArgument(error_msg));
    }

    let stage = stage_name(req.stage.as_deref()).to_string();
    let ttl = req.ttl.unwrap_or(state.default_ttl);
    state
        .registry
        .set(req.key.clone(), req.value, Some(ttl), Some(stage.as_str()))
        .await?;

    Ok(Json(SetResponse::new(req.key, stage)))
}

/// Handler for GET /get/:key
///
/// Misses, expired entries and unknown stages all answer 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<StageQuery>,
) -> Result<Json<GetResponse>> {
    check_key(&key)?;
    if let Some(error_msg) = query.stage.as_deref().and_then(validate_stage) {
        return Err(CacheError::InvalidArgument(error_msg));
    }

    let stage = stage_name(query.stage.as_deref()).to_string();
    match state.registry.get_with_ttl(&key, Some(stage.as_str())).await {
        Some((value, ttl)) => Ok(Json(GetResponse::new(key, value, stage, ttl))),
        None => Err(CacheError::KeyNotFound(key)),
    }
}

/// Handler for PUT /stages/:stage
///
/// Creates a stage with its own capacity. Without `overwrite` an existing
/// stage is left as is and its current capacity is reported.
pub async fn create_stage_handler(
    State(state): State<AppState>,
    Path(stage): Path<String>,
    Json(req): Json<CreateStageRequest>,
) -> Result<Json<StageResponse>> {
    if let Some(error_msg) = validate_stage(&stage).or_else(|| req.validate()) {
        return Err(CacheError::InvalidArgument(error_msg));
    }

    state
        .registry
        .create_stage(&stage, req.capacity, req.overwrite)
        .await?;

    let capacity = state
        .registry
        .stage_stats(&stage)
        .await
        .map(|stats| stats.capacity)
        .ok_or_else(|| CacheError::Internal(format!("Stage '{}' missing after create", stage)))?;

    Ok(Json(StageResponse::new(stage, capacity)))
}

/// Handler for GET /stats
///
/// Returns the counters of every stage.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(state.registry.all_stats().await))
}

/// Handler for DELETE /stats
///
/// Zeroes the counters of every stage and returns the cleared stats.
/// Entries are kept.
pub async fn reset_stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    state.registry.reset_all_stats().await;
    Json(StatsResponse::new(state.registry.all_stats().await))
}

/// Handler for GET /stats/:stage
pub async fn stage_stats_handler(
    State(state): State<AppState>,
    Path(stage): Path<String>,
) -> Result<Json<StageStatsResponse>> {
    match state.registry.stage_stats(&stage).await {
        Some(stats) => Ok(Json(StageStatsResponse::new(stage, stats))),
        None => Err(CacheError::StageNotFound(stage)),
    }
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Rejects keys the API would never have accepted on write.
pub fn check_key(key: &str) -> Result<()> {
    match validate_key(key) {
        Some(msg) => Err(CacheError::InvalidArgument(msg)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    fn test_state() -> AppState {
        AppState::new(CacheRegistry::new(100).unwrap(), 300)
    }

    fn set_request(key: &str, value: &str, stage: Option<&str>) -> SetRequest {
        SetRequest {
            key: key.to_string(),
            value: value.to_string(),
            ttl: None,
            stage: stage.map(str::to_string),
        }
    }

    fn stage_query(stage: Option<&str>) -> Query<StageQuery> {
        Query(StageQuery {
            stage: stage.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = test_state();

        let result = set_handler(
            State(state.clone()),
            Json(set_request("test_key", "test_value", None)),
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().stage, "default");

        let response = get_handler(
            State(state.clone()),
            Path("test_key".to_string()),
            stage_query(None),
        )
        .await
        .unwrap();
        assert_eq!(response.value, "test_value");
        assert_eq!(response.stage, "default");
    }

    #[tokio::test]
    async fn test_set_and_get_in_stage() {
        let state = test_state();

        set_handler(State(state.clone()), Json(set_request("k", "v", Some("A"))))
            .await
            .unwrap();

        let other = get_handler(State(state.clone()), Path("k".to_string()), stage_query(Some("B"))).await;
        assert!(matches!(other, Err(CacheError::KeyNotFound(_))));

        let same = get_handler(State(state), Path("k".to_string()), stage_query(Some("A")))
            .await
            .unwrap();
        assert_eq!(same.value, "v");
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = test_state();

        let result = get_handler(State(state), Path("nonexistent".to_string()), stage_query(None)).await;
        assert!(matches!(result, Err(CacheError::KeyNotFound(_))));
    }

    #[tokio::test]
    async fn test_set_uses_configured_default_ttl() {
        let clock = ManualClock::new(0);
        let registry = CacheRegistry::with_clock(100, Arc::new(clock.clone())).unwrap();
        let state = AppState::new(registry, 300);

        set_handler(State(state.clone()), Json(set_request("k", "v", None)))
            .await
            .unwrap();

        clock.advance_secs(299);
        assert!(state.registry.get("k", None).await.is_some());

        clock.advance_secs(1);
        assert!(state.registry.get("k", None).await.is_none());
    }

    #[tokio::test]
    async fn test_create_stage_handler() {
        let state = test_state();

        let created = create_stage_handler(
            State(state.clone()),
            Path("X".to_string()),
            Json(CreateStageRequest { capacity: 5, overwrite: false }),
        )
        .await
        .unwrap();
        assert_eq!(created.capacity, 5);

        let kept = create_stage_handler(
            State(state.clone()),
            Path("X".to_string()),
            Json(CreateStageRequest { capacity: 9, overwrite: false }),
        )
        .await
        .unwrap();
        assert_eq!(kept.capacity, 5, "Existing stage should be kept");

        let replaced = create_stage_handler(
            State(state),
            Path("X".to_string()),
            Json(CreateStageRequest { capacity: 9, overwrite: true }),
        )
        .await
        .unwrap();
        assert_eq!(replaced.capacity, 9);
    }

    #[tokio::test]
    async fn test_create_stage_zero_capacity() {
        let state = test_state();

        let result = create_stage_handler(
            State(state),
            Path("X".to_string()),
            Json(CreateStageRequest { capacity: 0, overwrite: false }),
        )
        .await;
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_stats_handlers() {
        let state = test_state();

        let empty = stats_handler(State(state.clone())).await;
        assert!(empty.stages.is_empty());

        set_handler(State(state.clone()), Json(set_request("k", "v", Some("A"))))
            .await
            .unwrap();

        let all = stats_handler(State(state.clone())).await;
        assert_eq!(all.stages["A"].counters.set_count, 1);
        assert_eq!(all.total_entries, 1);

        let one = stage_stats_handler(State(state.clone()), Path("A".to_string()))
            .await
            .unwrap();
        assert_eq!(one.stats.entries, 1);

        let missing = stage_stats_handler(State(state), Path("nope".to_string())).await;
        assert!(matches!(missing, Err(CacheError::StageNotFound(_))));
    }

    #[tokio::test]
    async fn test_get_handler_reports_ttl() {
        let clock = ManualClock::new(0);
        let registry = CacheRegistry::with_clock(100, Arc::new(clock.clone())).unwrap();
        let state = AppState::new(registry, 300);

        set_handler(State(state.clone()), Json(set_request("k", "v", None)))
            .await
            .unwrap();
        clock.advance_secs(100);

        let response = get_handler(State(state), Path("k".to_string()), stage_query(None))
            .await
            .unwrap();
        assert_eq!(response.ttl, 200);
    }

    #[tokio::test]
    async fn test_set_handler_respects_stage_limit() {
        let registry = CacheRegistry::new(100).unwrap().with_max_stages(1);
        let state = AppState::new(registry, 300);

        set_handler(State(state.clone()), Json(set_request("k", "v", Some("A"))))
            .await
            .unwrap();
        let result = set_handler(State(state.clone()), Json(set_request("k", "v", Some("B")))).await;

        assert!(matches!(result, Err(CacheError::StageLimitReached(_))));
        assert_eq!(state.registry.stage_names().await, vec!["A".to_string()]);
    }

    #[tokio::test]
    async fn test_reset_stats_handler() {
        let state = test_state();

        set_handler(State(state.clone()), Json(set_request("k", "v", Some("A"))))
            .await
            .unwrap();

        let cleared = reset_stats_handler(State(state)).await;
        assert_eq!(cleared.stages["A"].counters.set_count, 0);
        assert_eq!(cleared.total_entries, 1);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let state = test_state();

        let result = set_handler(State(state), Json(set_request("", "value", None))).await;
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
    }

    #[test]
    fn test_check_key() {
        assert!(check_key("fine").is_ok());
        assert!(check_key("").is_err());
        assert!(check_key(&"k".repeat(1000)).is_err());
    }
}
