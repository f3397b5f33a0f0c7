//! API Routes
//!
//! Configures the Axum router with all stage cache endpoints.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_stage_handler, get_handler, health_handler, reset_stats_handler, set_handler,
    stage_stats_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /set` - Store a key-value pair, optionally in a named stage
/// - `GET /get/:key?stage=` - Retrieve a value by key
/// - `PUT /stages/:stage` - Create a stage with its own capacity
/// - `GET /stats` - Counters of every stage
/// - `DELETE /stats` - Zero the counters of every stage
/// - `GET /stats/:stage` - Counters of one stage
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", put(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/stages/:stage", put(create_stage_handler))
        .route("/stats", get(stats_handler).delete(reset_stats_handler))
        .route("/stats/:stage", get(stage_stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
