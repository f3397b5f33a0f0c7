//! API Module
//!
//! HTTP handlers and routing for the stage cache REST API.
//!
//! # Endpoints
//! - `PUT /set` - Store a key-value pair
//! - `GET /get/:key` - Retrieve a value by key
//! - `PUT /stages/:stage` - Create a stage
//! - `GET /stats` - Get statistics of every stage
//! - `GET /stats/:stage` - Get statistics of one stage
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
