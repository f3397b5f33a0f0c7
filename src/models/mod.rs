//! Request and Response models for the stage cache API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CreateStageRequest, SetRequest, StageQuery};
pub use responses::{
    GetResponse, HealthResponse, SetResponse, StageResponse, StageStatsResponse, StatsResponse,
};
