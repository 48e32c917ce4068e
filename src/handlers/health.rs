//! Liveness endpoints.

use crate::{error::AppError, state::AppState};
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    /// Open connections in the pool, busy or idle
    pub pool_size: u32,
    pub pool_idle: usize,
    pub timestamp: DateTime<Utc>,
}

/// `GET /health`
///
/// Runs `SELECT 1` through the pool; a database failure becomes the standard
/// 500 error body.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    sqlx::query("SELECT 1").execute(&state.pool).await?;

    Ok(Json(HealthResponse {
        status: "healthy",
        database: "connected",
        pool_size: state.pool.size(),
        pool_idle: state.pool.num_idle(),
        timestamp: Utc::now(),
    }))
}

/// Plain-text banner on `GET /`.
pub async fn root() -> &'static str {
    "Dreamcatcher API is running!"
}
