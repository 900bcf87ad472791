//! Health check handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use core_kernel::HealthCheckable;

use crate::{error::ApiError, AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// Service banner
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Claims Processing API".to_string(),
    })
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check (includes the claim store)
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, ApiError> {
    let health = state.store.health_check().await;
    if !health.is_ready() {
        return Err(ApiError::Unavailable(
            health
                .message
                .unwrap_or_else(|| format!("{} is not ready", health.adapter_id)),
        ));
    }

    Ok(Json(HealthResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
