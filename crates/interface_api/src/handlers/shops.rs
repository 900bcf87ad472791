//! Repair shop handlers

use axum::{extract::State, Json};

use crate::dto::shops::RepairShopsResponse;
use crate::{error::ApiError, AppState};

/// Lists the repair shops approved for claim work
pub async fn approved_repair_shops(
    State(state): State<AppState>,
) -> Result<Json<RepairShopsResponse>, ApiError> {
    let repair_shops = state.store.approved_repair_shops().await?;

    Ok(Json(RepairShopsResponse {
        success: true,
        repair_shops,
    }))
}
