use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::HealthResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Liveness plus a read of every collection
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, ApiError> {
    let status = state.dispatcher.status().await?;
    Ok(Json(HealthResponse::ok(status)))
}
