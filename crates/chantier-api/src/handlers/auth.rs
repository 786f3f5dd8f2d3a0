use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::{LoginRequest, LoginResponse};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state.dispatcher.login(&request.email, &request.password).await?;
    Ok(Json(LoginResponse { success: true, user }))
}
