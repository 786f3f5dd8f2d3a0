use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chantier_core::models::{User, UserId};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.dispatcher.get_user(&UserId::from(id)).await?))
}
