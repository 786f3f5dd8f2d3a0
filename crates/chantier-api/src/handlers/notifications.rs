use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chantier_core::models::{Notification, NotificationId, UserId};

use crate::dto::{MarkReadResponse, UnreadResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// Notifications for a user, most recent first
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    Ok(Json(state.dispatcher.notifications_for(&UserId::from(user_id)).await?))
}

pub async fn unread_count(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<UnreadResponse>, ApiError> {
    let unread = state.dispatcher.unread_count(&UserId::from(user_id)).await?;
    Ok(Json(UnreadResponse { unread }))
}

/// Always succeeds for well-formed requests, even for unknown ids
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MarkReadResponse>, ApiError> {
    let changed = state.dispatcher.mark_notification_read(&NotificationId::from(id)).await?;
    Ok(Json(MarkReadResponse { success: true, changed }))
}
