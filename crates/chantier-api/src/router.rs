use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))
        // Worksites
        .route("/api/v1/worksites", get(handlers::list_worksites).post(handlers::report_worksite))
        .route("/api/v1/worksites/check-proximity", get(handlers::check_proximity))
        .route("/api/v1/worksites/nearby", get(handlers::nearby_worksites))
        .route("/api/v1/worksites/geojson", get(handlers::worksites_geojson))
        .route("/api/v1/worksites/{id}/assign", put(handlers::assign_worksite))
        // Agencies
        .route("/api/v1/agencies", get(handlers::list_agencies))
        .route("/api/v1/agencies/nearby", get(handlers::nearby_agencies))
        .route("/api/v1/agencies/{id}/worksites", get(handlers::agency_worksites))
        .route("/api/v1/agencies/{id}/staff", get(handlers::agency_staff))
        // Users
        .route("/api/v1/users/{id}", get(handlers::get_user))
        .route("/api/v1/login", post(handlers::login))
        // Notifications (path segment is the recipient for reads, the notification for writes)
        .route("/api/v1/notifications/{id}", get(handlers::list_notifications))
        .route("/api/v1/notifications/{id}/unread", get(handlers::unread_count))
        .route("/api/v1/notifications/{id}/read", put(handlers::mark_read))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
