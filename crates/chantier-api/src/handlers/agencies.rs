use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chantier_core::locator::Ranked;
use chantier_core::models::{Agency, AgencyId, User, Worksite};

use crate::dto::NearbyQuery;
use crate::error::ApiError;
use crate::extract::ApiQuery;
use crate::state::AppState;

pub async fn list_agencies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Agency>>, ApiError> {
    Ok(Json(state.dispatcher.list_agencies().await?))
}

pub async fn nearby_agencies(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<NearbyQuery>,
) -> Result<Json<Vec<Ranked<Agency>>>, ApiError> {
    let nearby = state.dispatcher.nearby_agencies(query.coordinate()?, query.radius).await?;
    Ok(Json(nearby))
}

/// Worksites routed to an agency; an unknown agency id is a 404
pub async fn agency_worksites(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Worksite>>, ApiError> {
    tracing::info!(agency_id = %id, "Listing agency worksites");
    Ok(Json(state.dispatcher.agency_worksites(&AgencyId::from(id)).await?))
}

/// Field staff (ATS) of an agency, without credentials
pub async fn agency_staff(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.dispatcher.agency_staff(&AgencyId::from(id)).await?))
}
