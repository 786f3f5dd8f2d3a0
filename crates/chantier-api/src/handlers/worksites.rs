use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chantier_core::locator::Ranked;
use chantier_core::models::{UserId, Worksite, WorksiteId};
use geojson::FeatureCollection;

use crate::dto::{
    AssignRequest, AssignResponse, NearbyQuery, PointQuery, ProximityResponse,
    ReportResponse, ReportWorksiteRequest, WorksiteFilter,
};
use crate::error::ApiError;
use crate::extract::ApiQuery;
use crate::services::export::worksites_to_geojson;
use crate::state::AppState;

pub async fn report_worksite(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReportWorksiteRequest>,
) -> Result<(StatusCode, Json<ReportResponse>), ApiError> {
    tracing::info!(
        lat = request.lat,
        lon = request.lon,
        reported_by = %request.reported_by,
        "Reporting worksite"
    );

    let report = request.into_report()?;
    let outcome = state.dispatcher.report_worksite(report).await?;

    Ok((StatusCode::CREATED, Json(ReportResponse::from(outcome))))
}

pub async fn check_proximity(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<PointQuery>,
) -> Result<Json<ProximityResponse>, ApiError> {
    let found = state.dispatcher.check_proximity(query.coordinate()?).await?;
    Ok(Json(ProximityResponse::from(found)))
}

pub async fn assign_worksite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<AssignRequest>,
) -> Result<Json<AssignResponse>, ApiError> {
    tracing::info!(worksite_id = %id, assignee = %request.assignee_id, "Assigning worksite");

    let assignee = state
        .dispatcher
        .resolve_assignee(UserId::from(request.assignee_id), request.assignee_name)
        .await?;
    let outcome = state.dispatcher.assign_worksite(&WorksiteId::from(id), assignee).await?;

    Ok(Json(AssignResponse::from(outcome)))
}

pub async fn list_worksites(
    State(state): State<Arc<AppState>>,
    ApiQuery(filter): ApiQuery<WorksiteFilter>,
) -> Result<Json<Vec<Worksite>>, ApiError> {
    tracing::info!(status = ?filter.status, "Listing worksites");

    let worksites = match filter.status {
        Some(status) => state.dispatcher.worksites_with_status(status).await?,
        None => state.dispatcher.list_worksites().await?,
    };
    Ok(Json(worksites))
}

pub async fn nearby_worksites(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<NearbyQuery>,
) -> Result<Json<Vec<Ranked<Worksite>>>, ApiError> {
    let nearby = state.dispatcher.nearby_worksites(query.coordinate()?, query.radius).await?;
    Ok(Json(nearby))
}

pub async fn worksites_geojson(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FeatureCollection>, ApiError> {
    let worksites = state.dispatcher.list_worksites().await?;
    Ok(Json(worksites_to_geojson(&worksites)))
}
