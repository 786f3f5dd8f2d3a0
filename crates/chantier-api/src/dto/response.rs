use chantier_core::locator::Ranked;
use chantier_core::models::{Agency, User, UserId, Worksite};
use chantier_dispatch::{AssignOutcome, ReportOutcome, StoreStatus};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub collections: StoreStatus,
}

impl HealthResponse {
    pub fn ok(collections: StoreStatus) -> Self {
        Self { status: "ok", service: "chantier-api", collections }
    }
}

/// Stored report
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub success: bool,
    pub worksite: Worksite,
    pub nearest_agency: Option<Ranked<Agency>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_error: Option<String>,
}

impl From<ReportOutcome> for ReportResponse {
    fn from(outcome: ReportOutcome) -> Self {
        Self {
            success: true,
            worksite: outcome.worksite,
            nearest_agency: outcome.nearest_agency,
            notification_error: outcome.notification_error,
        }
    }
}

/// Duplicate check result
#[derive(Debug, Serialize)]
pub struct ProximityResponse {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worksite: Option<Worksite>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<Option<Worksite>> for ProximityResponse {
    fn from(found: Option<Worksite>) -> Self {
        match found {
            Some(worksite) => Self {
                exists: true,
                worksite: Some(worksite),
                message: Some("A worksite already exists within 200 m of this position".into()),
            },
            None => Self { exists: false, worksite: None, message: None },
        }
    }
}

/// Stored assignment
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignResponse {
    pub success: bool,
    pub worksite: Worksite,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_assignee: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_error: Option<String>,
}

impl From<AssignOutcome> for AssignResponse {
    fn from(outcome: AssignOutcome) -> Self {
        Self {
            success: true,
            worksite: outcome.worksite,
            previous_assignee: outcome.previous_assignee,
            notification_error: outcome.notification_error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: User,
}

/// Mark-read acknowledgement; `changed` is false for unknown or already read ids
#[derive(Debug, Serialize)]
pub struct MarkReadResponse {
    pub success: bool,
    pub changed: bool,
}

#[derive(Debug, Serialize)]
pub struct UnreadResponse {
    pub unread: usize,
}
