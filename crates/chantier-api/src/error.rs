use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chantier_core::error::ChantierError;
use chantier_core::models::Worksite;
use serde::Serialize;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
    /// The conflicting record for duplicate reports
    pub existing: Option<Box<Worksite>>,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), details: None, existing: None }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_existing(mut self, existing: Box<Worksite>) -> Self {
        self.existing = Some(existing);
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    existing_worksite: Option<Box<Worksite>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            details: self.details,
            existing_worksite: self.existing,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ChantierError> for ApiError {
    fn from(err: ChantierError) -> Self {
        let details = err.to_string();
        match err {
            ChantierError::DuplicateNearby { existing } => {
                Self::conflict("A worksite already exists nearby").with_existing(existing)
            }
            ChantierError::AlreadyAssigned { .. } => {
                Self::conflict("Worksite already assigned").with_details(details)
            }
            ChantierError::WorksiteNotFound { .. } => Self::not_found("Worksite not found"),
            ChantierError::UserNotFound { .. } => Self::not_found("User not found"),
            ChantierError::AgencyNotFound { .. } => Self::not_found("Agency not found"),
            ChantierError::InvalidCoordinate { .. } => {
                Self::bad_request("Invalid coordinate").with_details(details)
            }
            ChantierError::InvalidRadius { .. } => {
                Self::bad_request("Invalid radius").with_details(details)
            }
            ChantierError::InvalidCredentials => Self::unauthorized("Invalid credentials"),
            ChantierError::StoreUnavailable { .. }
            | ChantierError::DataDirNotFound { .. }
            | ChantierError::Io(_)
            | ChantierError::Serialization(_) => {
                tracing::error!(error = %details, "Store failure");
                Self::unavailable("Store unavailable").with_details(details)
            }
            ChantierError::ConfigInvalid { .. } => {
                tracing::error!(error = %details, "Configuration error");
                Self::internal("Internal error").with_details(details)
            }
        }
    }
}
