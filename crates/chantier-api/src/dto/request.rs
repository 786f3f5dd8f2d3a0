use chantier_core::error::Result;
use chantier_core::models::{Coordinate, UserId, WorksiteReport, WorksiteStatus};
use serde::Deserialize;

/// Worksite report body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportWorksiteRequest {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub description: String,
    /// Opaque reference to an already uploaded photo
    #[serde(default)]
    pub photo: Option<String>,
    pub reported_by: String,
    #[serde(default)]
    pub reported_by_name: String,
}

impl ReportWorksiteRequest {
    pub fn into_report(self) -> Result<WorksiteReport> {
        Ok(WorksiteReport {
            position: Coordinate::try_new(self.lat, self.lon)?,
            description: self.description,
            photo: self.photo,
            reporter_id: UserId::from(self.reported_by),
            reporter_name: self.reported_by_name,
        })
    }
}

/// Assignment body; the name is looked up when omitted
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    #[serde(alias = "atsId")]
    pub assignee_id: String,
    #[serde(default, alias = "atsName")]
    pub assignee_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `?lat=..&lon=..`
#[derive(Debug, Deserialize)]
pub struct PointQuery {
    pub lat: f64,
    pub lon: f64,
}

impl PointQuery {
    pub fn coordinate(&self) -> Result<Coordinate> {
        Coordinate::try_new(self.lat, self.lon)
    }
}

/// `?lat=..&lon=..&radius=..` with the radius in kilometres
#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lon: f64,
    pub radius: Option<f64>,
}

impl NearbyQuery {
    pub fn coordinate(&self) -> Result<Coordinate> {
        Coordinate::try_new(self.lat, self.lon)
    }
}

/// Optional filters on the worksite listing
#[derive(Debug, Default, Deserialize)]
pub struct WorksiteFilter {
    pub status: Option<WorksiteStatus>,
}
