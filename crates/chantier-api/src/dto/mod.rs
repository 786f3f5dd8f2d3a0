mod request;
mod response;

pub use request::{
    AssignRequest, LoginRequest, NearbyQuery, PointQuery, ReportWorksiteRequest, WorksiteFilter,
};
pub use response::{
    AssignResponse, HealthResponse, LoginResponse, MarkReadResponse, ProximityResponse,
    ReportResponse, UnreadResponse,
};
