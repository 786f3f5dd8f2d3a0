use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::coordinate::{Coordinate, Located};
use super::ids::{AgencyId, UserId, WorksiteId};

/// Lifecycle state of a worksite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorksiteStatus {
    /// Reported, waiting for a director to assign it
    #[default]
    #[serde(alias = "nouveau")]
    New,
    /// Handed to a member of field staff
    #[serde(alias = "affecté", alias = "affecte")]
    Assigned,
}

impl WorksiteStatus {
    /// Check if a transition is allowed.
    ///
    /// `Assigned -> Assigned` is a re-assignment; whether it is accepted is
    /// decided by the caller's `ReassignPolicy`.
    pub fn can_transition_to(self, to: WorksiteStatus) -> bool {
        matches!(
            (self, to),
            (WorksiteStatus::New, WorksiteStatus::Assigned)
                | (WorksiteStatus::Assigned, WorksiteStatus::Assigned)
        )
    }

    /// Get allowed next states
    pub fn allowed_next_states(self) -> Vec<WorksiteStatus> {
        match self {
            WorksiteStatus::New => vec![WorksiteStatus::Assigned],
            WorksiteStatus::Assigned => vec![WorksiteStatus::Assigned],
        }
    }
}

impl fmt::Display for WorksiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorksiteStatus::New => f.write_str("new"),
            WorksiteStatus::Assigned => f.write_str("assigned"),
        }
    }
}

/// A reported worksite ("chantier")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worksite {
    pub id: WorksiteId,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub description: String,
    /// Opaque reference to an uploaded photo
    #[serde(default)]
    pub photo: Option<String>,
    pub reported_by: UserId,
    #[serde(default)]
    pub reported_by_name: String,
    pub reported_at: DateTime<Utc>,
    #[serde(default)]
    pub status: WorksiteStatus,
    /// Nearest agency at creation time; `None` only if no agency existed
    #[serde(default, alias = "agenceId")]
    pub agency_id: Option<AgencyId>,
    #[serde(default, alias = "agenceName")]
    pub agency_name: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<UserId>,
    #[serde(default)]
    pub assigned_to_name: Option<String>,
    #[serde(default)]
    pub assigned_at: Option<DateTime<Utc>>,
}

impl Worksite {
    pub fn is_assigned(&self) -> bool {
        self.status == WorksiteStatus::Assigned
    }
}

impl Located for Worksite {
    fn coordinate(&self) -> Coordinate {
        Coordinate::new_unchecked(self.lat, self.lon)
    }
}

/// Input for a new worksite report
#[derive(Debug, Clone, PartialEq)]
pub struct WorksiteReport {
    pub position: Coordinate,
    pub description: String,
    pub photo: Option<String>,
    pub reporter_id: UserId,
    pub reporter_name: String,
}

/// The member of staff a worksite is handed to
#[derive(Debug, Clone, PartialEq)]
pub struct Assignee {
    pub id: UserId,
    pub name: String,
}

impl Assignee {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}
