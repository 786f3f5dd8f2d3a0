use chantier_core::config::ConfigSource;
use chantier_core::locator::Ranked;
use chantier_core::models::{Agency, Notification, User, UserId, Worksite};
use chantier_dispatch::{AssignOutcome, ReportOutcome, StoreStatus};
use serde::Serialize;
use std::collections::BTreeMap;
use tabled::Tabled;

const NONE: &str = "-";

/// Output for init command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitOutput {
    pub data_dir: String,
    pub created: Vec<String>,
}

/// Output for report command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOutput {
    pub worksite: Worksite,
    pub nearest_agency: Option<Ranked<Agency>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_error: Option<String>,
}

impl From<ReportOutcome> for ReportOutput {
    fn from(outcome: ReportOutcome) -> Self {
        Self {
            worksite: outcome.worksite,
            nearest_agency: outcome.nearest_agency,
            notification_error: outcome.notification_error,
        }
    }
}

/// Output for check command
#[derive(Debug, Serialize)]
pub struct ProximityOutput {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worksite: Option<Worksite>,
}

/// Output for assign command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignOutput {
    pub worksite: Worksite,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_assignee: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_error: Option<String>,
}

impl From<AssignOutcome> for AssignOutput {
    fn from(outcome: AssignOutcome) -> Self {
        Self {
            worksite: outcome.worksite,
            previous_assignee: outcome.previous_assignee,
            notification_error: outcome.notification_error,
        }
    }
}

/// Output for status command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusOutput {
    pub storage: String,
    pub data_dir: String,
    pub collections: StoreStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<BTreeMap<String, ConfigEntry>>,
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub value: String,
    pub source: ConfigSource,
}

/// Output for hash-password command
#[derive(Debug, Serialize)]
pub struct HashOutput {
    pub hash: String,
}

/// Output for read command
#[derive(Debug, Serialize)]
pub struct ReadOutput {
    pub id: String,
    pub changed: bool,
}

#[derive(Debug, Tabled)]
pub struct WorksiteRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Position")]
    pub position: String,
    #[tabled(rename = "Distance")]
    pub distance: String,
    #[tabled(rename = "Agency")]
    pub agency: String,
    #[tabled(rename = "Assigned to")]
    pub assigned_to: String,
    #[tabled(rename = "Reported by")]
    pub reported_by: String,
    #[tabled(rename = "Description")]
    pub description: String,
}

impl WorksiteRow {
    pub fn new(worksite: &Worksite, distance_km: Option<f64>) -> Self {
        Self {
            id: worksite.id.to_string(),
            status: worksite.status.to_string(),
            position: format!("{:.5}, {:.5}", worksite.lat, worksite.lon),
            distance: format_distance(distance_km),
            agency: worksite.agency_name.clone().unwrap_or_else(|| NONE.to_string()),
            assigned_to: worksite.assigned_to_name.clone().unwrap_or_else(|| NONE.to_string()),
            reported_by: worksite.reported_by_name.clone(),
            description: truncate(&worksite.description, 40),
        }
    }
}

impl From<&Worksite> for WorksiteRow {
    fn from(worksite: &Worksite) -> Self {
        Self::new(worksite, None)
    }
}

impl From<&Ranked<Worksite>> for WorksiteRow {
    fn from(ranked: &Ranked<Worksite>) -> Self {
        Self::new(&ranked.item, Some(ranked.distance_km))
    }
}

#[derive(Debug, Tabled)]
pub struct AgencyRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Position")]
    pub position: String,
    #[tabled(rename = "Distance")]
    pub distance: String,
    #[tabled(rename = "Director")]
    pub director: String,
    #[tabled(rename = "Phone")]
    pub phone: String,
}

impl AgencyRow {
    pub fn new(agency: &Agency, distance_km: Option<f64>) -> Self {
        Self {
            id: agency.id.to_string(),
            name: agency.name.clone(),
            position: format!("{:.5}, {:.5}", agency.lat, agency.lon),
            distance: format_distance(distance_km),
            director: agency
                .director_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| NONE.to_string()),
            phone: if agency.phone.is_empty() { NONE.to_string() } else { agency.phone.clone() },
        }
    }
}

#[derive(Debug, Tabled)]
pub struct UserRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Email")]
    pub email: String,
    #[tabled(rename = "Role")]
    pub role: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.to_string(),
        }
    }
}

#[derive(Debug, Tabled)]
pub struct NotificationRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "")]
    pub unread: String,
    #[tabled(rename = "Created")]
    pub created: String,
    #[tabled(rename = "Worksite")]
    pub worksite: String,
    #[tabled(rename = "Message")]
    pub message: String,
}

impl From<&Notification> for NotificationRow {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id.to_string(),
            unread: if notification.read { String::new() } else { "●".to_string() },
            created: notification.created_at.format("%Y-%m-%d %H:%M").to_string(),
            worksite: notification.worksite_id.to_string(),
            message: notification.message.clone(),
        }
    }
}

fn format_distance(distance_km: Option<f64>) -> String {
    match distance_km {
        Some(km) if km < 1.0 => format!("{:.0} m", km * 1000.0),
        Some(km) => format!("{:.2} km", km),
        None => NONE.to_string(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars - 1).collect();
        format!("{}…", cut)
    }
}
