use chantier_core::assignment::ReassignPolicy;
use chantier_core::config::LayeredConfig;
use chantier_core::locator::{Ranked, DEFAULT_AGENCY_RADIUS_KM, DEFAULT_WORKSITE_RADIUS_KM};
use chantier_core::models::{Agency, Notification, UserId, Worksite};
use serde::Serialize;

/// Tunables the dispatcher reads from configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchSettings {
    pub reassign_policy: ReassignPolicy,
    /// Radius used by nearby-agency searches when the caller gives none
    pub agency_radius_km: f64,
    /// Radius used by nearby-worksite searches when the caller gives none
    pub worksite_radius_km: f64,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            reassign_policy: ReassignPolicy::default(),
            agency_radius_km: DEFAULT_AGENCY_RADIUS_KM,
            worksite_radius_km: DEFAULT_WORKSITE_RADIUS_KM,
        }
    }
}

impl From<&LayeredConfig> for DispatchSettings {
    fn from(config: &LayeredConfig) -> Self {
        Self {
            reassign_policy: config.reassign_policy.value,
            agency_radius_km: config.agency_radius_km.value,
            worksite_radius_km: config.worksite_radius_km.value,
        }
    }
}

/// A stored worksite report
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub worksite: Worksite,
    pub nearest_agency: Option<Ranked<Agency>>,
    /// The director's notification, if one was recorded
    pub notification: Option<Notification>,
    /// Set when the worksite was stored but its notification was not
    pub notification_error: Option<String>,
}

/// A stored assignment
#[derive(Debug, Clone)]
pub struct AssignOutcome {
    pub worksite: Worksite,
    pub previous_assignee: Option<UserId>,
    /// The assignee's notification, if it was recorded
    pub notification: Option<Notification>,
    /// Set when the assignment was stored but its notification was not
    pub notification_error: Option<String>,
}

/// Record counts per collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatus {
    pub agencies: usize,
    pub users: usize,
    pub worksites: usize,
    pub unassigned_worksites: usize,
    pub notifications: usize,
    pub unread_notifications: usize,
}
