//! Worksite lifecycle: creation from a report and assignment to staff.
//!
//! These functions decide state only. They take the current collections and
//! return the records to persist; storing them is the caller's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dedup::find_nearby_worksite;
use crate::error::{ChantierError, Result};
use crate::locator::{nearest_agency, Ranked};
use crate::models::{
    Agency, Assignee, Notification, UserId, Worksite, WorksiteId, WorksiteReport, WorksiteStatus,
};

/// What to do when assigning a worksite that is already assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReassignPolicy {
    /// Replace the previous assignee
    #[default]
    Overwrite,
    /// Fail with `AlreadyAssigned`
    Reject,
}

/// Result of a successful report
#[derive(Debug, Clone)]
pub struct CreatedWorksite {
    pub worksite: Worksite,
    /// Agency the worksite was routed to, with its distance
    pub agency: Option<Ranked<Agency>>,
    /// Notification for the agency director, if the agency has one
    pub notification: Option<Notification>,
}

/// Result of a successful assignment
#[derive(Debug, Clone)]
pub struct AssignedWorksite {
    pub worksite: Worksite,
    pub previous_assignee: Option<UserId>,
    pub notification: Notification,
}

/// Build a new worksite from a report.
///
/// Fails with `DuplicateNearby` when an existing worksite lies within the
/// duplicate radius; nothing is produced in that case.
pub fn create_worksite(
    report: WorksiteReport,
    existing: &[Worksite],
    agencies: &[Agency],
    now: DateTime<Utc>,
) -> Result<CreatedWorksite> {
    report.position.validate()?;

    if let Some(duplicate) = find_nearby_worksite(report.position, existing, None) {
        return Err(ChantierError::DuplicateNearby { existing: Box::new(duplicate.clone()) });
    }

    let agency = nearest_agency(report.position, agencies).map(Ranked::cloned);

    let worksite = Worksite {
        id: WorksiteId::generate(),
        lat: report.position.lat,
        lon: report.position.lon,
        description: report.description,
        photo: report.photo,
        reported_by: report.reporter_id,
        reported_by_name: report.reporter_name,
        reported_at: now,
        status: WorksiteStatus::New,
        agency_id: agency.as_ref().map(|a| a.item.id.clone()),
        agency_name: agency.as_ref().map(|a| a.item.name.clone()),
        assigned_to: None,
        assigned_to_name: None,
        assigned_at: None,
    };

    let notification = agency
        .as_ref()
        .and_then(|a| a.item.director_id.clone())
        .map(|director| {
            Notification::new_worksite(
                worksite.id.clone(),
                director,
                &worksite.reported_by_name,
                now,
            )
        });

    Ok(CreatedWorksite { worksite, agency, notification })
}

/// Assign a worksite in place and produce the assignee's notification
pub fn assign_worksite(
    worksites: &mut [Worksite],
    id: &WorksiteId,
    assignee: &Assignee,
    policy: ReassignPolicy,
    now: DateTime<Utc>,
) -> Result<AssignedWorksite> {
    let worksite = worksites
        .iter_mut()
        .find(|w| &w.id == id)
        .ok_or_else(|| ChantierError::WorksiteNotFound { id: id.to_string() })?;

    if worksite.is_assigned() && policy == ReassignPolicy::Reject {
        return Err(ChantierError::AlreadyAssigned {
            id: worksite.id.clone(),
            status: worksite.status,
        });
    }
    debug_assert!(worksite.status.can_transition_to(WorksiteStatus::Assigned));

    let previous_assignee = worksite.assigned_to.replace(assignee.id.clone());
    worksite.assigned_to_name = Some(assignee.name.clone());
    worksite.status = WorksiteStatus::Assigned;
    worksite.assigned_at = Some(now);

    let notification =
        Notification::worksite_assigned(worksite.id.clone(), assignee.id.clone(), now);

    Ok(AssignedWorksite { worksite: worksite.clone(), previous_assignee, notification })
}
