use chantier_core::assignment::{self, CreatedWorksite};
use chantier_core::config::{LayeredConfig, StorageKind};
use chantier_core::dedup::find_nearby_worksite;
use chantier_core::error::{ChantierError, Result};
use chantier_core::ledger;
use chantier_core::locator::{self, validate_radius, Ranked};
use chantier_core::models::{
    Agency, AgencyId, Assignee, Coordinate, Notification, NotificationId, User, UserId, Worksite,
    WorksiteId, WorksiteReport, WorksiteStatus,
};
use chantier_store::{Authenticator, CollectionStore, Collections, JsonFileStore, MemoryStore};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::models::{AssignOutcome, DispatchSettings, ReportOutcome, StoreStatus};

/// Runs the worksite use cases against a shared store
///
/// Every read-modify-write on a mutable collection holds that collection's
/// lock for its whole duration. When both are needed the worksites lock is
/// taken first.
pub struct Dispatcher {
    collections: Collections,
    authenticator: Authenticator,
    settings: DispatchSettings,
    worksites_lock: Mutex<()>,
    notifications_lock: Mutex<()>,
}

impl Dispatcher {
    /// Create a dispatcher over the given store
    pub fn new(store: Arc<dyn CollectionStore>, settings: DispatchSettings) -> Self {
        let collections = Collections::new(store);
        Self {
            authenticator: Authenticator::new(collections.clone()),
            collections,
            settings,
            worksites_lock: Mutex::new(()),
            notifications_lock: Mutex::new(()),
        }
    }

    /// Open the store selected by `config` and build a dispatcher over it
    pub fn from_config(config: &LayeredConfig) -> Result<Self> {
        let store: Arc<dyn CollectionStore> = match config.storage.value {
            StorageKind::Memory => Arc::new(MemoryStore::new()),
            StorageKind::Json => {
                let store = JsonFileStore::open(&config.data_dir.value)?;
                if config.cache.value {
                    Arc::new(store.with_cache())
                } else {
                    Arc::new(store)
                }
            }
        };

        tracing::debug!(
            storage = ?config.storage.value,
            data_dir = %config.data_dir.value.display(),
            cache = config.cache.value,
            "Opened store"
        );

        Ok(Self::new(store, DispatchSettings::from(config)))
    }

    pub fn settings(&self) -> &DispatchSettings {
        &self.settings
    }

    pub fn collections(&self) -> &Collections {
        &self.collections
    }

    /// Store a new worksite report and notify the routed agency's director
    pub async fn report_worksite(&self, report: WorksiteReport) -> Result<ReportOutcome> {
        let _worksites = self.worksites_lock.lock().await;

        let mut worksites = self.collections.worksites().await?;
        let agencies = self.collections.agencies().await?;

        let CreatedWorksite { worksite, agency, notification } =
            match assignment::create_worksite(report, &worksites, &agencies, Utc::now()) {
                Ok(created) => created,
                Err(ChantierError::DuplicateNearby { existing }) => {
                    tracing::info!(existing_id = %existing.id, "Rejected duplicate report");
                    return Err(ChantierError::DuplicateNearby { existing });
                }
                Err(e) => return Err(e),
            };

        worksites.push(worksite.clone());
        self.collections.save_worksites(&worksites).await?;

        tracing::info!(
            worksite_id = %worksite.id,
            agency_id = ?worksite.agency_id.as_ref().map(AgencyId::as_str),
            "Worksite reported"
        );

        let (notification, notification_error) = match notification {
            Some(notification) => self.record_notification(notification).await,
            None => {
                if let Some(agency) = &agency {
                    tracing::warn!(
                        agency_id = %agency.item.id,
                        "Agency has no director to notify"
                    );
                }
                (None, None)
            }
        };

        Ok(ReportOutcome { worksite, nearest_agency: agency, notification, notification_error })
    }

    /// The first stored worksite within the duplicate radius of `point`
    pub async fn check_proximity(&self, point: Coordinate) -> Result<Option<Worksite>> {
        point.validate()?;
        let worksites = self.collections.worksites().await?;
        Ok(find_nearby_worksite(point, &worksites, None).cloned())
    }

    /// Build an assignee, looking the name up when the caller omits it
    pub async fn resolve_assignee(&self, id: UserId, name: Option<String>) -> Result<Assignee> {
        match name {
            Some(name) => Ok(Assignee { id, name }),
            None => {
                let user = self
                    .collections
                    .user(&id)
                    .await?
                    .ok_or_else(|| ChantierError::UserNotFound { id: id.to_string() })?;
                Ok(Assignee { id, name: user.name })
            }
        }
    }

    /// Assign a worksite and notify the assignee
    pub async fn assign_worksite(
        &self,
        id: &WorksiteId,
        assignee: Assignee,
    ) -> Result<AssignOutcome> {
        let _worksites = self.worksites_lock.lock().await;

        let mut worksites = self.collections.worksites().await?;
        let assigned = assignment::assign_worksite(
            &mut worksites,
            id,
            &assignee,
            self.settings.reassign_policy,
            Utc::now(),
        )?;
        self.collections.save_worksites(&worksites).await?;

        match &assigned.previous_assignee {
            Some(previous) => tracing::info!(
                worksite_id = %id,
                assignee = %assignee.id,
                previous = %previous,
                "Worksite reassigned"
            ),
            None => tracing::info!(worksite_id = %id, assignee = %assignee.id, "Worksite assigned"),
        }

        let (notification, notification_error) =
            self.record_notification(assigned.notification).await;

        Ok(AssignOutcome {
            worksite: assigned.worksite,
            previous_assignee: assigned.previous_assignee,
            notification,
            notification_error,
        })
    }

    /// All worksites, in stored order
    pub async fn list_worksites(&self) -> Result<Vec<Worksite>> {
        self.collections.worksites().await
    }

    /// Worksites with the given status, in stored order
    pub async fn worksites_with_status(&self, status: WorksiteStatus) -> Result<Vec<Worksite>> {
        Ok(self.collections.worksites().await?.into_iter().filter(|w| w.status == status).collect())
    }

    /// Worksites within `radius_km` of `point`, closest first
    pub async fn nearby_worksites(
        &self,
        point: Coordinate,
        radius_km: Option<f64>,
    ) -> Result<Vec<Ranked<Worksite>>> {
        point.validate()?;
        let radius = validate_radius(radius_km.unwrap_or(self.settings.worksite_radius_km))?;
        let worksites = self.collections.worksites().await?;

        Ok(locator::nearby_worksites(point, &worksites, radius)
            .into_iter()
            .map(Ranked::cloned)
            .collect())
    }

    /// Worksites routed to an agency, in stored order
    pub async fn agency_worksites(&self, agency: &AgencyId) -> Result<Vec<Worksite>> {
        self.require_agency(agency).await?;
        let worksites = self.collections.worksites().await?;
        Ok(locator::worksites_for_agency(agency, &worksites).into_iter().cloned().collect())
    }

    pub async fn list_agencies(&self) -> Result<Vec<Agency>> {
        self.collections.agencies().await
    }

    /// Agencies within `radius_km` of `point`, closest first
    pub async fn nearby_agencies(
        &self,
        point: Coordinate,
        radius_km: Option<f64>,
    ) -> Result<Vec<Ranked<Agency>>> {
        point.validate()?;
        let radius = validate_radius(radius_km.unwrap_or(self.settings.agency_radius_km))?;
        let agencies = self.collections.agencies().await?;

        Ok(locator::nearby_agencies(point, &agencies, radius)
            .into_iter()
            .map(Ranked::cloned)
            .collect())
    }

    /// The agency a report at `point` would be routed to
    pub async fn nearest_agency(&self, point: Coordinate) -> Result<Option<Ranked<Agency>>> {
        point.validate()?;
        let agencies = self.collections.agencies().await?;
        Ok(locator::nearest_agency(point, &agencies).map(Ranked::cloned))
    }

    /// Field staff attached to an agency
    pub async fn agency_staff(&self, agency: &AgencyId) -> Result<Vec<User>> {
        self.require_agency(agency).await?;
        self.collections.staff_of(agency).await
    }

    async fn require_agency(&self, id: &AgencyId) -> Result<()> {
        match self.collections.agency(id).await? {
            Some(_) => Ok(()),
            None => Err(ChantierError::AgencyNotFound { id: id.to_string() }),
        }
    }

    pub async fn get_user(&self, id: &UserId) -> Result<User> {
        self.collections
            .user(id)
            .await?
            .ok_or_else(|| ChantierError::UserNotFound { id: id.to_string() })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        self.authenticator.authenticate(email, password).await
    }

    /// Notifications addressed to a user, most recent first
    pub async fn notifications_for(&self, recipient: &UserId) -> Result<Vec<Notification>> {
        let notifications = self.collections.notifications().await?;
        Ok(ledger::list_for_recipient(recipient, &notifications).into_iter().cloned().collect())
    }

    pub async fn unread_count(&self, recipient: &UserId) -> Result<usize> {
        let notifications = self.collections.notifications().await?;
        Ok(ledger::unread_count(recipient, &notifications))
    }

    /// Mark a notification read. Unknown ids are not an error.
    ///
    /// Returns whether the ledger changed.
    pub async fn mark_notification_read(&self, id: &NotificationId) -> Result<bool> {
        let _notifications = self.notifications_lock.lock().await;

        let mut notifications = self.collections.notifications().await?;
        let changed = ledger::mark_read(id, &mut notifications);
        if changed {
            self.collections.save_notifications(&notifications).await?;
            tracing::debug!(notification_id = %id, "Notification marked read");
        } else {
            tracing::debug!(notification_id = %id, "Mark read was a no-op");
        }
        Ok(changed)
    }

    /// Record counts for health and status reporting
    pub async fn status(&self) -> Result<StoreStatus> {
        let agencies = self.collections.agencies().await?;
        let users = self.collections.users().await?;
        let worksites = self.collections.worksites().await?;
        let notifications = self.collections.notifications().await?;

        Ok(StoreStatus {
            agencies: agencies.len(),
            users: users.len(),
            worksites: worksites.len(),
            unassigned_worksites: worksites.iter().filter(|w| !w.is_assigned()).count(),
            notifications: notifications.len(),
            unread_notifications: notifications.iter().filter(|n| !n.read).count(),
        })
    }

    /// Append a notification without failing the caller.
    ///
    /// The primary write has already happened, so a failure here is logged
    /// and handed back as a message instead of an error.
    async fn record_notification(
        &self,
        notification: Notification,
    ) -> (Option<Notification>, Option<String>) {
        let _notifications = self.notifications_lock.lock().await;

        match self.append_notification(&notification).await {
            Ok(()) => {
                tracing::info!(
                    notification_id = %notification.id,
                    recipient = ?notification.recipient_id.as_ref().map(UserId::as_str),
                    kind = ?notification.kind,
                    "Notification recorded"
                );
                (Some(notification), None)
            }
            Err(e) => {
                tracing::error!(
                    worksite_id = %notification.worksite_id,
                    recipient = ?notification.recipient_id.as_ref().map(UserId::as_str),
                    error = %e,
                    "Failed to record notification"
                );
                (None, Some(e.to_string()))
            }
        }
    }

    async fn append_notification(&self, notification: &Notification) -> Result<()> {
        let mut notifications = self.collections.notifications().await?;
        notifications.push(notification.clone());
        self.collections.save_notifications(&notifications).await
    }
}
