use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{NotificationId, UserId, WorksiteId};

/// What a notification is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Sent to the director of the agency a new worksite was routed to
    #[serde(alias = "nouveau_chantier")]
    NewWorksite,
    /// Sent to the member of staff a worksite was assigned to
    #[serde(alias = "chantier_affecte")]
    WorksiteAssigned,
}

/// A directed message in the notification ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(alias = "chantierId")]
    pub worksite_id: WorksiteId,
    /// Absent on legacy records written for an agency without a director
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<UserId>,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Notification for the director of the agency a worksite was routed to
    pub fn new_worksite(
        worksite_id: WorksiteId,
        director_id: UserId,
        reporter_name: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: NotificationId::generate(),
            kind: NotificationKind::NewWorksite,
            worksite_id,
            recipient_id: Some(director_id),
            message: format!("New worksite reported by {}", reporter_name),
            read: false,
            created_at: now,
        }
    }

    /// Notification for the assignee of a worksite
    pub fn worksite_assigned(
        worksite_id: WorksiteId,
        assignee_id: UserId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: NotificationId::generate(),
            kind: NotificationKind::WorksiteAssigned,
            worksite_id,
            recipient_id: Some(assignee_id),
            message: "A worksite has been assigned to you".to_string(),
            read: false,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_under_type() {
        let n = Notification::worksite_assigned(
            WorksiteId::from("CH123"),
            UserId::from("U9"),
            Utc::now(),
        );
        let value = serde_json::to_value(&n).unwrap();

        assert_eq!(value["type"], "worksite_assigned");
        assert_eq!(value["worksiteId"], "CH123");
        assert_eq!(value["recipientId"], "U9");
        assert_eq!(value["read"], false);
    }

    #[test]
    fn test_missing_recipient_loads_and_stays_absent() {
        let raw = r#"{"id": "N1", "type": "nouveau_chantier", "chantierId": "CH1",
                      "message": "Nouveau chantier", "read": false,
                      "createdAt": "2024-06-10T08:00:00.000Z"}"#;
        let n: Notification = serde_json::from_str(raw).unwrap();

        assert!(n.recipient_id.is_none());
        let value = serde_json::to_value(&n).unwrap();
        assert!(value.get("recipientId").is_none());
    }

    #[test]
    fn test_legacy_kind_names_load() {
        let kind: NotificationKind = serde_json::from_str("\"nouveau_chantier\"").unwrap();
        assert_eq!(kind, NotificationKind::NewWorksite);
    }
}
