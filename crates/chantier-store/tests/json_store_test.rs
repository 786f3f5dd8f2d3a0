//! Integration tests for the JSON-file store against legacy data files
//! (`agences.json`, `chantiers.json` and French field names)

use chantier_core::models::{AgencyId, NotificationKind, Role, UserId, WorksiteStatus};
use chantier_store::{Collection, CollectionStore, Collections, JsonFileStore};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn write_legacy_data(dir: &std::path::Path) {
    fs::write(
        dir.join("agences.json"),
        r#"[
  {"id": "A1", "name": "Agence Marseille", "address": "1 quai du Port", "phone": "0491000000",
   "lat": 43.2965, "lon": 5.3698, "directeurId": "D1"}
]"#,
    )
    .unwrap();
    fs::write(
        dir.join("users.json"),
        r#"[
  {"id": "D1", "name": "Claire", "email": "claire@example.com", "password": "x",
   "role": "directeur", "agenceId": "A1"},
  {"id": "U9", "name": "Jane", "email": "jane@example.com", "password": "x",
   "role": "ats", "agenceId": "A1"}
]"#,
    )
    .unwrap();
    fs::write(
        dir.join("chantiers.json"),
        r#"[
  {"id": "CH1718000000000", "lat": 43.3, "lon": 5.4, "description": "Tranchée",
   "photo": null, "reportedBy": "U1", "reportedByName": "Paul",
   "reportedAt": "2024-06-10T08:00:00.000Z", "status": "affecté",
   "agenceId": "A1", "agenceName": "Agence Marseille",
   "assignedTo": "U9", "assignedToName": "Jane", "assignedAt": "2024-06-10T09:00:00.000Z"}
]"#,
    )
    .unwrap();
    fs::write(
        dir.join("notifications.json"),
        r#"[
  {"id": "N1718000000000", "type": "chantier_affecte", "chantierId": "CH1718000000000",
   "recipientId": "U9", "message": "Un chantier vous a été affecté", "read": false,
   "createdAt": "2024-06-10T09:00:00.000Z"}
]"#,
    )
    .unwrap();
}

#[tokio::test]
async fn test_reads_legacy_collections() {
    let temp_dir = TempDir::new().unwrap();
    write_legacy_data(temp_dir.path());
    let collections = Collections::new(Arc::new(JsonFileStore::open(temp_dir.path()).unwrap()));

    let agencies = collections.agencies().await.unwrap();
    assert_eq!(agencies[0].director_id, Some(UserId::from("D1")));

    let users = collections.users().await.unwrap();
    assert_eq!(users[0].role, Role::Director);
    assert_eq!(users[1].agency_id, Some(AgencyId::from("A1")));

    let worksites = collections.worksites().await.unwrap();
    assert_eq!(worksites[0].status, WorksiteStatus::Assigned);
    assert_eq!(worksites[0].agency_name.as_deref(), Some("Agence Marseille"));

    let notifications = collections.notifications().await.unwrap();
    assert_eq!(notifications[0].kind, NotificationKind::WorksiteAssigned);
    assert_eq!(notifications[0].worksite_id, "CH1718000000000");
}

#[tokio::test]
async fn test_rewrite_uses_current_field_names() {
    let temp_dir = TempDir::new().unwrap();
    write_legacy_data(temp_dir.path());
    let collections = Collections::new(Arc::new(JsonFileStore::open(temp_dir.path()).unwrap()));

    let worksites = collections.worksites().await.unwrap();
    collections.save_worksites(&worksites).await.unwrap();

    let content = fs::read_to_string(temp_dir.path().join("worksites.json")).unwrap();
    assert!(content.contains("\"agencyId\""));
    assert!(content.contains("\"assigned\""));
    assert!(!content.contains("agenceId"));

    // The current file now takes precedence; the legacy file is left as is
    assert!(temp_dir.path().join("chantiers.json").is_file());
    assert_eq!(collections.worksites().await.unwrap(), worksites);
}

#[tokio::test]
async fn test_legacy_file_names_are_read() {
    let temp_dir = TempDir::new().unwrap();
    write_legacy_data(temp_dir.path());
    assert!(!temp_dir.path().join("agencies.json").exists());
    assert!(!temp_dir.path().join("worksites.json").exists());

    let store = JsonFileStore::open(temp_dir.path()).unwrap();

    assert_eq!(store.load(Collection::Agencies).await.unwrap().len(), 1);
    assert_eq!(store.load(Collection::Worksites).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_init_does_not_shadow_legacy_files() {
    let temp_dir = TempDir::new().unwrap();
    write_legacy_data(temp_dir.path());

    let (store, created) = JsonFileStore::init(temp_dir.path()).await.unwrap();

    assert!(created.is_empty());
    assert!(!temp_dir.path().join("worksites.json").exists());
    assert_eq!(store.load(Collection::Worksites).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_cached_store_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let (store, _) = JsonFileStore::init(temp_dir.path()).await.unwrap();
    let store = store.with_cache();

    store
        .save(Collection::Agencies, vec![serde_json::json!({"id": "A1", "name": "Aix",
                                                           "lat": 43.5, "lon": 5.4})])
        .await
        .unwrap();
    drop(store);

    let reopened = Collections::new(Arc::new(JsonFileStore::open(temp_dir.path()).unwrap()));
    assert_eq!(reopened.agencies().await.unwrap()[0].name, "Aix");
}

#[tokio::test]
async fn test_notification_without_recipient_does_not_block_ledger() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("notifications.json"),
        r#"[
  {"id": "N0", "type": "nouveau_chantier", "chantierId": "CH0",
   "message": "Nouveau chantier", "read": false, "createdAt": "2024-06-09T08:00:00.000Z"},
  {"id": "N1", "type": "chantier_affecte", "chantierId": "CH1", "recipientId": "U9",
   "message": "Un chantier vous a été affecté", "read": false,
   "createdAt": "2024-06-10T09:00:00.000Z"}
]"#,
    )
    .unwrap();
    let collections = Collections::new(Arc::new(JsonFileStore::open(temp_dir.path()).unwrap()));

    let notifications = collections.notifications().await.unwrap();
    assert_eq!(notifications.len(), 2);
    assert!(notifications[0].recipient_id.is_none());
    assert_eq!(notifications[1].recipient_id, Some(UserId::from("U9")));

    collections.save_notifications(&notifications).await.unwrap();
    let content = fs::read_to_string(temp_dir.path().join("notifications.json")).unwrap();
    assert_eq!(content.matches("recipientId").count(), 1);
}
