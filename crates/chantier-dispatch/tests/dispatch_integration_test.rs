//! End-to-end tests for the dispatcher: concurrent reports, notification
//! failures and the JSON-file store

use async_trait::async_trait;
use chantier_core::error::{ChantierError, Result};
use chantier_core::models::{Assignee, Coordinate, UserId, WorksiteReport};
use chantier_dispatch::{DispatchSettings, Dispatcher};
use chantier_store::{Collection, CollectionStore, JsonFileStore, MemoryStore};
use futures::future::join_all;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

fn agencies() -> Vec<Value> {
    vec![json!({"id": "A1", "name": "Marseille", "lat": 43.30, "lon": 5.40, "directorId": "D1"})]
}

fn report(lat: f64, lon: f64, reporter: &str) -> WorksiteReport {
    WorksiteReport {
        position: Coordinate::try_new(lat, lon).unwrap(),
        description: format!("Reported by {}", reporter),
        photo: None,
        reporter_id: UserId::from(reporter),
        reporter_name: reporter.to_string(),
    }
}

/// Memory store whose notifications collection refuses writes
struct BrokenLedgerStore {
    inner: MemoryStore,
}

#[async_trait]
impl CollectionStore for BrokenLedgerStore {
    async fn load(&self, collection: Collection) -> Result<Vec<Value>> {
        self.inner.load(collection).await
    }

    async fn save(&self, collection: Collection, records: Vec<Value>) -> Result<()> {
        if collection == Collection::Notifications {
            return Err(ChantierError::store(collection.as_str(), "disk full"));
        }
        self.inner.save(collection, records).await
    }
}

#[tokio::test]
async fn test_concurrent_reports_at_same_spot_store_one_worksite() {
    let store = MemoryStore::new().with_records(Collection::Agencies, agencies());
    let dispatcher = Arc::new(Dispatcher::new(Arc::new(store), DispatchSettings::default()));

    let tasks = (0..8).map(|i| {
        let dispatcher = Arc::clone(&dispatcher);
        tokio::spawn(async move {
            // All within a few metres of each other
            let offset = i as f64 * 0.00001;
            dispatcher.report_worksite(report(43.25 + offset, 5.35, &format!("U{}", i))).await
        })
    });

    let results: Vec<_> = join_all(tasks).await.into_iter().map(|r| r.unwrap()).collect();

    let accepted = results.iter().filter(|r| r.is_ok()).count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Err(ChantierError::DuplicateNearby { .. })))
        .count();

    assert_eq!(accepted, 1);
    assert_eq!(duplicates, 7);
    assert_eq!(dispatcher.list_worksites().await.unwrap().len(), 1);
    assert_eq!(dispatcher.notifications_for(&UserId::from("D1")).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_concurrent_reports_at_distinct_spots_all_stored() {
    let store = MemoryStore::new().with_records(Collection::Agencies, agencies());
    let dispatcher = Arc::new(Dispatcher::new(Arc::new(store), DispatchSettings::default()));

    let tasks = (0..5).map(|i| {
        let dispatcher = Arc::clone(&dispatcher);
        tokio::spawn(async move {
            let lat = 43.0 + i as f64 * 0.05;
            dispatcher.report_worksite(report(lat, 5.35, &format!("U{}", i))).await
        })
    });

    for result in join_all(tasks).await {
        result.unwrap().unwrap();
    }

    assert_eq!(dispatcher.list_worksites().await.unwrap().len(), 5);
    assert_eq!(dispatcher.notifications_for(&UserId::from("D1")).await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_notification_failure_keeps_primary_write() {
    let store = BrokenLedgerStore {
        inner: MemoryStore::new().with_records(Collection::Agencies, agencies()),
    };
    let dispatcher = Dispatcher::new(Arc::new(store), DispatchSettings::default());

    let reported = dispatcher.report_worksite(report(43.29, 5.37, "U1")).await.unwrap();
    assert!(reported.notification.is_none());
    assert!(reported.notification_error.as_deref().unwrap().contains("disk full"));

    let assigned = dispatcher
        .assign_worksite(&reported.worksite.id, Assignee::new("U9", "Jane"))
        .await
        .unwrap();
    assert!(assigned.notification.is_none());
    assert!(assigned.notification_error.is_some());

    let stored = dispatcher.list_worksites().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].assigned_to, Some(UserId::from("U9")));
}

#[tokio::test]
async fn test_full_flow_on_json_store() {
    let temp_dir = TempDir::new().unwrap();
    let (store, _) = JsonFileStore::init(temp_dir.path()).await.unwrap();
    store.save(Collection::Agencies, agencies()).await.unwrap();
    let dispatcher = Dispatcher::new(Arc::new(store.with_cache()), DispatchSettings::default());

    let reported = dispatcher.report_worksite(report(43.29, 5.37, "U1")).await.unwrap();
    dispatcher
        .assign_worksite(&reported.worksite.id, Assignee::new("U9", "Jane"))
        .await
        .unwrap();

    // A fresh store over the same directory sees everything
    let reopened = Dispatcher::new(
        Arc::new(JsonFileStore::open(temp_dir.path()).unwrap()),
        DispatchSettings::default(),
    );
    let worksites = reopened.list_worksites().await.unwrap();
    assert_eq!(worksites.len(), 1);
    assert_eq!(worksites[0].assigned_to_name.as_deref(), Some("Jane"));

    let jane = reopened.notifications_for(&UserId::from("U9")).await.unwrap();
    assert_eq!(jane.len(), 1);
    assert_eq!(jane[0].message, "A worksite has been assigned to you");

    let status = reopened.status().await.unwrap();
    assert_eq!(status.worksites, 1);
    assert_eq!(status.unassigned_worksites, 0);
    assert_eq!(status.notifications, 2);
}

#[tokio::test]
async fn test_legacy_data_directory() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    std::fs::write(
        dir.join("agences.json"),
        json!([{"id": "A1", "name": "Agence Marseille", "lat": 43.30, "lon": 5.40,
                "directeurId": "D1"}])
        .to_string(),
    )
    .unwrap();
    std::fs::write(
        dir.join("chantiers.json"),
        json!([{"id": "CH1", "lat": 43.30, "lon": 5.40, "description": "Tranchée",
                "reportedBy": "U1", "reportedByName": "Paul",
                "reportedAt": "2024-06-10T08:00:00.000Z", "status": "nouveau",
                "agenceId": "A1", "agenceName": "Agence Marseille"}])
        .to_string(),
    )
    .unwrap();
    // Written for an agency that had no director: the recipient key is absent
    std::fs::write(
        dir.join("notifications.json"),
        json!([
            {"id": "N0", "type": "nouveau_chantier", "chantierId": "CH0",
             "message": "Nouveau chantier", "read": false,
             "createdAt": "2024-06-09T08:00:00.000Z"},
            {"id": "N1", "type": "chantier_affecte", "chantierId": "CH1", "recipientId": "U9",
             "message": "Un chantier vous a été affecté", "read": false,
             "createdAt": "2024-06-10T09:00:00.000Z"}
        ])
        .to_string(),
    )
    .unwrap();

    let store = JsonFileStore::open(dir).unwrap();
    let dispatcher = Dispatcher::new(Arc::new(store), DispatchSettings::default());

    let inbox = dispatcher.notifications_for(&UserId::from("U9")).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(dispatcher.unread_count(&UserId::from("U9")).await.unwrap(), 1);
    assert!(dispatcher.mark_notification_read(&inbox[0].id).await.unwrap());

    let err = dispatcher.report_worksite(report(43.3001, 5.40, "U2")).await.unwrap_err();
    assert!(matches!(err, ChantierError::DuplicateNearby { existing } if existing.id == "CH1"));

    let outcome = dispatcher.report_worksite(report(43.29, 5.37, "U2")).await.unwrap();
    assert_eq!(outcome.nearest_agency.unwrap().item.id, "A1");
    assert!(outcome.notification.is_some());
    assert!(outcome.notification_error.is_none());

    let raw: Vec<Value> =
        serde_json::from_str(&std::fs::read_to_string(dir.join("notifications.json")).unwrap())
            .unwrap();
    assert_eq!(raw.len(), 3);
    assert!(raw[0].get("recipientId").is_none());
    assert_eq!(dispatcher.list_worksites().await.unwrap().len(), 2);
}
