//! Typed access to the collections over any `CollectionStore`.
//!
//! User records are only ever handed out as the public `User` view; the
//! stored password hash is dropped during decoding.

use chantier_core::error::{ChantierError, Result};
use chantier_core::models::{Agency, AgencyId, Notification, User, UserId, Worksite};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::ports::{Collection, CollectionStore};

/// Typed view over a shared `CollectionStore`
#[derive(Clone)]
pub struct Collections {
    store: Arc<dyn CollectionStore>,
}

impl Collections {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    /// The underlying raw store
    pub fn store(&self) -> &Arc<dyn CollectionStore> {
        &self.store
    }

    pub async fn agencies(&self) -> Result<Vec<Agency>> {
        self.load_typed(Collection::Agencies).await
    }

    pub async fn agency(&self, id: &AgencyId) -> Result<Option<Agency>> {
        Ok(self.agencies().await?.into_iter().find(|a| &a.id == id))
    }

    /// All users, without credentials
    pub async fn users(&self) -> Result<Vec<User>> {
        self.load_typed(Collection::Users).await
    }

    pub async fn user(&self, id: &UserId) -> Result<Option<User>> {
        Ok(self.users().await?.into_iter().find(|u| &u.id == id))
    }

    /// Field staff (ATS) attached to an agency, in stored order
    pub async fn staff_of(&self, agency: &AgencyId) -> Result<Vec<User>> {
        Ok(self.users().await?.into_iter().filter(|u| u.is_staff_of(agency)).collect())
    }

    pub async fn worksites(&self) -> Result<Vec<Worksite>> {
        self.load_typed(Collection::Worksites).await
    }

    pub async fn save_worksites(&self, worksites: &[Worksite]) -> Result<()> {
        self.save_typed(Collection::Worksites, worksites).await
    }

    pub async fn notifications(&self) -> Result<Vec<Notification>> {
        self.load_typed(Collection::Notifications).await
    }

    pub async fn save_notifications(&self, notifications: &[Notification]) -> Result<()> {
        self.save_typed(Collection::Notifications, notifications).await
    }

    pub(crate) async fn load_typed<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>> {
        self.store
            .load(collection)
            .await?
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                serde_json::from_value(record).map_err(|e| {
                    ChantierError::store(
                        collection.as_str(),
                        format!("invalid record at index {}: {}", index, e),
                    )
                })
            })
            .collect()
    }

    async fn save_typed<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<()> {
        let values = records
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<Value>, _>>()
            .map_err(|e| ChantierError::store(collection.as_str(), e))?;
        self.store.save(collection, values).await
    }
}
