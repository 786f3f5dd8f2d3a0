//! In-memory storage implementation for development and testing.

use async_trait::async_trait;
use chantier_core::error::{ChantierError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ports::{Collection, CollectionStore};

/// In-memory implementation of CollectionStore
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<Collection, Vec<Value>>>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection, replacing whatever it held
    pub fn with_records(self, collection: Collection, records: Vec<Value>) -> Self {
        if let Ok(mut collections) = self.collections.write() {
            collections.insert(collection, records);
        }
        self
    }
}

fn poisoned(collection: Collection) -> ChantierError {
    ChantierError::store(collection.as_str(), "memory store lock poisoned")
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn load(&self, collection: Collection) -> Result<Vec<Value>> {
        let collections = self.collections.read().map_err(|_| poisoned(collection))?;
        Ok(collections.get(&collection).cloned().unwrap_or_default())
    }

    async fn save(&self, collection: Collection, records: Vec<Value>) -> Result<()> {
        let mut collections = self.collections.write().map_err(|_| poisoned(collection))?;
        collections.insert(collection, records);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_collection_is_empty() {
        let store = MemoryStore::new();
        assert!(store.load(Collection::Worksites).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_replaces_collection() {
        let store = MemoryStore::new()
            .with_records(Collection::Agencies, vec![json!({"id": "A1"}), json!({"id": "A2"})]);

        store.save(Collection::Agencies, vec![json!({"id": "A3"})]).await.unwrap();

        let agencies = store.load(Collection::Agencies).await.unwrap();
        assert_eq!(agencies, vec![json!({"id": "A3"})]);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.save(Collection::Users, vec![json!({"id": "U1"})]).await.unwrap();
        assert_eq!(other.load(Collection::Users).await.unwrap().len(), 1);
    }
}
