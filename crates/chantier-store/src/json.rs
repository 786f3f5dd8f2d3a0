//! JSON-file storage: one pretty-printed `<collection>.json` array per
//! collection inside a data directory.

use async_trait::async_trait;
use chantier_core::error::{ChantierError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::ports::{Collection, CollectionStore};

/// File-backed implementation of CollectionStore
///
/// A missing file reads as an empty collection, unless the collection's
/// legacy file (`agences.json`, `chantiers.json`) is present, in which case
/// that one is read. Saves always write the current file name. Writes go to
/// a temporary file that is renamed over the target, so a crash mid-write
/// leaves the previous contents intact.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
    state: Mutex<CacheState>,
}

#[derive(Debug, Default)]
struct CacheState {
    enabled: bool,
    entries: HashMap<Collection, Vec<Value>>,
}

impl JsonFileStore {
    /// Open an existing data directory
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.is_dir() {
            return Err(ChantierError::DataDirNotFound { path: dir });
        }
        Ok(Self { dir, state: Mutex::new(CacheState::default()) })
    }

    /// Create the data directory and an empty file for each missing collection.
    ///
    /// Existing files are left untouched. Returns the collections created.
    pub async fn init<P: AsRef<Path>>(dir: P) -> Result<(Self, Vec<Collection>)> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).await?;

        let store = Self::open(dir)?;
        let mut created = Vec::new();
        for collection in Collection::ALL {
            let legacy_exists =
                store.legacy_path_for(collection).is_some_and(|legacy| legacy.exists());
            if !store.path_for(collection).exists() && !legacy_exists {
                store.write_file(collection, &[]).await?;
                created.push(collection);
            }
        }

        tracing::info!(dir = %dir.display(), created = created.len(), "Initialized data directory");
        Ok((store, created))
    }

    /// Serve reads from memory after the first load of each collection.
    ///
    /// The cache is refreshed only after a successful write and shares the
    /// write lock, so concurrent callers never observe a stale entry.
    pub fn with_cache(mut self) -> Self {
        self.state.get_mut().enabled = true;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, collection: Collection) -> PathBuf {
        self.dir.join(collection.file_name())
    }

    fn legacy_path_for(&self, collection: Collection) -> Option<PathBuf> {
        collection.legacy_file_name().map(|name| self.dir.join(name))
    }

    async fn read_file(&self, collection: Collection) -> Result<Vec<Value>> {
        if let Some(records) = read_path(collection, &self.path_for(collection)).await? {
            return Ok(records);
        }

        let Some(legacy) = self.legacy_path_for(collection) else {
            return Ok(Vec::new());
        };
        match read_path(collection, &legacy).await? {
            Some(records) => {
                tracing::info!(
                    collection = %collection,
                    path = %legacy.display(),
                    records = records.len(),
                    "Reading legacy collection file"
                );
                Ok(records)
            }
            None => Ok(Vec::new()),
        }
    }

    async fn write_file(&self, collection: Collection, records: &[Value]) -> Result<()> {
        let path = self.path_for(collection);
        let tmp = path.with_extension("json.tmp");

        let content = serde_json::to_string_pretty(records)
            .map_err(|e| ChantierError::store(collection.as_str(), e))?;

        fs::write(&tmp, content).await.map_err(|e| ChantierError::store(collection.as_str(), e))?;
        fs::rename(&tmp, &path).await.map_err(|e| ChantierError::store(collection.as_str(), e))?;

        tracing::debug!(collection = %collection, records = records.len(), "Wrote collection file");
        Ok(())
    }
}

/// Read one collection file; `None` when it does not exist
async fn read_path(collection: Collection, path: &Path) -> Result<Option<Vec<Value>>> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ChantierError::store(collection.as_str(), e)),
    };

    if content.trim().is_empty() {
        return Ok(Some(Vec::new()));
    }

    serde_json::from_str(&content).map(Some).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Corrupt collection file");
        ChantierError::store(collection.as_str(), format!("corrupt file: {}", e))
    })
}

#[async_trait]
impl CollectionStore for JsonFileStore {
    async fn load(&self, collection: Collection) -> Result<Vec<Value>> {
        let mut state = self.state.lock().await;

        if let Some(cached) = state.entries.get(&collection) {
            return Ok(cached.clone());
        }

        let records = self.read_file(collection).await?;
        if state.enabled {
            state.entries.insert(collection, records.clone());
        }
        Ok(records)
    }

    async fn save(&self, collection: Collection, records: Vec<Value>) -> Result<()> {
        let mut state = self.state.lock().await;

        self.write_file(collection, &records).await?;
        if state.enabled {
            state.entries.insert(collection, records);
        }
        Ok(())
    }
}
