use async_trait::async_trait;
use chantier_core::error::Result;
use serde_json::Value;
use std::fmt;

/// The persisted collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Agencies,
    Users,
    Worksites,
    Notifications,
}

impl Collection {
    pub const ALL: [Collection; 4] =
        [Collection::Agencies, Collection::Users, Collection::Worksites, Collection::Notifications];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Agencies => "agencies",
            Collection::Users => "users",
            Collection::Worksites => "worksites",
            Collection::Notifications => "notifications",
        }
    }

    /// File name used by file-backed adapters
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }

    /// File name written by the earlier French-language deployment
    pub fn legacy_file_name(&self) -> Option<&'static str> {
        match self {
            Collection::Agencies => Some("agences.json"),
            Collection::Worksites => Some("chantiers.json"),
            Collection::Users | Collection::Notifications => None,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Port for whole-collection persistence
///
/// Records are exchanged as raw JSON so adapters stay independent of the
/// domain types. `save` replaces the entire collection.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Load every record of a collection, in stored order
    async fn load(&self, collection: Collection) -> Result<Vec<Value>>;

    /// Replace a collection with `records`
    async fn save(&self, collection: Collection, records: Vec<Value>) -> Result<()>;
}
