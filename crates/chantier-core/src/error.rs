//! Error types for Chantier

use crate::models::{Worksite, WorksiteId, WorksiteStatus};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChantierError {
    // Business rejections
    #[error("A worksite already exists within 200 m of this position ({})", existing.id)]
    DuplicateNearby { existing: Box<Worksite> },

    #[error("Worksite {id} is already {status}")]
    AlreadyAssigned { id: WorksiteId, status: WorksiteStatus },

    // Lookup errors
    #[error("Worksite not found: {id}")]
    WorksiteNotFound { id: String },

    #[error("User not found: {id}")]
    UserNotFound { id: String },

    #[error("Agency not found: {id}")]
    AgencyNotFound { id: String },

    // Input errors
    #[error("Invalid coordinate ({lat}, {lon}): {reason}")]
    InvalidCoordinate { lat: f64, lon: f64, reason: String },

    #[error("Invalid search radius {radius}: expected a non-negative number of kilometres")]
    InvalidRadius { radius: f64 },

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Store errors
    #[error("Store unavailable for collection '{collection}': {reason}")]
    StoreUnavailable { collection: String, reason: String },

    #[error("Data directory not found at {path}")]
    DataDirNotFound { path: PathBuf },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ChantierError {
    /// Build a `StoreUnavailable` error for a collection
    pub fn store(collection: impl Into<String>, reason: impl ToString) -> Self {
        Self::StoreUnavailable { collection: collection.into(), reason: reason.to_string() }
    }
}

impl From<serde_json::Error> for ChantierError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ChantierError>;
