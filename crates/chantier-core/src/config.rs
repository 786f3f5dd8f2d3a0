use crate::assignment::ReassignPolicy;
use crate::error::{ChantierError, Result};
use crate::locator::{DEFAULT_AGENCY_RADIUS_KM, DEFAULT_WORKSITE_RADIUS_KM};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "chantier.toml";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Which store adapter backs the collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Process memory, lost on exit
    Memory,
    /// One JSON file per collection in the data directory
    #[default]
    Json,
}

/// Layered configuration for Chantier
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub data_dir: ConfigValue<PathBuf>,
    pub storage: ConfigValue<StorageKind>,
    pub cache: ConfigValue<bool>,
    pub reassign_policy: ConfigValue<ReassignPolicy>,
    pub agency_radius_km: ConfigValue<f64>,
    pub worksite_radius_km: ConfigValue<f64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            data_dir: ConfigValue::new(PathBuf::from("data"), ConfigSource::Default),
            storage: ConfigValue::new(StorageKind::Json, ConfigSource::Default),
            cache: ConfigValue::new(false, ConfigSource::Default),
            reassign_policy: ConfigValue::new(ReassignPolicy::Overwrite, ConfigSource::Default),
            agency_radius_km: ConfigValue::new(DEFAULT_AGENCY_RADIUS_KM, ConfigSource::Default),
            worksite_radius_km: ConfigValue::new(DEFAULT_WORKSITE_RADIUS_KM, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ChantierError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| ChantierError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(data_dir) = file_config.data_dir {
            self.data_dir.update(data_dir, ConfigSource::File);
        }

        if let Some(storage) = file_config.storage {
            self.storage.update(storage, ConfigSource::File);
        }

        if let Some(cache) = file_config.cache {
            self.cache.update(cache, ConfigSource::File);
        }

        if let Some(policy) = file_config.reassign_policy {
            self.reassign_policy.update(policy, ConfigSource::File);
        }

        if let Some(radius) = file_config.agency_radius_km {
            self.agency_radius_km
                .update(parse_radius("agency_radius_km", radius)?, ConfigSource::File);
        }

        if let Some(radius) = file_config.worksite_radius_km {
            self.worksite_radius_km
                .update(parse_radius("worksite_radius_km", radius)?, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load `chantier.toml` from `dir` if it exists
    pub fn load_from_dir_if_present<P: AsRef<Path>>(self, dir: P) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if path.is_file() {
            self.load_from_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // CHANTIER_DATA_DIR
        if let Ok(dir) = env::var("CHANTIER_DATA_DIR") {
            self.data_dir.update(PathBuf::from(dir), ConfigSource::Environment);
        }

        // CHANTIER_STORAGE
        if let Ok(storage_str) = env::var("CHANTIER_STORAGE") {
            match parse_storage_kind(&storage_str) {
                Ok(storage) => self.storage.update(storage, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CHANTIER_STORAGE value '{}': expected memory or json",
                    storage_str
                ),
            }
        }

        // CHANTIER_CACHE
        if let Ok(cache_str) = env::var("CHANTIER_CACHE") {
            match parse_bool(&cache_str) {
                Some(cache) => self.cache.update(cache, ConfigSource::Environment),
                None => tracing::warn!(
                    "Invalid CHANTIER_CACHE value '{}': expected true or false",
                    cache_str
                ),
            }
        }

        // CHANTIER_REASSIGN_POLICY
        if let Ok(policy_str) = env::var("CHANTIER_REASSIGN_POLICY") {
            match parse_reassign_policy(&policy_str) {
                Ok(policy) => self.reassign_policy.update(policy, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CHANTIER_REASSIGN_POLICY value '{}': expected overwrite or reject",
                    policy_str
                ),
            }
        }

        // CHANTIER_AGENCY_RADIUS_KM
        if let Ok(radius_str) = env::var("CHANTIER_AGENCY_RADIUS_KM") {
            match parse_radius_str("agency_radius_km", &radius_str) {
                Ok(radius) => self.agency_radius_km.update(radius, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CHANTIER_AGENCY_RADIUS_KM value '{}': expected a non-negative number",
                    radius_str
                ),
            }
        }

        // CHANTIER_WORKSITE_RADIUS_KM
        if let Ok(radius_str) = env::var("CHANTIER_WORKSITE_RADIUS_KM") {
            match parse_radius_str("worksite_radius_km", &radius_str) {
                Ok(radius) => self.worksite_radius_km.update(radius, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CHANTIER_WORKSITE_RADIUS_KM value '{}': expected a number >= 0",
                    radius_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(data_dir) = overrides.data_dir {
            self.data_dir.update(data_dir, ConfigSource::Cli);
        }

        if let Some(storage) = overrides.storage {
            self.storage.update(storage, ConfigSource::Cli);
        }

        if let Some(cache) = overrides.cache {
            self.cache.update(cache, ConfigSource::Cli);
        }

        if let Some(policy) = overrides.reassign_policy {
            self.reassign_policy.update(policy, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "data_dir".to_string(),
            (self.data_dir.value.display().to_string(), self.data_dir.source),
        );

        map.insert(
            "storage".to_string(),
            (format!("{:?}", self.storage.value), self.storage.source),
        );

        map.insert("cache".to_string(), (self.cache.value.to_string(), self.cache.source));

        map.insert(
            "reassign_policy".to_string(),
            (format!("{:?}", self.reassign_policy.value), self.reassign_policy.source),
        );

        map.insert(
            "agency_radius_km".to_string(),
            (self.agency_radius_km.value.to_string(), self.agency_radius_km.source),
        );

        map.insert(
            "worksite_radius_km".to_string(),
            (self.worksite_radius_km.value.to_string(), self.worksite_radius_km.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    storage: Option<StorageKind>,
    cache: Option<bool>,
    reassign_policy: Option<ReassignPolicy>,
    agency_radius_km: Option<f64>,
    worksite_radius_km: Option<f64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub storage: Option<StorageKind>,
    pub cache: Option<bool>,
    pub reassign_policy: Option<ReassignPolicy>,
}

/// Parse storage kind from string
pub fn parse_storage_kind(s: &str) -> Result<StorageKind> {
    match s.to_lowercase().as_str() {
        "memory" | "mem" => Ok(StorageKind::Memory),
        "json" | "file" => Ok(StorageKind::Json),
        _ => Err(ChantierError::ConfigInvalid {
            key: "storage".to_string(),
            reason: format!("Invalid storage backend: {}. Use memory or json", s),
        }),
    }
}

/// Parse reassignment policy from string
pub fn parse_reassign_policy(s: &str) -> Result<ReassignPolicy> {
    match s.to_lowercase().as_str() {
        "overwrite" => Ok(ReassignPolicy::Overwrite),
        "reject" => Ok(ReassignPolicy::Reject),
        _ => Err(ChantierError::ConfigInvalid {
            key: "reassign_policy".to_string(),
            reason: format!("Invalid reassign policy: {}. Use overwrite or reject", s),
        }),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_radius_str(key: &str, s: &str) -> Result<f64> {
    let radius = s.trim().parse::<f64>().map_err(|e| ChantierError::ConfigInvalid {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    parse_radius(key, radius)
}

fn parse_radius(key: &str, radius: f64) -> Result<f64> {
    if radius.is_finite() && radius >= 0.0 {
        Ok(radius)
    } else {
        Err(ChantierError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("Radius must be a non-negative number of kilometres, got {}", radius),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.data_dir.value, PathBuf::from("data"));
        assert_eq!(config.data_dir.source, ConfigSource::Default);
        assert_eq!(config.storage.value, StorageKind::Json);
        assert!(!config.cache.value);
        assert_eq!(config.reassign_policy.value, ReassignPolicy::Overwrite);
        assert_eq!(config.agency_radius_km.value, 50.0);
        assert_eq!(config.worksite_radius_km.value, 5.0);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);
        assert_eq!(value.source, ConfigSource::Environment);

        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
data_dir = "/var/lib/chantier"
storage = "memory"
cache = true
reassign_policy = "reject"
agency_radius_km = 25.0
worksite_radius_km = 2.5
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.data_dir.value, PathBuf::from("/var/lib/chantier"));
        assert_eq!(config.data_dir.source, ConfigSource::File);
        assert_eq!(config.storage.value, StorageKind::Memory);
        assert!(config.cache.value);
        assert_eq!(config.reassign_policy.value, ReassignPolicy::Reject);
        assert_eq!(config.agency_radius_km.value, 25.0);
        assert_eq!(config.worksite_radius_km.value, 2.5);
    }

    #[test]
    fn test_file_rejects_negative_radius() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "agency_radius_km = -1.0").unwrap();

        let err = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap_err();
        assert!(
            matches!(err, ChantierError::ConfigInvalid { ref key, .. } if key == "agency_radius_km")
        );
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        config.update_from_cli(CliConfigOverrides {
            data_dir: Some(PathBuf::from("/tmp/chantier")),
            storage: Some(StorageKind::Memory),
            ..Default::default()
        });

        assert_eq!(config.data_dir.value, PathBuf::from("/tmp/chantier"));
        assert_eq!(config.data_dir.source, ConfigSource::Cli);
        assert_eq!(config.storage.value, StorageKind::Memory);
        assert_eq!(config.cache.source, ConfigSource::Default);
        assert_eq!(config.reassign_policy.source, ConfigSource::Default);
    }

    #[test]
    fn test_parse_storage_kind() {
        assert_eq!(parse_storage_kind("memory").unwrap(), StorageKind::Memory);
        assert_eq!(parse_storage_kind("JSON").unwrap(), StorageKind::Json);
        assert!(parse_storage_kind("postgres").is_err());
    }

    #[test]
    fn test_parse_reassign_policy() {
        assert_eq!(parse_reassign_policy("overwrite").unwrap(), ReassignPolicy::Overwrite);
        assert_eq!(parse_reassign_policy("Reject").unwrap(), ReassignPolicy::Reject);
        assert!(parse_reassign_policy("sometimes").is_err());
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        let keys = [
            "data_dir",
            "storage",
            "cache",
            "reassign_policy",
            "agency_radius_km",
            "worksite_radius_km",
        ];
        for key in keys {
            assert!(map.contains_key(key), "missing {}", key);
        }

        let (storage, source) = &map["storage"];
        assert_eq!(storage, "Json");
        assert_eq!(*source, ConfigSource::Default);
    }
}
