//! Integration tests for layered configuration
//!
//! Loading follows the precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use chantier_core::assignment::ReassignPolicy;
use chantier_core::config::{
    CliConfigOverrides, ConfigSource, LayeredConfig, StorageKind, CONFIG_FILE_NAME,
};
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

const ENV_VARS: [&str; 6] = [
    "CHANTIER_DATA_DIR",
    "CHANTIER_STORAGE",
    "CHANTIER_CACHE",
    "CHANTIER_REASSIGN_POLICY",
    "CHANTIER_AGENCY_RADIUS_KM",
    "CHANTIER_WORKSITE_RADIUS_KM",
];

fn clear_env() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_partial_file_configuration() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
storage = "memory"
# Only override storage, leave others as defaults
"#
    )
    .unwrap();

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

    assert_eq!(config.storage.value, StorageKind::Memory);
    assert_eq!(config.storage.source, ConfigSource::File);
    assert_eq!(config.data_dir.source, ConfigSource::Default);
    assert_eq!(config.reassign_policy.value, ReassignPolicy::Overwrite);
    assert_eq!(config.agency_radius_km.source, ConfigSource::Default);
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    env::set_var("CHANTIER_STORAGE", "memory");
    env::set_var("CHANTIER_REASSIGN_POLICY", "reject");
    env::set_var("CHANTIER_WORKSITE_RADIUS_KM", "12.5");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
storage = "json"
reassign_policy = "overwrite"
worksite_radius_km = 3.0
"#
    )
    .unwrap();

    let config =
        LayeredConfig::with_defaults().load_from_file(file.path()).unwrap().load_from_env();

    assert_eq!(config.storage.value, StorageKind::Memory);
    assert_eq!(config.storage.source, ConfigSource::Environment);
    assert_eq!(config.reassign_policy.value, ReassignPolicy::Reject);
    assert_eq!(config.reassign_policy.source, ConfigSource::Environment);
    assert_eq!(config.worksite_radius_km.value, 12.5);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_environment_values_are_ignored() {
    clear_env();
    env::set_var("CHANTIER_STORAGE", "postgres");
    env::set_var("CHANTIER_CACHE", "maybe");
    env::set_var("CHANTIER_AGENCY_RADIUS_KM", "-4");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.storage.value, StorageKind::Json);
    assert_eq!(config.storage.source, ConfigSource::Default);
    assert!(!config.cache.value);
    assert_eq!(config.agency_radius_km.value, 50.0);
    assert_eq!(config.agency_radius_km.source, ConfigSource::Default);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_all() {
    clear_env();
    env::set_var("CHANTIER_DATA_DIR", "/from/env");
    env::set_var("CHANTIER_CACHE", "true");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "data_dir = \"/from/file\"\ncache = false").unwrap();

    let mut config =
        LayeredConfig::with_defaults().load_from_file(file.path()).unwrap().load_from_env();

    assert_eq!(config.data_dir.value, PathBuf::from("/from/env"));
    assert!(config.cache.value);

    config.update_from_cli(CliConfigOverrides {
        data_dir: Some(PathBuf::from("/from/cli")),
        cache: Some(false),
        ..Default::default()
    });

    assert_eq!(config.data_dir.value, PathBuf::from("/from/cli"));
    assert_eq!(config.data_dir.source, ConfigSource::Cli);
    assert!(!config.cache.value);
    assert_eq!(config.cache.source, ConfigSource::Cli);

    clear_env();
}

#[test]
fn test_load_from_dir_if_present() {
    let temp_dir = TempDir::new().unwrap();

    // No file: defaults untouched
    let config = LayeredConfig::with_defaults().load_from_dir_if_present(temp_dir.path()).unwrap();
    assert_eq!(config.storage.source, ConfigSource::Default);

    fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "storage = \"memory\"\n").unwrap();
    let config = LayeredConfig::with_defaults().load_from_dir_if_present(temp_dir.path()).unwrap();
    assert_eq!(config.storage.value, StorageKind::Memory);
    assert_eq!(config.storage.source, ConfigSource::File);
}

#[test]
fn test_invalid_toml_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "invalid toml content [[[").unwrap();

    assert!(LayeredConfig::with_defaults().load_from_file(file.path()).is_err());
}

#[test]
fn test_unknown_enum_value_in_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "reassign_policy = \"sometimes\"").unwrap();

    assert!(LayeredConfig::with_defaults().load_from_file(file.path()).is_err());
}

#[test]
fn test_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let non_existent = temp_dir.path().join("does_not_exist.toml");

    assert!(LayeredConfig::with_defaults().load_from_file(&non_existent).is_err());
}
