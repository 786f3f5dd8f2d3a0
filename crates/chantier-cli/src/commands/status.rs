use crate::cli::StatusArgs;
use crate::output::OutputWriter;
use crate::output_types::{ConfigEntry, StatusOutput};
use anyhow::{Context, Result};
use chantier_core::config::{LayeredConfig, StorageKind};
use chantier_dispatch::Dispatcher;
use std::collections::BTreeMap;

pub async fn execute(
    args: StatusArgs,
    config: &LayeredConfig,
    dispatcher: &Dispatcher,
    output: &OutputWriter,
) -> Result<()> {
    let collections = dispatcher.status().await.context("Failed to read collections")?;

    let storage = match config.storage.value {
        StorageKind::Memory => "memory",
        StorageKind::Json => "json",
    };
    let entries = args.show_config.then(|| {
        config
            .to_inspection_map()
            .into_iter()
            .map(|(key, (value, source))| (key, ConfigEntry { value, source }))
            .collect::<BTreeMap<_, _>>()
    });

    let status = StatusOutput {
        storage: storage.to_string(),
        data_dir: config.data_dir.value.display().to_string(),
        collections,
        config: entries,
    };

    if output.is_json() {
        return output.result(status);
    }

    output.section("Store");
    output.kv("Storage", &status.storage);
    output.kv("Data directory", &status.data_dir);

    output.section("Collections");
    output.kv("Agencies", collections.agencies);
    output.kv("Users", collections.users);
    output.kv(
        "Worksites",
        format!("{} ({} unassigned)", collections.worksites, collections.unassigned_worksites),
    );
    output.kv(
        "Notifications",
        format!("{} ({} unread)", collections.notifications, collections.unread_notifications),
    );

    if let Some(entries) = &status.config {
        output.section("Configuration");
        for (key, entry) in entries {
            output.kv(key, format!("{} ({:?})", entry.value, entry.source));
        }
    }

    Ok(())
}
