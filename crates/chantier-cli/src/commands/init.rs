use crate::cli::InitArgs;
use crate::output::OutputWriter;
use crate::output_types::InitOutput;
use anyhow::{Context, Result};
use chantier_core::config::LayeredConfig;
use chantier_store::JsonFileStore;

pub async fn execute(args: InitArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let dir = args.path.unwrap_or_else(|| config.data_dir.value.clone());

    let (_, created) = JsonFileStore::init(&dir)
        .await
        .with_context(|| format!("Failed to initialize data directory {}", dir.display()))?;

    if output.is_json() {
        return output.result(InitOutput {
            data_dir: dir.display().to_string(),
            created: created.iter().map(|c| c.file_name()).collect(),
        });
    }

    output.success(format!("Initialized data directory at {}", dir.display()));
    if created.is_empty() {
        output.info("All collection files already present");
    }
    for collection in &created {
        output.info(format!("Created {}", collection.file_name()));
    }
    output.info("Add agencies and users to their files; `chantier hash-password` makes hashes");

    Ok(())
}
