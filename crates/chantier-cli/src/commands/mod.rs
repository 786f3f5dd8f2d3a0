//! Command implementations

mod agencies;
mod assign;
mod check;
mod hash_password;
mod init;
mod notifications;
mod read;
mod report;
mod staff;
mod status;
mod worksites;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use chantier_core::config::{CliConfigOverrides, LayeredConfig};
use chantier_dispatch::Dispatcher;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Init(args) => init::execute(args, &config, &output).await,
        Commands::HashPassword(args) => hash_password::execute(args, &output),
        Commands::Report(args) => report::execute(args, &open(&config)?, &output).await,
        Commands::Check(args) => check::execute(args, &open(&config)?, &output).await,
        Commands::Assign(args) => assign::execute(args, &open(&config)?, &output).await,
        Commands::Worksites(args) => worksites::execute(args, &open(&config)?, &output).await,
        Commands::Agencies(args) => agencies::execute(args, &open(&config)?, &output).await,
        Commands::Staff(args) => staff::execute(args, &open(&config)?, &output).await,
        Commands::Notifications(args) => {
            notifications::execute(args, &open(&config)?, &output).await
        }
        Commands::Read(args) => read::execute(args, &open(&config)?, &output).await,
        Commands::Status(args) => status::execute(args, &config, &open(&config)?, &output).await,
    }
}

fn open(config: &LayeredConfig) -> Result<Dispatcher> {
    Dispatcher::from_config(config).with_context(|| {
        format!(
            "Failed to open data directory {} (run `chantier init` first)",
            config.data_dir.value.display()
        )
    })
}

/// Layer configuration: defaults, then the config file, then the
/// environment, then command-line flags.
fn load_config(cli: &Cli) -> Result<LayeredConfig> {
    let config = LayeredConfig::with_defaults();
    let config = match &cli.config {
        Some(path) => config
            .load_from_file(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => config.load_from_dir_if_present(".").context("Failed to load chantier.toml")?,
    };

    let mut config = config.load_from_env();
    config.update_from_cli(CliConfigOverrides {
        data_dir: cli.data_dir.clone(),
        storage: cli.storage.map(Into::into),
        cache: None,
        reassign_policy: cli.reassign.map(Into::into),
    });

    tracing::debug!(data_dir = %config.data_dir.value.display(), "Configuration loaded");
    Ok(config)
}
