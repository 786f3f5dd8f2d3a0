use crate::cli::CheckArgs;
use crate::output::OutputWriter;
use crate::output_types::{ProximityOutput, WorksiteRow};
use anyhow::{Context, Result};
use chantier_core::dedup::DUPLICATE_RADIUS_KM;
use chantier_dispatch::Dispatcher;

pub async fn execute(
    args: CheckArgs,
    dispatcher: &Dispatcher,
    output: &OutputWriter,
) -> Result<()> {
    let existing = dispatcher
        .check_proximity(args.position)
        .await
        .context("Failed to check for nearby worksites")?;

    if output.is_json() {
        return output.result(ProximityOutput { exists: existing.is_some(), worksite: existing });
    }

    let radius_m = DUPLICATE_RADIUS_KM * 1000.0;
    match existing {
        Some(worksite) => {
            output.warning(format!("A worksite already exists within {:.0} m", radius_m));
            output.table(vec![WorksiteRow::from(&worksite)]);
        }
        None => {
            output.success(format!("No worksite within {:.0} m of {}", radius_m, args.position))
        }
    }

    Ok(())
}
