use crate::cli::AgenciesArgs;
use crate::output::OutputWriter;
use crate::output_types::AgencyRow;
use anyhow::{Context, Result};
use chantier_dispatch::Dispatcher;

pub async fn execute(
    args: AgenciesArgs,
    dispatcher: &Dispatcher,
    output: &OutputWriter,
) -> Result<()> {
    if let Some(point) = args.near {
        let nearby = dispatcher
            .nearby_agencies(point, args.radius)
            .await
            .context("Failed to search nearby agencies")?;

        if output.is_json() {
            return output.result(&nearby);
        }
        let rows = nearby
            .iter()
            .map(|ranked| AgencyRow::new(&ranked.item, Some(ranked.distance_km)))
            .collect();
        output.table(rows);
        return Ok(());
    }

    let agencies = dispatcher.list_agencies().await.context("Failed to list agencies")?;

    if output.is_json() {
        return output.result(&agencies);
    }
    output.table(agencies.iter().map(|agency| AgencyRow::new(agency, None)).collect());

    Ok(())
}
