use crate::cli::WorksitesArgs;
use crate::output::OutputWriter;
use crate::output_types::WorksiteRow;
use anyhow::{Context, Result};
use chantier_core::models::{AgencyId, WorksiteStatus};
use chantier_dispatch::Dispatcher;

pub async fn execute(
    args: WorksitesArgs,
    dispatcher: &Dispatcher,
    output: &OutputWriter,
) -> Result<()> {
    let status = args.status.map(WorksiteStatus::from);

    if let Some(point) = args.near {
        let mut nearby = dispatcher
            .nearby_worksites(point, args.radius)
            .await
            .context("Failed to search nearby worksites")?;
        if let Some(status) = status {
            nearby.retain(|ranked| ranked.item.status == status);
        }

        if output.is_json() {
            return output.result(&nearby);
        }
        output.table(nearby.iter().map(WorksiteRow::from).collect());
        return Ok(());
    }

    let worksites = match (args.agency, status) {
        (Some(agency), status) => {
            let mut worksites = dispatcher
                .agency_worksites(&AgencyId::from(agency))
                .await
                .context("Failed to list agency worksites")?;
            if let Some(status) = status {
                worksites.retain(|worksite| worksite.status == status);
            }
            worksites
        }
        (None, Some(status)) => dispatcher
            .worksites_with_status(status)
            .await
            .context("Failed to list worksites")?,
        (None, None) => dispatcher.list_worksites().await.context("Failed to list worksites")?,
    };

    if output.is_json() {
        return output.result(&worksites);
    }
    output.table(worksites.iter().map(WorksiteRow::from).collect());

    Ok(())
}
