use crate::cli::ReportArgs;
use crate::output::OutputWriter;
use crate::output_types::ReportOutput;
use anyhow::{bail, Context, Result};
use chantier_core::dedup::DUPLICATE_RADIUS_KM;
use chantier_core::models::{UserId, WorksiteReport};
use chantier_core::ChantierError;
use chantier_dispatch::Dispatcher;

pub async fn execute(
    args: ReportArgs,
    dispatcher: &Dispatcher,
    output: &OutputWriter,
) -> Result<()> {
    let reporter_id = UserId::from(args.reporter);
    let reporter_name = match args.reporter_name {
        Some(name) => name,
        None => dispatcher.get_user(&reporter_id).await.map(|user| user.name).with_context(|| {
            format!("Unknown reporter {}; pass --reporter-name to report anyway", reporter_id)
        })?,
    };

    let report = WorksiteReport {
        position: args.position,
        description: args.description,
        photo: args.photo,
        reporter_id,
        reporter_name,
    };

    let outcome = match dispatcher.report_worksite(report).await {
        Ok(outcome) => outcome,
        Err(ChantierError::DuplicateNearby { existing }) => {
            output.error(format!(
                "Worksite {} ({}) was already reported within {:.0} m",
                existing.id,
                existing.status,
                DUPLICATE_RADIUS_KM * 1000.0
            ));
            bail!("Duplicate worksite report");
        }
        Err(e) => return Err(e).context("Failed to report worksite"),
    };

    if let Some(error) = &outcome.notification_error {
        output.warning(format!("Worksite stored but the director was not notified: {}", error));
    }

    if output.is_json() {
        return output.result(ReportOutput::from(outcome));
    }

    output.success(format!("Worksite {} reported", outcome.worksite.id));
    output.kv("Status", outcome.worksite.status);
    match &outcome.nearest_agency {
        Some(agency) => output.kv(
            "Agency",
            format!("{} ({:.2} km away)", agency.item.name, agency.distance_km),
        ),
        None => output.warning("No agency on record; the worksite is not routed"),
    }
    if let Some(director) = outcome.notification.as_ref().and_then(|n| n.recipient_id.as_ref()) {
        output.info(format!("Notified director {}", director));
    }

    Ok(())
}
