use crate::cli::AssignArgs;
use crate::output::OutputWriter;
use crate::output_types::AssignOutput;
use anyhow::{Context, Result};
use chantier_core::models::{UserId, WorksiteId};
use chantier_dispatch::Dispatcher;

pub async fn execute(
    args: AssignArgs,
    dispatcher: &Dispatcher,
    output: &OutputWriter,
) -> Result<()> {
    let assignee = dispatcher
        .resolve_assignee(UserId::from(args.to), args.name)
        .await
        .context("Failed to resolve assignee; pass --name to skip the lookup")?;

    let id = WorksiteId::from(args.id);
    let outcome = dispatcher
        .assign_worksite(&id, assignee)
        .await
        .with_context(|| format!("Failed to assign worksite {}", id))?;

    if let Some(error) = &outcome.notification_error {
        output.warning(format!("Assignment stored but the assignee was not notified: {}", error));
    }

    if output.is_json() {
        return output.result(AssignOutput::from(outcome));
    }

    let name = outcome.worksite.assigned_to_name.as_deref().unwrap_or_default();
    output.success(format!("Worksite {} assigned to {}", outcome.worksite.id, name));
    if let Some(previous) = &outcome.previous_assignee {
        output.info(format!("Previously assigned to {}", previous));
    }

    Ok(())
}
