use crate::cli::StaffArgs;
use crate::output::OutputWriter;
use crate::output_types::UserRow;
use anyhow::{Context, Result};
use chantier_core::models::AgencyId;
use chantier_dispatch::Dispatcher;

pub async fn execute(
    args: StaffArgs,
    dispatcher: &Dispatcher,
    output: &OutputWriter,
) -> Result<()> {
    let agency = AgencyId::from(args.agency);
    let staff = dispatcher
        .agency_staff(&agency)
        .await
        .with_context(|| format!("Failed to list staff of agency {}", agency))?;

    if output.is_json() {
        return output.result(&staff);
    }

    output.table(staff.iter().map(UserRow::from).collect());

    Ok(())
}
