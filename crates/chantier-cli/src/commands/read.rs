use crate::cli::ReadArgs;
use crate::output::OutputWriter;
use crate::output_types::ReadOutput;
use anyhow::{Context, Result};
use chantier_core::models::NotificationId;
use chantier_dispatch::Dispatcher;

pub async fn execute(args: ReadArgs, dispatcher: &Dispatcher, output: &OutputWriter) -> Result<()> {
    let id = NotificationId::from(args.id);
    let changed = dispatcher
        .mark_notification_read(&id)
        .await
        .with_context(|| format!("Failed to mark notification {} read", id))?;

    if output.is_json() {
        return output.result(ReadOutput { id: id.to_string(), changed });
    }

    if changed {
        output.success(format!("Notification {} marked read", id));
    } else {
        output.info(format!("Notification {} was already read or does not exist", id));
    }

    Ok(())
}
