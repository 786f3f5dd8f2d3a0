use crate::cli::NotificationsArgs;
use crate::output::OutputWriter;
use crate::output_types::NotificationRow;
use anyhow::{Context, Result};
use chantier_core::models::UserId;
use chantier_dispatch::Dispatcher;

pub async fn execute(
    args: NotificationsArgs,
    dispatcher: &Dispatcher,
    output: &OutputWriter,
) -> Result<()> {
    let recipient = UserId::from(args.user);
    let mut notifications = dispatcher
        .notifications_for(&recipient)
        .await
        .with_context(|| format!("Failed to list notifications for {}", recipient))?;
    if args.unread {
        notifications.retain(|notification| !notification.read);
    }

    if output.is_json() {
        return output.result(&notifications);
    }

    let unread = notifications.iter().filter(|notification| !notification.read).count();
    output.table(notifications.iter().map(NotificationRow::from).collect());
    output.info(format!("{} unread", unread));

    Ok(())
}
