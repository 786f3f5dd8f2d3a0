//! Notification ledger queries and read acknowledgement.

use crate::models::{Notification, NotificationId, UserId};

/// Notifications addressed to `recipient`, most recent first.
///
/// The sort is stable, so notifications created at the same instant keep
/// their ledger order.
pub fn list_for_recipient<'a>(
    recipient: &UserId,
    notifications: &'a [Notification],
) -> Vec<&'a Notification> {
    let mut mine: Vec<&Notification> =
        notifications.iter().filter(|n| n.recipient_id.as_ref() == Some(recipient)).collect();
    mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    mine
}

/// Number of unread notifications addressed to `recipient`
pub fn unread_count(recipient: &UserId, notifications: &[Notification]) -> usize {
    notifications
        .iter()
        .filter(|n| n.recipient_id.as_ref() == Some(recipient) && !n.read)
        .count()
}

/// Mark a notification as read.
///
/// Returns `true` only if the ledger changed. Unknown ids and notifications
/// that are already read are left alone; callers treat both as success.
pub fn mark_read(id: &NotificationId, notifications: &mut [Notification]) -> bool {
    match notifications.iter_mut().find(|n| &n.id == id) {
        Some(n) if !n.read => {
            n.read = true;
            true
        }
        _ => false,
    }
}
