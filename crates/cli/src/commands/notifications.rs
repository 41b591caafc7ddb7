//! Notification commands.

use serde_json::json;
use storedash_admin::ApiClient;
use storedash_admin::forms::BroadcastForm;
use storedash_core::{NotificationId, NotificationKind};

use super::{CommandError, print_json};

pub async fn list(client: &ApiClient, unread_only: bool) -> Result<(), CommandError> {
    print_json(&client.list_notifications(unread_only).await?)
}

pub async fn mark_read(client: &ApiClient, id: NotificationId) -> Result<(), CommandError> {
    client.mark_notification_read(id).await?;
    print_json(&json!({ "read": [id] }))
}

pub async fn mark_all_read(client: &ApiClient) -> Result<(), CommandError> {
    client.mark_all_notifications_read().await?;
    print_json(&json!({ "read": "all" }))
}

/// Send a notification to every user.
pub async fn broadcast(
    client: &ApiClient,
    title: String,
    message: String,
    kind: NotificationKind,
) -> Result<(), CommandError> {
    let form = BroadcastForm {
        title,
        message,
        kind,
    };
    client.broadcast_notification(&form).await?;
    print_json(&json!({ "sent": true, "title": form.title }))
}
