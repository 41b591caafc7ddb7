//! Dashboard notification records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{NotificationId, UserId};
use super::status::NotificationKind;
use super::timestamp;

/// A notification shown in the dashboard inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_type_field() {
        let n: Notification = serde_json::from_str(
            r#"{"id": 5, "title": "New order", "message": "Order #5", "type": "ORDER", "read": false}"#,
        )
        .unwrap();
        assert_eq!(n.kind, NotificationKind::Order);
        assert!(!n.read);
    }
}
