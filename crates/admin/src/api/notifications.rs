//! Notifications for the signed-in user and broadcasts to everyone.

use reqwest::Method;
use serde::de::IgnoredAny;
use storedash_core::{Notification, NotificationId};
use tracing::{info, instrument};

use super::client::ApiClient;
use super::request::RequestOptions;
use crate::error::ApiError;
use crate::forms::{BroadcastForm, Validate};

impl ApiClient {
    /// List the signed-in user's notifications.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_notifications(&self, unread_only: bool) -> Result<Vec<Notification>, ApiError> {
        let options = if unread_only {
            RequestOptions::new().query("unread", true)
        } else {
            RequestOptions::new()
        };
        self.get_list("/notifications", options).await
    }

    /// Mark one notification as read.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn mark_notification_read(&self, id: NotificationId) -> Result<(), ApiError> {
        self.request::<IgnoredAny>(
            &format!("/notifications/{id}/read"),
            RequestOptions::new().method(Method::PUT),
        )
        .await
        .map(|_| ())
    }

    /// Mark every notification as read.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn mark_all_notifications_read(&self) -> Result<(), ApiError> {
        self.request::<IgnoredAny>(
            "/notifications/read-all",
            RequestOptions::new().method(Method::PUT),
        )
        .await
        .map(|_| ())
    }

    /// Send a notification to every user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the form is invalid, or any request
    /// error.
    #[instrument(skip(self, form), fields(title = %form.title))]
    pub async fn broadcast_notification(&self, form: &BroadcastForm) -> Result<(), ApiError> {
        form.validate()?;
        self.post::<IgnoredAny, _>("/notifications/broadcast", form)
            .await?;
        info!("Notification broadcast");
        Ok(())
    }
}
