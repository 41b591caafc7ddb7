//! User management.

use serde::Serialize;
use serde::de::IgnoredAny;
use storedash_core::{User, UserId, UserRole, UserUpdate};
use tracing::instrument;

use super::client::ApiClient;
use super::request::RequestOptions;
use crate::error::{ApiError, ValidationError};

#[derive(Serialize)]
struct ActiveUpdate {
    active: bool,
}

impl ApiClient {
    /// List users, optionally narrowed to one role.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_users(&self, role: Option<UserRole>) -> Result<Vec<User>, ApiError> {
        let role = role.filter(|role| *role != UserRole::Unknown);
        self.get_list("/users", RequestOptions::new().query_opt("role", role))
            .await
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: UserId) -> Result<User, ApiError> {
        self.get(&format!("/users/{id}")).await
    }

    /// Update a user's profile fields. Unset fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for a blank name or an unknown role, or
    /// any request error.
    #[instrument(skip(self))]
    pub async fn update_user(&self, id: UserId, update: &UserUpdate) -> Result<User, ApiError> {
        if update
            .first_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(ValidationError::Required { field: "firstName" }.into());
        }
        if update
            .last_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(ValidationError::Required { field: "lastName" }.into());
        }
        if update.role == Some(UserRole::Unknown) {
            return Err(ValidationError::Invalid {
                field: "role",
                message: "unsupported role".to_string(),
            }
            .into());
        }
        self.put(&format!("/users/{id}"), update).await
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        self.delete::<IgnoredAny>(&format!("/users/{id}"))
            .await
            .map(|_| ())
    }

    /// Enable or disable a user's account.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn set_user_active(&self, id: UserId, active: bool) -> Result<User, ApiError> {
        self.patch(&format!("/users/{id}/status"), &ActiveUpdate { active })
            .await
    }
}
