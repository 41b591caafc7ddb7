//! Category management.

use serde::de::IgnoredAny;
use storedash_core::{Category, CategoryId};
use tracing::instrument;

use super::client::ApiClient;
use super::request::RequestOptions;
use crate::error::{ApiError, ValidationError};
use crate::forms::{CategoryForm, Validate};

impl ApiClient {
    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_list("/categories", RequestOptions::new()).await
    }

    /// Get a category by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_category(&self, id: CategoryId) -> Result<Category, ApiError> {
        self.get(&format!("/categories/{id}")).await
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the form is invalid, or any request
    /// error.
    #[instrument(skip(self, form), fields(name = %form.name))]
    pub async fn create_category(&self, form: &CategoryForm) -> Result<Category, ApiError> {
        form.validate()?;
        self.post("/categories", form).await
    }

    /// Replace a category's fields.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the form is invalid or names the
    /// category as its own parent, or any request error.
    #[instrument(skip(self, form))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        form: &CategoryForm,
    ) -> Result<Category, ApiError> {
        form.validate()?;
        if form.parent_id == Some(id) {
            return Err(ValidationError::Invalid {
                field: "parentId",
                message: "a category cannot be its own parent".to_string(),
            }
            .into());
        }
        self.put(&format!("/categories/{id}"), form).await
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), ApiError> {
        self.delete::<IgnoredAny>(&format!("/categories/{id}"))
            .await
            .map(|_| ())
    }
}
