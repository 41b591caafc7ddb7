//! Store management.

use serde::de::IgnoredAny;
use storedash_core::{Product, Store, StoreId};
use tracing::instrument;

use super::client::ApiClient;
use super::request::RequestOptions;
use crate::error::ApiError;
use crate::forms::{StoreForm, Validate};

impl ApiClient {
    /// List all stores.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_stores(&self) -> Result<Vec<Store>, ApiError> {
        self.get_list("/stores", RequestOptions::new()).await
    }

    /// Get a store by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_store(&self, id: StoreId) -> Result<Store, ApiError> {
        self.get(&format!("/stores/{id}")).await
    }

    /// Create a store.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the form is invalid, or any request
    /// error.
    #[instrument(skip(self, form), fields(name = %form.name))]
    pub async fn create_store(&self, form: &StoreForm) -> Result<Store, ApiError> {
        form.validate()?;
        self.post("/stores", form).await
    }

    /// Replace a store's editable fields.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the form is invalid, or any request
    /// error.
    #[instrument(skip(self, form))]
    pub async fn update_store(&self, id: StoreId, form: &StoreForm) -> Result<Store, ApiError> {
        form.validate()?;
        self.put(&format!("/stores/{id}"), form).await
    }

    /// Delete a store.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn delete_store(&self, id: StoreId) -> Result<(), ApiError> {
        self.delete::<IgnoredAny>(&format!("/stores/{id}"))
            .await
            .map(|_| ())
    }

    /// List the products a store sells.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn store_products(&self, id: StoreId) -> Result<Vec<Product>, ApiError> {
        self.get_list(&format!("/stores/{id}/products"), RequestOptions::new())
            .await
    }
}
