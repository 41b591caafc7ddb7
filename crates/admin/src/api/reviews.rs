//! Review moderation.

use serde::de::IgnoredAny;
use storedash_core::{ProductId, Review, ReviewId};
use tracing::instrument;

use super::client::ApiClient;
use super::request::RequestOptions;
use crate::error::ApiError;
use crate::forms::{ReviewForm, Validate};

impl ApiClient {
    /// List all reviews.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_reviews(&self) -> Result<Vec<Review>, ApiError> {
        self.get_list("/reviews", RequestOptions::new()).await
    }

    /// List the reviews of one product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn product_reviews(&self, product_id: ProductId) -> Result<Vec<Review>, ApiError> {
        self.get_list(
            &format!("/products/{product_id}/reviews"),
            RequestOptions::new(),
        )
        .await
    }

    /// Post a review.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the form is invalid, or any request
    /// error.
    #[instrument(skip(self, form), fields(product_id = %form.product_id))]
    pub async fn create_review(&self, form: &ReviewForm) -> Result<Review, ApiError> {
        form.validate()?;
        self.post("/reviews", form).await
    }

    /// Edit a review.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the form is invalid, or any request
    /// error.
    #[instrument(skip(self, form))]
    pub async fn update_review(&self, id: ReviewId, form: &ReviewForm) -> Result<Review, ApiError> {
        form.validate()?;
        self.put(&format!("/reviews/{id}"), form).await
    }

    /// Remove a review.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn delete_review(&self, id: ReviewId) -> Result<(), ApiError> {
        self.delete::<IgnoredAny>(&format!("/reviews/{id}"))
            .await
            .map(|_| ())
    }
}
