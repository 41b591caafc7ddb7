//! Global search and backend health.

use storedash_core::{HealthStatus, SearchResults};
use tracing::instrument;

use super::client::ApiClient;
use crate::error::{ApiError, ValidationError};

impl ApiClient {
    /// Search products, stores and users at once.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for a blank query, or any request
    /// error.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<SearchResults, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ValidationError::Required { field: "query" }.into());
        }
        self.get_with_query("/search", &[("q", query.to_string())])
            .await
    }

    /// Ask the backend whether it is up.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        self.get("/health").await
    }
}
