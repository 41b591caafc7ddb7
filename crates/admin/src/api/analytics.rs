//! Dashboard analytics.

use storedash_core::AnalyticsSnapshot;
use tracing::instrument;

use super::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Fetch the analytics snapshot shown on the dashboard home screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn analytics_dashboard(&self) -> Result<AnalyticsSnapshot, ApiError> {
        self.get("/analytics/dashboard").await
    }
}
