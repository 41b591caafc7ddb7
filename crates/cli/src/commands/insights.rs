//! Analytics and search commands.

use serde_json::json;
use storedash_admin::ApiClient;
use storedash_admin::dashboard::format_amount;
use storedash_core::CurrencyCode;

use super::{CommandError, print_json};

/// Show the analytics snapshot with the revenue formatted for reading.
pub async fn analytics(client: &ApiClient) -> Result<(), CommandError> {
    let snapshot = client.analytics_dashboard().await?;
    print_json(&json!({
        "revenue": format_amount(snapshot.total_revenue, CurrencyCode::USD),
        "snapshot": snapshot,
    }))
}

pub async fn search(client: &ApiClient, query: &str) -> Result<(), CommandError> {
    let results = client.search(query).await?;
    print_json(&json!({
        "total": results.total(),
        "results": results,
    }))
}
