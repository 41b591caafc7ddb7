//! Order commands.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::json;
use storedash_admin::ApiClient;
use storedash_admin::dashboard::{OrderFilter, format_amount, revenue, status_counts};
use storedash_admin::error::ApiError;
use storedash_core::{CurrencyCode, OrderId, OrderStatus};

use super::{CommandError, print_json};

/// List orders matching the filter with a per-status summary.
pub async fn list(
    client: &ApiClient,
    status: Option<OrderStatus>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<(), CommandError> {
    let filter = OrderFilter::new(status, from, to).map_err(ApiError::from)?;
    let orders = client.filter_orders(&filter).await?;

    let by_status: BTreeMap<String, usize> = status_counts(&orders)
        .into_iter()
        .map(|(status, count)| (status.to_string(), count))
        .collect();

    print_json(&json!({
        "count": orders.len(),
        "revenue": format_amount(revenue(&orders), CurrencyCode::USD),
        "byStatus": by_status,
        "orders": orders,
    }))
}

/// Show one order.
pub async fn show(client: &ApiClient, id: OrderId) -> Result<(), CommandError> {
    let order = client.get_order(id).await?;
    print_json(&order)
}

/// Resolve a scanned QR payload to an order.
pub async fn lookup(client: &ApiClient, payload: &str) -> Result<(), CommandError> {
    let order = client.lookup_order(payload).await?;
    print_json(&order)
}

/// Move an order to a new status.
pub async fn set_status(
    client: &ApiClient,
    id: OrderId,
    status: OrderStatus,
) -> Result<(), CommandError> {
    let order = client.update_order_status(id, status).await?;
    tracing::info!(order_id = %id, status = %order.status, "Order status updated");
    print_json(&order)
}
