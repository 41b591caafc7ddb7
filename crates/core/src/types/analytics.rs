//! Dashboard analytics snapshot.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Aggregates shown on the dashboard home screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsSnapshot {
    pub total_revenue: Decimal,
    pub total_orders: u64,
    pub total_users: u64,
    pub total_products: u64,
    pub total_stores: u64,
    /// Order count keyed by status wire name.
    pub orders_by_status: BTreeMap<String, u64>,
    pub revenue_by_day: Vec<DailyRevenue>,
    pub top_products: Vec<TopProduct>,
}

/// Revenue for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: Decimal,
    #[serde(default)]
    pub orders: u64,
}

/// A best-selling product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product_id: ProductId,
    pub name: String,
    #[serde(default)]
    pub units_sold: u64,
    #[serde(default)]
    pub revenue: Decimal,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_tolerates_missing_sections() {
        let snapshot: AnalyticsSnapshot =
            serde_json::from_str(r#"{"totalOrders": 10, "ordersByStatus": {"PENDING": 4}}"#)
                .unwrap();
        assert_eq!(snapshot.total_orders, 10);
        assert_eq!(snapshot.orders_by_status.get("PENDING"), Some(&4));
        assert!(snapshot.revenue_by_day.is_empty());
    }
}
