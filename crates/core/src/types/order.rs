//! Order records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{OrderId, ProductId, StoreId, UserId};
use super::status::OrderStatus;
use super::timestamp;

/// An order as listed on the orders screen.
///
/// `total_amount` and `created_at` are the canonical fields of the backend
/// schema; the legacy `total`/`orderDate` fields are not read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    /// Human-facing order reference printed on packing slips and QR codes.
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub store_id: Option<StoreId>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub total_amount: Decimal,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
}

/// A line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub product_name: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub unit_price: Decimal,
}

impl OrderItem {
    /// `quantity * unit_price`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Body of `PUT /orders/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_deserializes_backend_shape() {
        let json = r#"{
            "id": 12,
            "orderNumber": "ORD-0012",
            "userId": 3,
            "status": "SHIPPED",
            "totalAmount": 59.98,
            "createdAt": "2024-05-01T12:00:00",
            "items": [
                {"productId": 7, "productName": "Mug", "quantity": 2, "unitPrice": 29.99}
            ]
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, OrderId::new(12));
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.total_amount, Decimal::new(5998, 2));
        assert!(order.created_at.is_some());
        assert_eq!(order.items[0].subtotal(), Decimal::new(5998, 2));
    }

    #[test]
    fn test_order_minimal_shape() {
        let order: Order = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.items.is_empty());
        assert!(order.created_at.is_none());
    }

    #[test]
    fn test_status_update_body() {
        let body = OrderStatusUpdate {
            status: OrderStatus::Cancelled,
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({"status": "CANCELLED"})
        );
    }
}
