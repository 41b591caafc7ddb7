//! Order operations.

use storedash_core::{Order, OrderId, OrderStatus, OrderStatusUpdate};
use tracing::{debug, instrument};

use super::client::ApiClient;
use super::request::RequestOptions;
use crate::dashboard::{OrderFilter, OrderReference, parse_order_code};
use crate::error::{ApiError, ValidationError};

impl ApiClient {
    /// List orders, optionally narrowed to one status.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, ApiError> {
        let status = status.filter(|status| *status != OrderStatus::Unknown);
        self.get_list("/orders", RequestOptions::new().query_opt("status", status))
            .await
    }

    /// List orders passing `filter`.
    ///
    /// The status is sent to the backend; the date range is applied to the
    /// returned orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn filter_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>, ApiError> {
        let orders = self.list_orders(filter.status).await?;
        let total = orders.len();
        let kept: Vec<Order> = orders
            .into_iter()
            .filter(|order| filter.matches(order))
            .collect();
        debug!(total, kept = kept.len(), "Filtered orders");
        Ok(kept)
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, ApiError> {
        self.get(&format!("/orders/{id}")).await
    }

    /// Get an order by its human-facing order number.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_order_by_number(&self, number: &str) -> Result<Order, ApiError> {
        let number = number.trim();
        if number.is_empty() {
            return Err(ValidationError::Required { field: "orderNumber" }.into());
        }
        self.get(&format!("/orders/number/{}", urlencoding::encode(number)))
            .await
    }

    /// Move an order to `status`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for `OrderStatus::Unknown`, or any
    /// request error.
    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        if status == OrderStatus::Unknown {
            return Err(ValidationError::Invalid {
                field: "status",
                message: "unknown order status".to_string(),
            }
            .into());
        }
        self.put(&format!("/orders/{id}/status"), &OrderStatusUpdate { status })
            .await
    }

    /// Fetch the order a scanned QR payload refers to.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the payload holds no reference, or
    /// any request error.
    #[instrument(skip(self))]
    pub async fn lookup_order(&self, payload: &str) -> Result<Order, ApiError> {
        match parse_order_code(payload)? {
            OrderReference::Id(id) => self.get_order(id).await,
            OrderReference::Number(number) => self.get_order_by_number(&number).await,
        }
    }
}
