//! Cart operations on behalf of a customer.

use serde::de::IgnoredAny;
use storedash_core::{Cart, CartItemId, CartItemRequest, ProductId, UserId};
use tracing::instrument;

use super::client::ApiClient;
use crate::error::{ApiError, ValidationError};

fn check_quantity(quantity: u32) -> Result<(), ValidationError> {
    if quantity == 0 {
        Err(ValidationError::Invalid {
            field: "quantity",
            message: "must be at least 1".to_string(),
        })
    } else {
        Ok(())
    }
}

impl ApiClient {
    /// Get a user's cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_cart(&self, user_id: UserId) -> Result<Cart, ApiError> {
        self.get(&format!("/carts/{user_id}")).await
    }

    /// Add `quantity` of a product to a user's cart.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for a zero quantity, or any request
    /// error.
    #[instrument(skip(self))]
    pub async fn add_cart_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart, ApiError> {
        check_quantity(quantity)?;
        let body = CartItemRequest {
            product_id,
            quantity,
        };
        self.post(&format!("/carts/{user_id}/items"), &body).await
    }

    /// Change the quantity of a cart line.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for a zero quantity (use
    /// [`ApiClient::remove_cart_item`]), or any request error.
    #[instrument(skip(self))]
    pub async fn update_cart_item(
        &self,
        user_id: UserId,
        item_id: CartItemId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart, ApiError> {
        check_quantity(quantity)?;
        let body = CartItemRequest {
            product_id,
            quantity,
        };
        self.put(&format!("/carts/{user_id}/items/{item_id}"), &body)
            .await
    }

    /// Remove a line from a user's cart. Returns the updated cart when the
    /// backend sends one.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn remove_cart_item(
        &self,
        user_id: UserId,
        item_id: CartItemId,
    ) -> Result<Option<Cart>, ApiError> {
        self.delete(&format!("/carts/{user_id}/items/{item_id}"))
            .await
    }

    /// Empty a user's cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self, user_id: UserId) -> Result<(), ApiError> {
        self.delete::<IgnoredAny>(&format!("/carts/{user_id}"))
            .await
            .map(|_| ())
    }
}
