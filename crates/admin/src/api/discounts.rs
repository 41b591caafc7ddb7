//! Discount code management.

use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::IgnoredAny;
use storedash_core::{Discount, DiscountId, DiscountQuote};
use tracing::instrument;

use super::client::ApiClient;
use super::request::RequestOptions;
use crate::error::{ApiError, ValidationError};
use crate::forms::{DiscountForm, Validate};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplyDiscount<'a> {
    code: &'a str,
    order_amount: Decimal,
}

fn check_code(code: &str) -> Result<&str, ValidationError> {
    let code = code.trim();
    if code.is_empty() {
        Err(ValidationError::Required { field: "code" })
    } else {
        Ok(code)
    }
}

impl ApiClient {
    /// List all discount codes.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_discounts(&self) -> Result<Vec<Discount>, ApiError> {
        self.get_list("/discounts", RequestOptions::new()).await
    }

    /// Create a discount code.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the form is invalid, or any request
    /// error.
    #[instrument(skip(self, form), fields(code = %form.code))]
    pub async fn create_discount(&self, form: &DiscountForm) -> Result<Discount, ApiError> {
        form.validate()?;
        self.post("/discounts", form).await
    }

    /// Replace a discount's fields.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the form is invalid, or any request
    /// error.
    #[instrument(skip(self, form))]
    pub async fn update_discount(
        &self,
        id: DiscountId,
        form: &DiscountForm,
    ) -> Result<Discount, ApiError> {
        form.validate()?;
        self.put(&format!("/discounts/{id}"), form).await
    }

    /// Delete a discount code.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn delete_discount(&self, id: DiscountId) -> Result<(), ApiError> {
        self.delete::<IgnoredAny>(&format!("/discounts/{id}"))
            .await
            .map(|_| ())
    }

    /// Price an order amount with a discount code.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for a blank code or negative amount, or
    /// any request error.
    #[instrument(skip(self))]
    pub async fn apply_discount(
        &self,
        code: &str,
        order_amount: Decimal,
    ) -> Result<DiscountQuote, ApiError> {
        let code = check_code(code)?;
        if order_amount.is_sign_negative() && !order_amount.is_zero() {
            return Err(ValidationError::Negative {
                field: "orderAmount",
            }
            .into());
        }
        self.post("/discounts/apply", &ApplyDiscount { code, order_amount })
            .await
    }

    /// Check whether a discount code is currently usable.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for a blank code, or any request error.
    #[instrument(skip(self))]
    pub async fn validate_discount(&self, code: &str) -> Result<DiscountQuote, ApiError> {
        let code = check_code(code)?;
        self.request(
            "/discounts/validate",
            RequestOptions::new().query("code", code),
        )
        .await
    }
}
