//! Product catalog operations.

use serde::de::IgnoredAny;
use storedash_core::{CategoryId, PageResult, Product, ProductId, StoreId};
use tracing::instrument;

use super::client::ApiClient;
use super::request::RequestOptions;
use crate::error::ApiError;
use crate::forms::{ProductForm, Validate};

/// Filters and paging for product listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Zero-based page index
    pub page: Option<u32>,
    /// Page size
    pub size: Option<u32>,
    /// Only products in this category
    pub category: Option<CategoryId>,
    /// Only products sold by this store
    pub store: Option<StoreId>,
    /// Free-text match on name and description
    pub search: Option<String>,
}

impl ProductQuery {
    /// Request page `page` of `size` items.
    #[must_use]
    pub const fn page(page: u32, size: u32) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
            category: None,
            store: None,
            search: None,
        }
    }

    fn to_options(&self) -> RequestOptions {
        RequestOptions::new()
            .query_opt("page", self.page)
            .query_opt("size", self.size)
            .query_opt("categoryId", self.category)
            .query_opt("storeId", self.store)
            .query_opt(
                "search",
                self.search
                    .as_deref()
                    .map(str::trim)
                    .filter(|search| !search.is_empty()),
            )
    }
}

impl ApiClient {
    /// List products matching `query`, across however the backend pages them.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        self.get_list("/products", query.to_options()).await
    }

    /// List one page of products with the backend's paging totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_products_paged(
        &self,
        query: &ProductQuery,
    ) -> Result<PageResult<Product>, ApiError> {
        self.get_page("/products", query.to_options()).await
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.get(&format!("/products/{id}")).await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the form is invalid, or any request
    /// error.
    #[instrument(skip(self, form), fields(name = %form.name))]
    pub async fn create_product(&self, form: &ProductForm) -> Result<Product, ApiError> {
        form.validate()?;
        self.post("/products", form).await
    }

    /// Replace a product's editable fields.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the form is invalid, or any request
    /// error.
    #[instrument(skip(self, form))]
    pub async fn update_product(
        &self,
        id: ProductId,
        form: &ProductForm,
    ) -> Result<Product, ApiError> {
        form.validate()?;
        self.put(&format!("/products/{id}"), form).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        self.delete::<IgnoredAny>(&format!("/products/{id}"))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_options() {
        let query = ProductQuery {
            category: Some(CategoryId::new(4)),
            store: Some(StoreId::new(9)),
            search: Some("  tea ".to_string()),
            ..ProductQuery::page(1, 20)
        };
        let options = query.to_options();
        assert_eq!(
            options.query,
            vec![
                ("page".to_string(), "1".to_string()),
                ("size".to_string(), "20".to_string()),
                ("categoryId".to_string(), "4".to_string()),
                ("storeId".to_string(), "9".to_string()),
                ("search".to_string(), "tea".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_search_is_omitted() {
        let query = ProductQuery {
            search: Some("   ".to_string()),
            ..ProductQuery::default()
        };
        assert!(query.to_options().query.is_empty());
    }
}
