//! Listing commands for the catalog and its people.

use storedash_admin::ApiClient;
use storedash_admin::api::ProductQuery;

use super::{CommandError, print_json};

/// One page of products with the paging totals.
pub async fn products(client: &ApiClient, page: u32, size: u32) -> Result<(), CommandError> {
    let result = client
        .list_products_paged(&ProductQuery::page(page, size))
        .await?;
    print_json(&result)
}

pub async fn stores(client: &ApiClient) -> Result<(), CommandError> {
    print_json(&client.list_stores().await?)
}

pub async fn categories(client: &ApiClient) -> Result<(), CommandError> {
    print_json(&client.list_categories().await?)
}

pub async fn users(client: &ApiClient) -> Result<(), CommandError> {
    print_json(&client.list_users(None).await?)
}

pub async fn reviews(client: &ApiClient) -> Result<(), CommandError> {
    print_json(&client.list_reviews().await?)
}

pub async fn discounts(client: &ApiClient) -> Result<(), CommandError> {
    print_json(&client.list_discounts().await?)
}

/// Check whether a discount code is usable.
pub async fn validate_discount(client: &ApiClient, code: &str) -> Result<(), CommandError> {
    print_json(&client.validate_discount(code).await?)
}
