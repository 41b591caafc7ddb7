//! List endpoints accept bare arrays, pagination envelopes and junk.

#![allow(clippy::unwrap_used)]

use reqwest::Method;
use serde_json::{Value, json};
use storedash_admin::ApiError;
use storedash_admin::api::ProductQuery;
use storedash_integration_tests::{MockBackend, MockResponse};

fn product(id: i64) -> Value {
    json!({"id": id, "name": format!("Product {id}"), "price": 9.5, "stock": 3})
}

async fn list_store_names(body: Value) -> Vec<String> {
    let backend = MockBackend::builder()
        .route(Method::GET, "/stores", MockResponse::json(200, body))
        .start()
        .await;
    backend
        .client()
        .list_stores()
        .await
        .unwrap()
        .into_iter()
        .map(|store| store.name)
        .collect()
}

#[tokio::test]
async fn test_bare_array() {
    let names = list_store_names(json!([
        {"id": 1, "name": "Tea House"},
        {"id": 2, "name": "Coffee Corner"}
    ]))
    .await;
    assert_eq!(names, vec!["Tea House", "Coffee Corner"]);
}

#[tokio::test]
async fn test_pagination_envelope() {
    let names = list_store_names(json!({
        "content": [{"id": 1, "name": "Tea House"}],
        "totalPages": 1,
        "totalElements": 1
    }))
    .await;
    assert_eq!(names, vec!["Tea House"]);
}

#[tokio::test]
async fn test_unexpected_shapes_are_empty() {
    for body in [
        json!(null),
        json!(42),
        json!("stores"),
        json!({"id": 1, "name": "Tea House"}),
        json!({"content": "not a list"}),
    ] {
        assert!(list_store_names(body.clone()).await.is_empty(), "{body}");
    }
}

#[tokio::test]
async fn test_undecodable_items_fail_the_call() {
    let backend = MockBackend::builder()
        .route(
            Method::GET,
            "/orders",
            MockResponse::json(
                200,
                json!({
                    "content": [
                        {"id": "a1b2", "status": "PENDING"},
                        {"id": "c3d4", "status": "SHIPPED"}
                    ],
                    "totalPages": 1
                }),
            ),
        )
        .route(
            Method::GET,
            "/stores",
            MockResponse::json(
                200,
                json!([
                    {"id": 1, "name": "Tea House"},
                    {"name": "No id"},
                    {"id": 3, "name": "Bakery"}
                ]),
            ),
        )
        .start()
        .await;
    let client = backend.client();
    client.set_token("abc123").await;

    let err = client.list_orders(None).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "{err:?}");

    let err = client.list_stores().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "{err:?}");

    assert!(client.has_token().await);
}

#[tokio::test]
async fn test_paged_products_keep_totals_separate() {
    let backend = MockBackend::builder()
        .route(
            Method::GET,
            "/products",
            MockResponse::json(
                200,
                json!({
                    "content": [product(1), product(2)],
                    "totalPages": 3,
                    "totalElements": 6,
                    "number": 0,
                    "size": 2
                }),
            ),
        )
        .start()
        .await;
    let client = backend.client();

    let page = client
        .list_products_paged(&ProductQuery::page(0, 2))
        .await
        .unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items.first().unwrap().id.as_i64(), 1);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.total_elements, 6);
    assert_eq!(
        backend.last_request().unwrap().query.as_deref(),
        Some("page=0&size=2")
    );

    let items = client
        .list_products(&ProductQuery::page(0, 2))
        .await
        .unwrap();
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn test_unpaged_products_report_one_page() {
    let backend = MockBackend::builder()
        .route(
            Method::GET,
            "/products",
            MockResponse::json(200, json!([product(1), product(2), product(3)])),
        )
        .start()
        .await;

    let page = backend
        .client()
        .list_products_paged(&ProductQuery::default())
        .await
        .unwrap();

    assert_eq!(page.items.len(), 3);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.total_elements, 3);
    assert_eq!(backend.last_request().unwrap().query, None);
}
