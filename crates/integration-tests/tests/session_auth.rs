//! Bearer credential injection and session expiry.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use reqwest::Method;
use secrecy::ExposeSecret;
use serde_json::json;
use storedash_admin::storage::{MemoryStorage, SessionStorage, TOKEN_KEY};
use storedash_admin::{ApiError, SessionListener};
use storedash_integration_tests::{CountingListener, MockBackend, MockResponse};

fn unauthorized() -> MockResponse {
    MockResponse::json(401, json!({"message": "Token expired"}))
}

#[tokio::test]
async fn test_token_is_sent_as_bearer_credential() {
    let backend = MockBackend::builder()
        .route(Method::GET, "/orders", MockResponse::json(200, json!([])))
        .start()
        .await;
    let client = backend.client();

    client.set_token("abc123").await;
    let orders = client.list_orders(None).await.unwrap();
    assert!(orders.is_empty());

    let request = backend.last_request().unwrap();
    assert_eq!(request.path, "/orders");
    assert_eq!(request.authorization.as_deref(), Some("Bearer abc123"));
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_public_endpoints_never_get_the_token() {
    let backend = MockBackend::builder()
        .route(
            Method::POST,
            "/auth/login",
            MockResponse::json(200, json!({"accessToken": "fresh"})),
        )
        .route(
            Method::POST,
            "/auth/register",
            MockResponse::json(201, json!({"id": 9, "email": "new@shop.example"})),
        )
        .route(Method::GET, "/api-docs", MockResponse::json(200, json!({})))
        .start()
        .await;
    let client = backend.client();
    client.set_token("stale").await;

    client.get::<serde_json::Value>("/api-docs").await.unwrap();
    client
        .register(storedash_admin::forms::RegisterForm {
            email: "new@shop.example".to_string(),
            password: "long-enough".to_string(),
            first_name: "New".to_string(),
            last_name: "User".to_string(),
        })
        .await
        .unwrap();
    client.login("ops@shop.example", "secret").await.unwrap();

    let requests = backend.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|r| r.authorization.is_none()));
}

#[tokio::test]
async fn test_cleared_token_is_not_sent() {
    let backend = MockBackend::builder()
        .route(Method::GET, "/stores", MockResponse::json(200, json!([])))
        .start()
        .await;
    let client = backend.client();

    client.set_token("abc123").await;
    client.clear_token().await;
    client.list_stores().await.unwrap();

    assert_eq!(backend.last_request().unwrap().authorization, None);
}

#[tokio::test]
async fn test_401_clears_session_and_fires_listener_once() {
    let backend = MockBackend::builder()
        .route(Method::GET, "/orders", unauthorized())
        .route(Method::GET, "/stores", MockResponse::json(200, json!([])))
        .start()
        .await;
    let storage = Arc::new(MemoryStorage::new());
    let listener = CountingListener::new();
    let client = backend.client_with(storage.clone(), Some(listener.clone()));

    client.set_token("abc123").await;
    let err = client.list_orders(None).await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized(ref message) if message == "Token expired"));
    assert_eq!(listener.count(), 1);
    assert!(!client.has_token().await);
    assert_eq!(storage.get(TOKEN_KEY), None);

    client.list_stores().await.unwrap();
    assert_eq!(backend.last_request().unwrap().authorization, None);
    assert_eq!(listener.count(), 1);
}

#[tokio::test]
async fn test_401_without_token_still_redirects_once() {
    let backend = MockBackend::builder()
        .route(Method::GET, "/analytics/dashboard", unauthorized())
        .start()
        .await;
    let listener = CountingListener::new();
    let client = backend.client_with(Arc::new(MemoryStorage::new()), Some(listener.clone()));

    let err = client.analytics_dashboard().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(backend.last_request().unwrap().authorization, None);
    assert!(client.token().await.is_none());
    assert_eq!(listener.count(), 1);
}

#[tokio::test]
async fn test_bad_login_keeps_session() {
    let backend = MockBackend::builder()
        .route(
            Method::POST,
            "/auth/login",
            MockResponse::json(401, json!({"error": "Bad credentials"})),
        )
        .start()
        .await;
    let listener = CountingListener::new();
    let client = backend.client_with(Arc::new(MemoryStorage::new()), Some(listener.clone()));
    client.set_token("still-valid").await;

    let err = client.login("ops@shop.example", "wrong").await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized(ref message) if message == "Bad credentials"));
    assert_eq!(listener.count(), 0);
    assert_eq!(
        client.token().await.map(|t| t.expose_secret().to_string()),
        Some("still-valid".to_string())
    );
}

#[tokio::test]
async fn test_concurrent_401s_all_report_unauthorized() {
    let backend = MockBackend::builder()
        .route(Method::GET, "/orders", unauthorized())
        .route(Method::GET, "/products", unauthorized())
        .route(Method::GET, "/reviews", unauthorized())
        .start()
        .await;
    let listener = CountingListener::new();
    let client = backend.client_with(Arc::new(MemoryStorage::new()), Some(listener.clone()));
    client.set_token("abc123").await;

    let product_query = storedash_admin::api::ProductQuery::default();
    let (orders, products, reviews) = tokio::join!(
        client.list_orders(None),
        client.list_products(&product_query),
        client.list_reviews(),
    );

    assert!(orders.unwrap_err().is_unauthorized());
    assert!(products.unwrap_err().is_unauthorized());
    assert!(reviews.unwrap_err().is_unauthorized());
    assert_eq!(listener.count(), 3);
    assert!(!client.has_token().await);
}

#[tokio::test]
async fn test_closure_listener() {
    let backend = MockBackend::builder()
        .route(Method::GET, "/users", unauthorized())
        .start()
        .await;
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let listener: Arc<dyn SessionListener> = Arc::new(move || {
        let _ = tx.send(());
    });
    let client = backend.client_with(Arc::new(MemoryStorage::new()), Some(listener));

    client.list_users(None).await.unwrap_err();

    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_err());
}
