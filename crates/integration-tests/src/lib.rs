//! Integration test harness for Storedash.
//!
//! Starts an in-process mock of the marketplace backend on `127.0.0.1:0`,
//! records every request it receives and answers from a fixed route table.
//! Tests drive the real [`ApiClient`] against it.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storedash-integration-tests
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn example() {
//! use reqwest::Method;
//! use serde_json::json;
//! use storedash_integration_tests::{MockBackend, MockResponse};
//!
//! let backend = MockBackend::builder()
//!     .route(Method::GET, "/orders", MockResponse::json(200, json!([])))
//!     .start()
//!     .await;
//! let client = backend.client();
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use storedash_admin::storage::{MemoryStorage, SessionStorage};
use storedash_admin::{ApiClient, SessionListener};
use url::Url;

/// Path prefix the mock backend is mounted under.
pub const API_PREFIX: &str = "/api";

/// A canned response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: String,
}

impl MockResponse {
    /// A JSON response.
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            content_type: Some("application/json"),
            body: body.to_string(),
        }
    }

    /// A response with no body.
    #[must_use]
    pub const fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: String::new(),
        }
    }

    /// A response with an arbitrary content type.
    #[must_use]
    pub fn text(status: u16, content_type: &'static str, body: &str) -> Self {
        Self {
            status,
            content_type: Some(content_type),
            body: body.to_string(),
        }
    }
}

/// A request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path below [`API_PREFIX`].
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

type Routes = HashMap<(Method, String), MockResponse>;

struct Shared {
    routes: Routes,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Builder for [`MockBackend`].
#[derive(Default)]
pub struct MockBackendBuilder {
    routes: Routes,
}

impl MockBackendBuilder {
    /// Answer `method path` with `response`. `path` is relative to the API
    /// prefix and excludes the query string.
    #[must_use]
    pub fn route(mut self, method: Method, path: &str, response: MockResponse) -> Self {
        self.routes.insert((method, path.to_string()), response);
        self
    }

    /// Bind to an ephemeral port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start(self) -> MockBackend {
        let shared = Arc::new(Shared {
            routes: self.routes,
            requests: Mutex::new(Vec::new()),
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Mock backend has no address");

        let app = Router::new().fallback(handle).with_state(shared.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        MockBackend { addr, shared }
    }
}

/// A running mock backend. Stops when the test runtime shuts down.
pub struct MockBackend {
    addr: SocketAddr,
    shared: Arc<Shared>,
}

impl MockBackend {
    /// Start describing a backend.
    #[must_use]
    pub fn builder() -> MockBackendBuilder {
        MockBackendBuilder::default()
    }

    /// Base URL the client should be configured with.
    ///
    /// # Panics
    ///
    /// Never in practice; the address always forms a valid URL.
    #[must_use]
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}{API_PREFIX}", self.addr)).expect("valid mock URL")
    }

    /// A client with in-memory storage and no listener.
    #[must_use]
    pub fn client(&self) -> ApiClient {
        self.client_with(Arc::new(MemoryStorage::new()), None)
    }

    /// A client with the given storage and optional listener.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn client_with(
        &self,
        storage: Arc<dyn SessionStorage>,
        listener: Option<Arc<dyn SessionListener>>,
    ) -> ApiClient {
        let mut builder = ApiClient::builder(self.base_url()).storage(storage);
        if let Some(listener) = listener {
            builder = builder.listener(listener);
        }
        builder.build().expect("Failed to build client")
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent request.
    #[must_use]
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests().pop()
    }
}

async fn handle(
    State(shared): State<Arc<Shared>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path()
        .strip_prefix(API_PREFIX)
        .unwrap_or_else(|| uri.path())
        .to_string();
    let header = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    shared
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            query: uri.query().map(str::to_string),
            authorization: header(AUTHORIZATION),
            content_type: header(CONTENT_TYPE),
            body: serde_json::from_slice(&body).ok(),
        });

    let Some(mock) = shared.routes.get(&(method, path)) else {
        return (
            StatusCode::NOT_FOUND,
            [(CONTENT_TYPE, "application/json")],
            r#"{"message":"No such route"}"#,
        )
            .into_response();
    };

    let status = StatusCode::from_u16(mock.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match mock.content_type {
        Some(content_type) => {
            (status, [(CONTENT_TYPE, content_type)], mock.body.clone()).into_response()
        }
        None => (status, mock.body.clone()).into_response(),
    }
}

/// A base URL where nothing is listening.
///
/// # Panics
///
/// Panics if no port can be reserved.
pub async fn unreachable_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to reserve a port");
    let addr = listener.local_addr().expect("Listener has no address");
    drop(listener);
    Url::parse(&format!("http://{addr}{API_PREFIX}")).expect("valid URL")
}

/// Listener that counts how often the session expired.
#[derive(Debug, Default)]
pub struct CountingListener {
    fired: AtomicUsize,
}

impl CountingListener {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of times the hook fired.
    #[must_use]
    pub fn count(&self) -> usize {
        self.fired.load(Ordering::SeqCst)
    }
}

impl SessionListener for CountingListener {
    fn on_session_expired(&self) {
        self.fired.fetch_add(1, Ordering::SeqCst);
    }
}
