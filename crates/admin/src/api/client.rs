//! Authenticated REST client for the marketplace backend.
//!
//! Every call goes through [`ApiClient::request`], which injects the bearer
//! token, maps failures onto [`ApiError`] and ends the session on a 401.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use storedash_core::{Collection, PageResult, User};
use tokio::sync::RwLock;
use tracing::{debug, error, instrument, warn};
use url::Url;

use super::request::{RequestOptions, is_public_endpoint, normalize_endpoint};
use crate::config::DashboardConfig;
use crate::error::ApiError;
use crate::storage::{
    self, MemoryStorage, REFRESH_TOKEN_KEY, SESSION_KEYS, SessionStorage, TOKEN_KEY, USER_KEY,
};

/// Receives the "session expired, go to login" signal.
///
/// Fired once per 401 response from a protected endpoint, after the session
/// has been cleared and before the error reaches the caller.
pub trait SessionListener: Send + Sync {
    /// The backend rejected the session.
    fn on_session_expired(&self);
}

impl<F> SessionListener for F
where
    F: Fn() + Send + Sync,
{
    fn on_session_expired(&self) {
        self();
    }
}

/// REST client for the marketplace backend.
///
/// Construct once at start-up and clone it into every caller; clones share
/// the session.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
    storage: Arc<dyn SessionStorage>,
    /// In-memory copy of the token slot
    token: RwLock<Option<SecretString>>,
    listener: Option<Arc<dyn SessionListener>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("token", &"[REDACTED]")
            .field("has_listener", &self.inner.listener.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder {
    base_url: Url,
    storage: Arc<dyn SessionStorage>,
    listener: Option<Arc<dyn SessionListener>>,
    timeout: Option<Duration>,
}

impl ApiClientBuilder {
    /// Persist the session in `storage` (default: in-memory).
    #[must_use]
    pub fn storage(mut self, storage: Arc<dyn SessionStorage>) -> Self {
        self.storage = storage;
        self
    }

    /// Notify `listener` when the backend ends the session.
    #[must_use]
    pub fn listener(mut self, listener: Arc<dyn SessionListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Abort calls that take longer than `timeout`.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client, restoring a token persisted by a previous run.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` if the HTTP client cannot be created.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut http = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        let http = http
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        let token = self
            .storage
            .get(TOKEN_KEY)
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .map(SecretString::from);
        if token.is_some() {
            debug!("Restored session token from storage");
        }

        Ok(ApiClient {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: self.base_url,
                storage: self.storage,
                token: RwLock::new(token),
                listener: self.listener,
            }),
        })
    }
}

impl ApiClient {
    /// Start building a client for the API rooted at `base_url`.
    #[must_use]
    pub fn builder(base_url: Url) -> ApiClientBuilder {
        ApiClientBuilder {
            base_url,
            storage: Arc::new(MemoryStorage::new()),
            listener: None,
            timeout: None,
        }
    }

    /// Build a client from configuration, persisting the session in the
    /// configured storage directory.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` if the HTTP client cannot be created.
    pub fn from_config(
        config: &DashboardConfig,
        listener: Option<Arc<dyn SessionListener>>,
    ) -> Result<Self, ApiError> {
        let mut builder =
            Self::builder(config.api_url.clone()).storage(storage::open(config.storage_dir.as_deref()));
        if let Some(listener) = listener {
            builder = builder.listener(listener);
        }
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    /// Base URL endpoints are appended to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Store the bearer token in memory and in durable storage.
    pub async fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        let mut slot = self.inner.token.write().await;
        self.inner.storage.set(TOKEN_KEY, &token);
        *slot = Some(SecretString::from(token));
        debug!("Session token set");
    }

    /// Remove the session from memory and durable storage.
    ///
    /// Clears the token, refresh token and cached profile. Idempotent.
    pub async fn clear_token(&self) {
        let mut token = self.inner.token.write().await;
        *token = None;
        for key in SESSION_KEYS {
            self.inner.storage.remove(key);
        }
        debug!("Session cleared");
    }

    /// Current bearer token.
    pub async fn token(&self) -> Option<SecretString> {
        self.inner.token.read().await.clone()
    }

    /// Whether a bearer token is set.
    pub async fn has_token(&self) -> bool {
        self.inner.token.read().await.is_some()
    }

    /// Persist the refresh token returned by login.
    pub fn set_refresh_token(&self, refresh_token: &str) {
        self.inner.storage.set(REFRESH_TOKEN_KEY, refresh_token);
    }

    /// Refresh token persisted by the last login.
    #[must_use]
    pub fn refresh_token(&self) -> Option<SecretString> {
        self.inner
            .storage
            .get(REFRESH_TOKEN_KEY)
            .filter(|token| !token.trim().is_empty())
            .map(SecretString::from)
    }

    /// Cache the signed-in user's profile.
    pub fn cache_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(json) => self.inner.storage.set(USER_KEY, &json),
            Err(e) => warn!(error = %e, "Failed to serialize user profile"),
        }
    }

    /// Profile cached by the last login, if readable.
    #[must_use]
    pub fn cached_user(&self) -> Option<User> {
        let raw = self.inner.storage.get(USER_KEY)?;
        serde_json::from_str(&raw)
            .map_err(|e| warn!(error = %e, "Ignoring unreadable cached user profile"))
            .ok()
    }

    // =========================================================================
    // Requests
    // =========================================================================

    /// Issue a call and decode the JSON response body as `T`.
    ///
    /// A 2xx response with an empty body decodes `T` from `null`, so `()` and
    /// `Option<_>` succeed on 204.
    ///
    /// # Errors
    ///
    /// - `ApiError::InvalidRequest` if the endpoint is empty or not a path
    /// - `ApiError::Network` if no response was received
    /// - `ApiError::Unauthorized` on 401 (the session is cleared first)
    /// - `ApiError::Forbidden` on 403
    /// - `ApiError::Server` on 5xx
    /// - `ApiError::Api` on any other non-2xx status
    /// - `ApiError::Decode` if a 2xx body is not JSON or does not match `T`
    #[instrument(skip(self, options), fields(method = %options.method))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let endpoint = normalize_endpoint(endpoint)?;
        let public = is_public_endpoint(&endpoint);
        let url = self.endpoint_url(&endpoint, &options.query)?;

        let mut headers = options.headers;
        if !public && let Some(token) = self.inner.token.read().await.as_ref() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|_| {
                    ApiError::InvalidRequest("session token is not a valid header value".to_string())
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = self
            .inner
            .http
            .request(options.method, url)
            .headers(headers);
        if let Some(body) = options.body {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await.map_err(|e| {
            let err = ApiError::from(e);
            warn!(error = %err, "Request failed without a response");
            err
        })?;

        self.handle_response(public, response).await
    }

    /// `GET` an endpoint.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(endpoint, RequestOptions::new()).await
    }

    /// `GET` an endpoint with query pairs.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let options = query
            .iter()
            .fold(RequestOptions::new(), |options, (key, value)| {
                options.query(*key, value)
            });
        self.request(endpoint, options).await
    }

    /// `POST` a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(endpoint, RequestOptions::new().method(Method::POST).json(body)?)
            .await
    }

    /// `PUT` a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(endpoint, RequestOptions::new().method(Method::PUT).json(body)?)
            .await
    }

    /// `PATCH` a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(endpoint, RequestOptions::new().method(Method::PATCH).json(body)?)
            .await
    }

    /// `DELETE` an endpoint.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(endpoint, RequestOptions::new().method(Method::DELETE))
            .await
    }

    /// Fetch a collection and return its items, paged or not.
    ///
    /// A payload that is neither an array nor a pagination envelope yields an
    /// empty list.
    ///
    /// # Errors
    ///
    /// Transport and status errors as for [`ApiClient::request`], and
    /// `ApiError::Decode` if any item does not decode as `T`.
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Vec<T>, ApiError> {
        Ok(self.get_collection(endpoint, options).await?.into_vec())
    }

    /// Fetch a collection and report the paging totals alongside the items.
    ///
    /// # Errors
    ///
    /// As for [`ApiClient::get_list`].
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<PageResult<T>, ApiError> {
        Ok(self.get_collection(endpoint, options).await?.into())
    }

    async fn get_collection<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Collection<T>, ApiError> {
        let value: Value = self.request(endpoint, options).await?;
        decode_collection(endpoint, value)
    }

    fn endpoint_url(&self, endpoint: &str, query: &[(String, String)]) -> Result<Url, ApiError> {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}{endpoint}"))
            .map_err(|e| ApiError::InvalidRequest(format!("invalid endpoint '{endpoint}': {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        public: bool,
        response: Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status.is_success() {
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_ascii_lowercase();
            let bytes = response.bytes().await?;

            if bytes.iter().all(u8::is_ascii_whitespace) {
                debug!(status = %status, "Empty response body");
                return serde_json::from_value(Value::Null)
                    .map_err(|e| ApiError::Decode(format!("empty response body: {e}")));
            }
            if !is_json_content_type(&content_type) {
                return Err(ApiError::Decode(format!(
                    "expected a JSON response, got '{content_type}'"
                )));
            }

            debug!(status = %status, bytes = bytes.len(), "Request succeeded");
            return serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status, &body);

        match &err {
            ApiError::Unauthorized(_) if !public => {
                warn!("Session rejected by the backend, signing out");
                self.expire_session().await;
            }
            ApiError::Server { .. } => {
                let event_id = sentry::capture_error(&err);
                error!(
                    error = %err,
                    sentry_event_id = %event_id,
                    "Backend server error"
                );
            }
            _ => debug!(error = %err, "Request rejected"),
        }

        Err(err)
    }

    async fn expire_session(&self) {
        self.clear_token().await;
        if let Some(listener) = &self.inner.listener {
            listener.on_session_expired();
        }
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    essence == "application/json" || essence.ends_with("+json")
}

/// Classify a collection payload and decode its items.
///
/// Only the envelope shape is tolerated: a payload that is not a collection
/// is an empty list, but an item that does not match `T` fails the call.
fn decode_collection<T: DeserializeOwned>(
    endpoint: &str,
    value: Value,
) -> Result<Collection<T>, ApiError> {
    let Some(collection) = Collection::detect(value) else {
        warn!(endpoint = %endpoint, "Response is not a collection, treating as empty");
        return Ok(Collection::default());
    };

    collection.try_map(|item| {
        serde_json::from_value(item).map_err(|e| {
            warn!(endpoint = %endpoint, error = %e, "Undecodable collection item");
            ApiError::Decode(format!("collection item from '{endpoint}': {e}"))
        })
    })
}
