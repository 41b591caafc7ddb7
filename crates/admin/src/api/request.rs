//! Request descriptors and endpoint rules.

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// Endpoints that never receive the bearer credential.
pub const PUBLIC_ENDPOINTS: &[&str] = &["/auth/login", "/auth/register", "/api-docs"];

/// Method, body, headers and query of one call.
///
/// Defaults to a bodiless `GET`.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// HTTP method.
    pub method: Method,
    /// JSON body.
    pub body: Option<Value>,
    /// Headers merged over the client defaults.
    pub headers: HeaderMap,
    /// Query string pairs, appended in order.
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    /// A `GET` with no body.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `method` instead of `GET`.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Attach an already-built JSON body.
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `body` as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidRequest` if `body` cannot be represented as JSON.
    pub fn json<B: Serialize + ?Sized>(self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidRequest(format!("unserializable body: {e}")))?;
        Ok(self.body(value))
    }

    /// Set a header, replacing a client default of the same name.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Append a query pair.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append a query pair when `value` is set.
    #[must_use]
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }
}

/// Check an endpoint path and give it a leading slash.
pub(crate) fn normalize_endpoint(endpoint: &str) -> Result<String, ApiError> {
    let trimmed = endpoint.trim();
    if trimmed.is_empty() || trimmed == "/" {
        return Err(ApiError::InvalidRequest("endpoint cannot be empty".to_string()));
    }
    if trimmed.contains("://") {
        return Err(ApiError::InvalidRequest(format!(
            "endpoint must be a path, got '{trimmed}'"
        )));
    }
    if trimmed.starts_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("/{trimmed}"))
    }
}

/// Whether `endpoint` (a normalized path) is in the public allow-list.
///
/// Matches whole path segments: `/auth/login` and `/auth/login?next=x` are
/// public, `/auth/loginx` is not.
#[must_use]
pub fn is_public_endpoint(endpoint: &str) -> bool {
    let path = endpoint.split(['?', '#']).next().unwrap_or(endpoint);
    PUBLIC_ENDPOINTS.iter().any(|public| {
        path.strip_prefix(public)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}
