//! Error taxonomy for the dashboard client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by [`crate::api::ApiClient`] and the resource calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend rejected the credentials (HTTP 401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The signed-in user may not perform this call (HTTP 403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The backend failed (HTTP 5xx). Safe to retry later.
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Server-supplied message or status text.
        message: String,
    },

    /// No response was received.
    #[error("network error: {0}")]
    Network(String),

    /// Any other non-2xx response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-supplied message or status text.
        message: String,
    },

    /// A 2xx response whose body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The call could not be built (empty endpoint, bad header value, ...).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The HTTP client could not be configured.
    #[error("client configuration error: {0}")]
    Configuration(String),

    /// A form failed client-side validation; nothing was sent.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl ApiError {
    /// Map a non-success HTTP status and its body to an error.
    ///
    /// The message is the body's `message` (or `error`) field when the body
    /// is a JSON object carrying one, else the status text.
    #[must_use]
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = server_message(body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });

        match status.as_u16() {
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            code @ 500..=599 => Self::Server {
                status: code,
                message,
            },
            code => Self::Api {
                status: code,
                message,
            },
        }
    }

    /// HTTP status of the response that produced this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::Server { status, .. } | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether repeating the same call later may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Server { .. } | Self::Network(_))
    }

    /// Whether the session ended because of this error.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_builder() {
            Self::InvalidRequest(err.to_string())
        } else {
            Self::Network(describe_transport_error(&err))
        }
    }
}

/// Render a transport error with its source chain ("connection refused" is
/// usually only in the innermost source).
fn describe_transport_error(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(String::from)
}

/// Client-side form validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("{field} is required")]
    Required {
        /// Form field name.
        field: &'static str,
    },

    /// A numeric field is below zero.
    #[error("{field} cannot be negative")]
    Negative {
        /// Form field name.
        field: &'static str,
    },

    /// A numeric field is outside its allowed range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        /// Form field name.
        field: &'static str,
        /// Inclusive lower bound.
        min: String,
        /// Inclusive upper bound.
        max: String,
    },

    /// A field has an invalid value.
    #[error("{field}: {message}")]
    Invalid {
        /// Form field name.
        field: &'static str,
        /// What is wrong with the value.
        message: String,
    },
}
