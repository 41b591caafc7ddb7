//! Storedash Admin library.
//!
//! Client side of the marketplace admin dashboard:
//! - [`api::ApiClient`] - authenticated REST client with session lifecycle
//! - [`storage`] - durable key-value slots for the session token and profile
//! - [`dashboard`] - order filtering, QR lookup and amount formatting
//! - [`forms`] - client-side validation of create/update payloads
//! - [`config`] - environment configuration
//!
//! # Session handling
//!
//! The client is constructed once at start-up and cloned into every caller.
//! A 401 from a protected endpoint clears the stored session and notifies the
//! registered [`api::SessionListener`], whatever screen issued the call.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forms;
pub mod storage;

pub use api::{ApiClient, ApiClientBuilder, RequestOptions, SessionListener};
pub use config::DashboardConfig;
pub use error::{ApiError, ValidationError};
