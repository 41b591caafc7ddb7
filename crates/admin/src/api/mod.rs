//! Marketplace REST API client.
//!
//! # Architecture
//!
//! - [`ApiClient`] owns the HTTP client, the base URL and the session token
//! - [`ApiClient::request`] is the single path for outgoing calls
//! - One file per backend resource adds typed calls to [`ApiClient`]
//!
//! # Authentication
//!
//! The bearer token is read from memory on every call and sent to every
//! endpoint outside [`PUBLIC_ENDPOINTS`]. The token is persisted through
//! [`crate::storage::SessionStorage`] so a restart keeps the session.
//!
//! # Collections
//!
//! The backend pages some listings and not others. List calls accept both
//! shapes and always produce a plain `Vec`; paged calls keep `totalPages`
//! next to the items.

mod client;
mod request;

mod analytics;
mod auth;
mod carts;
mod categories;
mod discounts;
mod notifications;
mod orders;
mod products;
mod reviews;
mod stores;
mod system;
mod users;

pub use client::{ApiClient, ApiClientBuilder, SessionListener};
pub use products::ProductQuery;
pub use request::{PUBLIC_ENDPOINTS, RequestOptions, is_public_endpoint};
