//! Storedash Core - Backend data types.
//!
//! This crate provides the records exchanged with the marketplace backend:
//! - Resource DTOs (orders, products, stores, users, carts, ...)
//! - Type-safe IDs, status enums and money
//! - The pagination envelope and its normalization into plain lists
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Invariants on
//! these records (quantities, status transitions) are enforced by the backend;
//! the types only mirror the wire shape.
//!
//! # Modules
//!
//! - [`types`] - DTOs, newtype IDs, statuses, prices and pagination

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
