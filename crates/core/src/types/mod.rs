//! Core types for Storedash.
//!
//! This module provides the backend DTOs and type-safe wrappers for common
//! domain concepts.

pub mod analytics;
pub mod auth;
pub mod cart;
pub mod discount;
pub mod email;
pub mod id;
pub mod notification;
pub mod order;
pub mod page;
pub mod price;
pub mod product;
pub mod review;
pub mod search;
pub mod status;
pub mod store;
pub mod timestamp;
pub mod user;

pub use analytics::{AnalyticsSnapshot, DailyRevenue, TopProduct};
pub use auth::{LoginRequest, RefreshRequest, RegisterRequest, TokenPair};
pub use cart::{Cart, CartItem, CartItemRequest};
pub use discount::{Discount, DiscountQuote};
pub use email::{Email, EmailError};
pub use id::*;
pub use notification::Notification;
pub use order::{Order, OrderItem, OrderStatusUpdate};
pub use page::{Collection, Page, PageResult};
pub use price::{CurrencyCode, Price};
pub use product::{Category, Product};
pub use review::Review;
pub use search::{HealthStatus, SearchResults};
pub use status::*;
pub use store::Store;
pub use user::{User, UserUpdate};
