//! Search and health payloads.

use serde::{Deserialize, Serialize};

use super::product::Product;
use super::store::Store;
use super::user::User;

/// Results of the global dashboard search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResults {
    pub products: Vec<Product>,
    pub stores: Vec<Store>,
    pub users: Vec<User>,
}

impl SearchResults {
    /// Total number of hits across all sections.
    #[must_use]
    pub fn total(&self) -> usize {
        self.products.len() + self.stores.len() + self.users.len()
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    /// Whether the backend reports itself healthy.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case("up") || self.status.eq_ignore_ascii_case("ok")
    }
}
