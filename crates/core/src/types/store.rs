//! Store records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{StoreId, UserId};
use super::timestamp;

/// A marketplace store owned by a seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner_id: Option<UserId>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}
