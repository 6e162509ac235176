//! Subscription models and DTOs.

use dailydigest_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `subscriptions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscription {
    pub id: DbId,
    pub email: String,
    pub categories: Vec<String>,
    pub frequency: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub is_active: bool,
}

/// Result of an upsert: the stored row and whether it was newly inserted.
#[derive(Debug, Clone, FromRow)]
pub struct UpsertedSubscription {
    #[sqlx(flatten)]
    pub subscription: Subscription,
    /// `true` when no row existed for the email before this write.
    pub inserted: bool,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for `POST /api/subscribe`.
///
/// `email` and `categories` default to empty so a missing field is reported
/// by the domain validators with the same message as an empty one.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub categories: Vec<String>,
    pub frequency: Option<String>,
}
