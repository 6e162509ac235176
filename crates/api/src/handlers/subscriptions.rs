//! Handlers for the subscription resource.
//!
//! Subscriptions are addressed by email. `POST /subscribe` is an upsert,
//! `DELETE /subscribe/{email}` is a soft delete, and the list only ever
//! returns active rows.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use dailydigest_core::error::CoreError;
use dailydigest_core::subscription::{normalize_email, validate_subscription, Frequency};
use dailydigest_db::models::subscription::{SubscribeRequest, Subscription};
use dailydigest_db::repositories::SubscriptionRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{ValidJson, ValidPath, ValidQuery};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /subscriptions`.
#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionFilter {
    /// Only include subscriptions that contain this category.
    pub category: Option<String>,
    /// Only include subscriptions with this frequency.
    pub frequency: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/subscribe
///
/// Create a subscription, or update categories/frequency and reactivate the
/// existing one for the same email. Returns 201 for a new row and 200 for
/// an update.
pub async fn subscribe(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<SubscribeRequest>,
) -> AppResult<impl IntoResponse> {
    let new_subscription =
        validate_subscription(&input.email, &input.categories, input.frequency.as_deref())?;

    let result = SubscriptionRepo::upsert(&state.pool, &new_subscription).await?;
    let subscription = result.subscription;

    let status = if result.inserted {
        tracing::info!(
            email = %subscription.email,
            categories = ?subscription.categories,
            frequency = %subscription.frequency,
            "subscription_created",
        );
        StatusCode::CREATED
    } else {
        tracing::info!(
            email = %subscription.email,
            categories = ?subscription.categories,
            frequency = %subscription.frequency,
            "subscription_updated",
        );
        StatusCode::OK
    };

    Ok((status, Json(subscription)))
}

/// GET /api/subscriptions
///
/// List active subscriptions, optionally filtered by `category` and
/// `frequency`.
pub async fn list_subscriptions(
    State(state): State<AppState>,
    ValidQuery(filter): ValidQuery<SubscriptionFilter>,
) -> AppResult<Json<Vec<Subscription>>> {
    let category = filter
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    let frequency = filter
        .frequency
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::parse::<Frequency>)
        .transpose()?;

    let subscriptions = match (category, frequency) {
        (None, None) => SubscriptionRepo::list_active(&state.pool).await?,
        (category, frequency) => {
            SubscriptionRepo::list_active_filtered(&state.pool, category, frequency).await?
        }
    };

    Ok(Json(subscriptions))
}

/// DELETE /api/subscribe/{email}
///
/// Soft-delete the subscription for `email`. Returns 404 if the email was
/// never subscribed; repeated deletes of a known email succeed.
pub async fn unsubscribe(
    State(state): State<AppState>,
    ValidPath(raw_email): ValidPath<String>,
) -> AppResult<impl IntoResponse> {
    // An address that fails validation can never have been stored.
    let email = normalize_email(&raw_email).map_err(|_| not_found(&raw_email))?;

    let found = SubscriptionRepo::deactivate(&state.pool, &email).await?;
    if !found {
        return Err(not_found(&email));
    }

    tracing::info!(email = %email, "unsubscribed");

    Ok(Json(serde_json::json!({
        "message": "Successfully unsubscribed"
    })))
}

fn not_found(email: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Subscription",
        key: email.to_string(),
    })
}
