//! Route definitions for subscriber management.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::subscriptions;
use crate::state::AppState;

/// Subscription routes, mounted under `/api`.
///
/// ```text
/// POST   /subscribe             -> subscribe
/// DELETE /subscribe/{email}     -> unsubscribe
/// GET    /subscriptions         -> list_subscriptions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/subscribe", post(subscriptions::subscribe))
        .route("/subscribe/{email}", delete(subscriptions::unsubscribe))
        .route("/subscriptions", get(subscriptions::list_subscriptions))
}
