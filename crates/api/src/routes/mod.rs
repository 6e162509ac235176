pub mod health;
pub mod subscriptions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /subscribe                  create or update (POST)
/// /subscribe/{email}          unsubscribe (DELETE)
/// /subscriptions              list active (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(subscriptions::router())
}
