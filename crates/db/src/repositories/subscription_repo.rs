//! Repository for the `subscriptions` table.
//!
//! The email column is the natural key: upsert and deactivate address rows
//! by email, never by id. Rows are never physically removed.

use dailydigest_core::subscription::{Frequency, NewSubscription};
use sqlx::PgPool;

use crate::models::subscription::{Subscription, UpsertedSubscription};

/// Column list for `subscriptions` queries.
const COLUMNS: &str = "\
    id, email, categories, frequency, \
    created_at, updated_at, is_active";

/// Provides data access for subscriptions.
pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// Insert a subscription, or replace the categories and frequency of the
    /// existing row for the same email and reactivate it.
    ///
    /// A single `ON CONFLICT (email)` statement, so concurrent writers for one
    /// email serialize on the unique constraint and the last one wins.
    /// `updated_at` never moves backwards even if the server clock does.
    pub async fn upsert(
        pool: &PgPool,
        input: &NewSubscription,
    ) -> Result<UpsertedSubscription, sqlx::Error> {
        let query = format!(
            "INSERT INTO subscriptions (email, categories, frequency) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (email) DO UPDATE SET \
                 categories = EXCLUDED.categories, \
                 frequency = EXCLUDED.frequency, \
                 is_active = TRUE, \
                 updated_at = GREATEST(NOW(), subscriptions.updated_at) \
             RETURNING {COLUMNS}, (xmax = 0) AS inserted"
        );
        sqlx::query_as::<_, UpsertedSubscription>(&query)
            .bind(input.email())
            .bind(input.categories())
            .bind(input.frequency().as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a subscription by email, active or not.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subscriptions WHERE email = $1");
        sqlx::query_as::<_, Subscription>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all active subscriptions in insertion order.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Subscription>, sqlx::Error> {
        Self::list_active_filtered(pool, None, None).await
    }

    /// List active subscriptions, optionally restricted to those that include
    /// `category` and/or use `frequency`.
    ///
    /// This is the recipient query for digest delivery: a persona's digest
    /// goes to every active row whose categories contain that persona.
    pub async fn list_active_filtered(
        pool: &PgPool,
        category: Option<&str>,
        frequency: Option<Frequency>,
    ) -> Result<Vec<Subscription>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subscriptions \
             WHERE is_active \
               AND ($1::TEXT IS NULL OR $1 = ANY(categories)) \
               AND ($2::TEXT IS NULL OR frequency = $2) \
             ORDER BY id"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(category)
            .bind(frequency.map(|f| f.as_str()))
            .fetch_all(pool)
            .await
    }

    /// Soft-delete the subscription for `email` by clearing `is_active`.
    ///
    /// Returns `true` if a row exists for the email (whether or not it was
    /// already inactive), `false` if the email was never subscribed.
    pub async fn deactivate(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE subscriptions \
             SET is_active = FALSE, updated_at = GREATEST(NOW(), updated_at) \
             WHERE email = $1",
        )
        .bind(email)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
