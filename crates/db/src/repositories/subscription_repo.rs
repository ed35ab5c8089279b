//! Repository for the `subscriptions` table.

use sqlx::PgPool;
use voicebox_core::billing::{SUBSCRIPTION_ACTIVE, SUBSCRIPTION_CANCELED};
use voicebox_core::types::DbId;

use crate::models::billing::Subscription;

const COLUMNS: &str =
    "id, tenant_id, provider_subscription_id, status, created_at, updated_at";

/// Provides subscription upsert and status transitions.
pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// Mark the tenant's subscription active under the given external id,
    /// creating the row if the tenant has none yet.
    ///
    /// `uq_subscriptions_tenant_id` makes this a single atomic upsert, so
    /// concurrent ACTIVATED/UPDATED deliveries cannot create duplicates.
    pub async fn upsert_active(
        pool: &PgPool,
        tenant_id: DbId,
        provider_subscription_id: &str,
    ) -> Result<Subscription, sqlx::Error> {
        let query = format!(
            "INSERT INTO subscriptions (tenant_id, provider_subscription_id, status)
             VALUES ($1, $2, $3)
             ON CONFLICT (tenant_id) DO UPDATE SET
                provider_subscription_id = EXCLUDED.provider_subscription_id,
                status = EXCLUDED.status,
                updated_at = now()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(tenant_id)
            .bind(provider_subscription_id)
            .bind(SUBSCRIPTION_ACTIVE)
            .fetch_one(pool)
            .await
    }

    /// Set the subscription with the given external id to `canceled`.
    ///
    /// Returns `false` when no such subscription exists; cancellation of an
    /// unknown subscription is a no-op, not an error.
    pub async fn cancel_by_provider_id(
        pool: &PgPool,
        provider_subscription_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE subscriptions SET status = $2, updated_at = now()
             WHERE provider_subscription_id = $1",
        )
        .bind(provider_subscription_id)
        .bind(SUBSCRIPTION_CANCELED)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find a tenant's subscription row, if any.
    pub async fn find_by_tenant(
        pool: &PgPool,
        tenant_id: DbId,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subscriptions WHERE tenant_id = $1");
        sqlx::query_as::<_, Subscription>(&query)
            .bind(tenant_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether the tenant currently has an active subscription.
    pub async fn is_active(pool: &PgPool, tenant_id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM subscriptions WHERE tenant_id = $1 AND status = $2)",
        )
        .bind(tenant_id)
        .bind(SUBSCRIPTION_ACTIVE)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }
}
