//! Repository for the `tenants` table.

use sqlx::PgPool;
use voicebox_core::types::DbId;

use crate::models::tenant::{RewardConfig, Tenant};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, reward_target_points, reward_span, reward_item, created_at";

/// Provides CRUD operations for tenants.
pub struct TenantRepo;

impl TenantRepo {
    /// Insert a new tenant with its reward configuration, returning the
    /// created row. Missing reward fields fall back to 0 / `monthly` / ``.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        reward: &RewardConfig,
    ) -> Result<Tenant, sqlx::Error> {
        let query = format!(
            "INSERT INTO tenants (name, reward_target_points, reward_span, reward_item)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tenant>(&query)
            .bind(name)
            .bind(reward.reward_target_points.unwrap_or(0))
            .bind(reward.reward_span.as_deref().unwrap_or("monthly"))
            .bind(reward.reward_item.as_deref().unwrap_or(""))
            .fetch_one(pool)
            .await
    }

    /// Find a tenant by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tenant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tenants WHERE id = $1");
        sqlx::query_as::<_, Tenant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all tenants ordered by creation time.
    pub async fn list(pool: &PgPool) -> Result<Vec<Tenant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tenants ORDER BY created_at");
        sqlx::query_as::<_, Tenant>(&query).fetch_all(pool).await
    }
}
