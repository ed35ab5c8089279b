//! Repository for the `identities` table.

use sqlx::PgPool;
use voicebox_core::types::DbId;

use crate::models::identity::Identity;

const COLUMNS: &str = "id, user_id, tenant_id, role, created_at";

/// Provides CRUD operations for identities.
pub struct IdentityRepo;

impl IdentityRepo {
    /// Insert a new identity binding a credential to a tenant and role.
    ///
    /// `uq_identities_user_id` guarantees at most one identity per
    /// credential; a concurrent duplicate insert fails with a unique
    /// violation rather than creating a second row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        tenant_id: DbId,
        role: &str,
    ) -> Result<Identity, sqlx::Error> {
        let query = format!(
            "INSERT INTO identities (user_id, tenant_id, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Identity>(&query)
            .bind(user_id)
            .bind(tenant_id)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// Find an identity by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Identity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM identities WHERE id = $1");
        sqlx::query_as::<_, Identity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the identity bound to a credential, if any.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Identity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM identities WHERE user_id = $1");
        sqlx::query_as::<_, Identity>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
