//! Repository for the `invite_tokens` table.

use sqlx::PgPool;
use uuid::Uuid;
use voicebox_core::types::DbId;

use crate::models::invite_token::InviteToken;

const COLUMNS: &str = "id, token, tenant_id, created_at";

/// Provides operations for invitation tokens.
pub struct InviteTokenRepo;

impl InviteTokenRepo {
    /// Issue a new opaque token bound to a tenant, returning the created row.
    pub async fn create(pool: &PgPool, tenant_id: DbId) -> Result<InviteToken, sqlx::Error> {
        let token = Uuid::new_v4().to_string();
        let query = format!(
            "INSERT INTO invite_tokens (token, tenant_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InviteToken>(&query)
            .bind(&token)
            .bind(tenant_id)
            .fetch_one(pool)
            .await
    }

    /// Look up a token by its exact value.
    pub async fn find_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<InviteToken>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invite_tokens WHERE token = $1");
        sqlx::query_as::<_, InviteToken>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }
}
