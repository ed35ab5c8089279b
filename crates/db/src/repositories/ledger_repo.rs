//! Repository for the append-only `ledger_entries` table.

use sqlx::PgPool;
use voicebox_core::types::DbId;

use crate::models::ledger::LedgerEntry;

const COLUMNS: &str = "id, tenant_id, identity_id, points, reason, created_at";

/// Provides append and read-only aggregate operations for the points
/// ledger. Existing entries are never mutated; there is deliberately no
/// update or delete method.
pub struct LedgerRepo;

impl LedgerRepo {
    /// Append a signed point adjustment, returning the created entry.
    pub async fn append(
        pool: &PgPool,
        tenant_id: DbId,
        identity_id: DbId,
        points: i32,
        reason: &str,
    ) -> Result<LedgerEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO ledger_entries (tenant_id, identity_id, points, reason)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LedgerEntry>(&query)
            .bind(tenant_id)
            .bind(identity_id)
            .bind(points)
            .bind(reason)
            .fetch_one(pool)
            .await
    }

    /// Sum of all points awarded to one identity.
    pub async fn sum_for_identity(pool: &PgPool, identity_id: DbId) -> Result<i64, sqlx::Error> {
        let (sum,): (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(points), 0) FROM ledger_entries WHERE identity_id = $1",
        )
        .bind(identity_id)
        .fetch_one(pool)
        .await?;
        Ok(sum)
    }

    /// Sum of all points awarded within one tenant.
    pub async fn sum_for_tenant(pool: &PgPool, tenant_id: DbId) -> Result<i64, sqlx::Error> {
        let (sum,): (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(points), 0) FROM ledger_entries WHERE tenant_id = $1",
        )
        .bind(tenant_id)
        .fetch_one(pool)
        .await?;
        Ok(sum)
    }
}
