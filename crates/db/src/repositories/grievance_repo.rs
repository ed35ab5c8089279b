//! Repository for the `grievances` table.

use sqlx::PgPool;
use voicebox_core::types::{DbId, Timestamp};

use crate::models::grievance::{Grievance, NewGrievance};

const COLUMNS: &str = "id, tenant_id, identity_id, category, details, stress_level, created_at";

/// Provides operations for grievances. Rows are insert-only; there is no
/// update path.
pub struct GrievanceRepo;

impl GrievanceRepo {
    /// Insert an accepted grievance, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewGrievance) -> Result<Grievance, sqlx::Error> {
        let query = format!(
            "INSERT INTO grievances (tenant_id, identity_id, category, details, stress_level)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Grievance>(&query)
            .bind(input.tenant_id)
            .bind(input.identity_id)
            .bind(&input.category)
            .bind(&input.details)
            .bind(input.stress_level)
            .fetch_one(pool)
            .await
    }

    /// Count an identity's grievances created at or after `since`.
    ///
    /// Backs the rate-limit check: the admission policy compares this count
    /// against the hourly cap. The count-then-insert pair is not serialized
    /// against concurrent submissions, so the cap is best-effort.
    pub async fn count_since(
        pool: &PgPool,
        identity_id: DbId,
        since: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM grievances WHERE identity_id = $1 AND created_at >= $2",
        )
        .bind(identity_id)
        .bind(since)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// List a tenant's grievances, newest first.
    pub async fn list_for_tenant(
        pool: &PgPool,
        tenant_id: DbId,
    ) -> Result<Vec<Grievance>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM grievances WHERE tenant_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Grievance>(&query)
            .bind(tenant_id)
            .fetch_all(pool)
            .await
    }

    /// Grievance count and average stress level for a tenant.
    pub async fn stats_for_tenant(
        pool: &PgPool,
        tenant_id: DbId,
    ) -> Result<(i64, Option<f64>), sqlx::Error> {
        sqlx::query_as(
            "SELECT COUNT(*), AVG(stress_level::float8) FROM grievances WHERE tenant_id = $1",
        )
        .bind(tenant_id)
        .fetch_one(pool)
        .await
    }
}
