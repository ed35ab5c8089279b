//! Repository for the `report_purchases` table.

use sqlx::PgPool;
use voicebox_core::types::DbId;

use crate::models::billing::ReportPurchase;

const COLUMNS: &str =
    "id, tenant_id, manager_identity_id, report_type, provider_transaction_id, amount, created_at";

/// Provides idempotent recording of one-off report purchases.
pub struct PurchaseRepo;

impl PurchaseRepo {
    /// Look up a purchase by external transaction id. Used as a fast path
    /// before inserting; the unique constraint is the authoritative guard.
    pub async fn find_by_transaction_id(
        pool: &PgPool,
        transaction_id: &str,
    ) -> Result<Option<ReportPurchase>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM report_purchases WHERE provider_transaction_id = $1");
        sqlx::query_as::<_, ReportPurchase>(&query)
            .bind(transaction_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a purchase unless one already exists for the transaction id.
    ///
    /// Relies on `uq_report_purchases_provider_transaction_id` via
    /// `ON CONFLICT DO NOTHING`, so a webhook replay racing a concurrent
    /// delivery still results in exactly one row. Returns the inserted row,
    /// or `None` when the transaction was already recorded.
    pub async fn insert_if_absent(
        pool: &PgPool,
        tenant_id: DbId,
        manager_identity_id: DbId,
        report_type: &str,
        transaction_id: &str,
        amount: f64,
    ) -> Result<Option<ReportPurchase>, sqlx::Error> {
        let query = format!(
            "INSERT INTO report_purchases
                (tenant_id, manager_identity_id, report_type, provider_transaction_id, amount)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (provider_transaction_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReportPurchase>(&query)
            .bind(tenant_id)
            .bind(manager_identity_id)
            .bind(report_type)
            .bind(transaction_id)
            .bind(amount)
            .fetch_optional(pool)
            .await
    }

    /// List a tenant's purchases, newest first.
    pub async fn list_for_tenant(
        pool: &PgPool,
        tenant_id: DbId,
    ) -> Result<Vec<ReportPurchase>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM report_purchases WHERE tenant_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ReportPurchase>(&query)
            .bind(tenant_id)
            .fetch_all(pool)
            .await
    }
}
