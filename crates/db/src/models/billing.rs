//! Billing models: one-off report purchases and tenant subscriptions.

use serde::Serialize;
use sqlx::FromRow;
use voicebox_core::types::{DbId, Timestamp};

/// One-off report purchase from the `report_purchases` table.
///
/// `provider_transaction_id` is the idempotency key: a replayed webhook
/// event for the same transaction must not create a second row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReportPurchase {
    pub id: DbId,
    pub tenant_id: DbId,
    pub manager_identity_id: DbId,
    pub report_type: String,
    pub provider_transaction_id: String,
    pub amount: f64,
    pub created_at: Timestamp,
}

/// Tenant subscription row. One per tenant; status is `active` or `canceled`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscription {
    pub id: DbId,
    pub tenant_id: DbId,
    pub provider_subscription_id: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
