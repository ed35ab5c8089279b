//! Points ledger model.

use serde::Serialize;
use sqlx::FromRow;
use voicebox_core::types::{DbId, Timestamp};

/// One signed point adjustment from the append-only `ledger_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LedgerEntry {
    pub id: DbId,
    pub tenant_id: DbId,
    pub identity_id: DbId,
    pub points: i32,
    pub reason: String,
    pub created_at: Timestamp,
}
