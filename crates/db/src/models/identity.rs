//! Identity model: a principal bound to one tenant and a fixed role.

use serde::Serialize;
use sqlx::FromRow;
use voicebox_core::types::{DbId, Timestamp};

/// Full identity row from the `identities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Identity {
    pub id: DbId,
    pub user_id: DbId,
    pub tenant_id: DbId,
    /// `admin`, `manager`, or `employee`. Fixed at creation.
    pub role: String,
    pub created_at: Timestamp,
}
