//! Grievance model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use voicebox_core::types::{DbId, Timestamp};

/// Full grievance row from the `grievances` table. Immutable once written.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Grievance {
    pub id: DbId,
    pub tenant_id: DbId,
    pub identity_id: DbId,
    pub category: String,
    pub details: String,
    pub stress_level: i32,
    pub created_at: Timestamp,
}

/// Input for inserting a grievance. Fields are already validated and
/// normalized by the admission policy.
#[derive(Debug, Clone)]
pub struct NewGrievance {
    pub tenant_id: DbId,
    pub identity_id: DbId,
    pub category: String,
    pub details: String,
    pub stress_level: i32,
}
