//! Tenant (client company) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use voicebox_core::types::{DbId, Timestamp};

/// Full tenant row from the `tenants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tenant {
    pub id: DbId,
    pub name: String,
    pub reward_target_points: i32,
    /// Reward period: `weekly`, `monthly`, or `yearly`.
    pub reward_span: String,
    pub reward_item: String,
    pub created_at: Timestamp,
}

/// Reward configuration supplied at provisioning time. All fields optional;
/// defaults are 0 points / `monthly` / empty item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RewardConfig {
    pub reward_target_points: Option<i32>,
    pub reward_span: Option<String>,
    pub reward_item: Option<String>,
}
