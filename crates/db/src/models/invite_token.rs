//! Invitation token model.

use sqlx::FromRow;
use voicebox_core::types::{DbId, Timestamp};

/// Full invite token row from the `invite_tokens` table.
///
/// Tokens are not consumed at redemption: the same token may be redeemed
/// many times, each creating a new employee identity in the tenant.
#[derive(Debug, Clone, FromRow)]
pub struct InviteToken {
    pub id: DbId,
    pub token: String,
    pub tenant_id: DbId,
    pub created_at: Timestamp,
}
