//! Credential model.
//!
//! Contains the password hash -- never serialize this to API responses.

use sqlx::FromRow;
use voicebox_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Managers carry an email and an Argon2id password hash; anonymous
/// employee credentials carry neither.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub is_anonymous: bool,
    pub created_at: Timestamp,
}
