//! Repository for the `users` table (credentials).

use sqlx::PgPool;
use voicebox_core::types::DbId;

use crate::models::user::User;

const COLUMNS: &str = "id, email, password_hash, is_anonymous, created_at";

/// Provides CRUD operations for credentials.
pub struct UserRepo;

impl UserRepo {
    /// Insert a manager credential with email and Argon2id password hash.
    ///
    /// A duplicate email violates `uq_users_email`, which the api layer
    /// surfaces as a 409.
    pub async fn create_manager(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, is_anonymous)
             VALUES ($1, $2, false)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(password_hash)
            .fetch_one(pool)
            .await
    }

    /// Insert an anonymous employee credential (no email, no password).
    pub async fn create_anonymous(pool: &PgPool) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (is_anonymous) VALUES (true) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query).fetch_one(pool).await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
