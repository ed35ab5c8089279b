//! Handler for manager login.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use voicebox_core::error::CoreError;
use voicebox_core::types::DbId;
use voicebox_db::repositories::{IdentityRepo, UserRepo};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /auth/login`. Fields are optional so an absent
/// key rejects with a 400 rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub identity: IdentityInfo,
}

/// Public identity info embedded in [`LoginResponse`].
#[derive(Debug, Serialize)]
pub struct IdentityInfo {
    pub id: DbId,
    pub tenant_id: DbId,
    pub role: String,
}

/// POST /api/v1/auth/login
///
/// Authenticate a manager with email + password. Returns an access token
/// carrying the identity's role.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let email = input
        .email
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("email and password are required".into()))?;
    let password = input
        .password
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("email and password are required".into()))?;

    let user = UserRepo::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    // Anonymous credentials have no password and cannot log in this way.
    let Some(hash) = user.password_hash.as_deref() else {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    };

    let password_valid = verify_password(password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    let identity = IdentityRepo::find_by_user_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("Credential {} has no identity row", user.id))
        })?;

    let access_token = generate_access_token(user.id, &identity.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(
        user_id = user.id,
        identity_id = identity.id,
        tenant_id = identity.tenant_id,
        role = %identity.role,
        "Manager logged in",
    );

    Ok(Json(LoginResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        identity: IdentityInfo {
            id: identity.id,
            tenant_id: identity.tenant_id,
            role: identity.role,
        },
    }))
}
