//! Authorization extractors.
//!
//! [`RequireManager`] wraps [`AuthUser`] and rejects callers whose role does
//! not meet the requirement. [`RequireAdminKey`] guards the provisioning
//! surface with a shared key instead of a JWT: the super-admin is an
//! operator, not a tenant identity.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use voicebox_core::error::CoreError;
use voicebox_core::roles::{ROLE_ADMIN, ROLE_MANAGER};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `manager` or `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn dashboard(RequireManager(user): RequireManager) -> AppResult<Json<()>> {
///     // user is guaranteed to be a manager or admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_MANAGER && user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Manager role required".into(),
            )));
        }
        Ok(RequireManager(user))
    }
}

/// Requires a valid `X-Admin-Key` header matching `ADMIN_API_KEY`.
///
/// When no admin key is configured, provisioning fails with a configuration
/// error rather than being left open -- a missing privileged credential is
/// an operator problem, never an implicit allow.
pub struct RequireAdminKey;

impl FromRequestParts<AppState> for RequireAdminKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.admin_api_key.as_deref() else {
            return Err(AppError::Config(
                "ADMIN_API_KEY is not set; tenant provisioning is disabled".into(),
            ));
        };

        let provided = parts
            .headers
            .get("x-admin-key")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing X-Admin-Key header".into()))
            })?;

        if provided != expected {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid admin key".into(),
            )));
        }

        Ok(RequireAdminKey)
    }
}
