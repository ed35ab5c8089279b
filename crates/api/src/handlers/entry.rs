//! Handler for invitation-token redemption.
//!
//! Redeeming a token creates an anonymous employee credential and an
//! identity in the token's tenant, then issues an access token for the new
//! session. Tokens are not consumed: every redemption of a valid token
//! yields a fresh employee identity, matching the product's one-link-per-
//! company distribution model.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use voicebox_core::roles::ROLE_EMPLOYEE;
use voicebox_core::types::DbId;
use voicebox_db::repositories::{IdentityRepo, InviteTokenRepo, UserRepo};

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::state::AppState;

/// Request body for `POST /entry/redeem`. The token is optional so an
/// absent key rejects with a 400 rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct RedeemRequest {
    pub token: Option<String>,
}

/// Response body: a session for the (possibly new) employee identity.
#[derive(Debug, Serialize)]
pub struct RedeemResponse {
    pub access_token: String,
    pub identity_id: DbId,
    pub tenant_id: DbId,
}

/// POST /api/v1/entry/redeem
///
/// Exchange an invitation token for an anonymous employee session. The
/// endpoint is public; a browser re-visiting the entry link with a live
/// session gets its existing identity back instead of a duplicate row.
pub async fn redeem(
    MaybeAuthUser(existing): MaybeAuthUser,
    State(state): State<AppState>,
    Json(input): Json<RedeemRequest>,
) -> AppResult<Json<RedeemResponse>> {
    let token_value = input
        .token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("token is required".into()))?;

    let token = InviteTokenRepo::find_by_token(&state.pool, token_value)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid or expired invitation token".into()))?;

    // Re-visit with a live session: reuse the existing identity rather than
    // creating a second one for the same credential.
    if let Some(caller) = existing {
        if let Some(identity) = IdentityRepo::find_by_user_id(&state.pool, caller.user_id).await? {
            let access_token =
                generate_access_token(caller.user_id, &identity.role, &state.config.jwt)
                    .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
            tracing::info!(
                identity_id = identity.id,
                tenant_id = identity.tenant_id,
                "Entry token re-redeemed by existing identity",
            );
            return Ok(Json(RedeemResponse {
                access_token,
                identity_id: identity.id,
                tenant_id: identity.tenant_id,
            }));
        }
    }

    let user = UserRepo::create_anonymous(&state.pool).await?;
    let identity =
        IdentityRepo::create(&state.pool, user.id, token.tenant_id, ROLE_EMPLOYEE).await?;

    let access_token = generate_access_token(user.id, ROLE_EMPLOYEE, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(
        identity_id = identity.id,
        tenant_id = token.tenant_id,
        "Entry token redeemed, employee identity created",
    );

    Ok(Json(RedeemResponse {
        access_token,
        identity_id: identity.id,
        tenant_id: token.tenant_id,
    }))
}
