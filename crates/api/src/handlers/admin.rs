//! Handler for tenant provisioning (super-admin onboarding).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use voicebox_core::roles::ROLE_MANAGER;
use voicebox_core::types::DbId;
use voicebox_db::models::tenant::RewardConfig;
use voicebox_db::repositories::{IdentityRepo, InviteTokenRepo, TenantRepo, UserRepo};

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdminKey;
use crate::state::AppState;

/// Request body for `POST /admin/tenants`.
///
/// Required fields are `Option` so an absent key rejects with a 400 from
/// the handler's own checks instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateTenantRequest {
    pub company_name: Option<String>,
    pub manager_email: Option<String>,
    pub manager_password: Option<String>,
    #[serde(flatten)]
    pub reward: RewardConfig,
}

/// Required, non-blank string field. Absent and blank both reject with 400.
fn required_field<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{name} must not be empty")))
}

/// Response body: the new tenant and its invitation link.
#[derive(Debug, Serialize)]
pub struct CreateTenantResponse {
    pub tenant_id: DbId,
    pub token: String,
    pub entry_url: String,
}

/// POST /api/v1/admin/tenants
///
/// Provision a tenant: tenant row, invitation token, manager credential,
/// manager identity -- in that order, with no automatic rollback. Each
/// completed step is logged with its ids so a failure partway through
/// leaves enough context for manual cleanup.
pub async fn create_tenant(
    _key: RequireAdminKey,
    State(state): State<AppState>,
    Json(input): Json<CreateTenantRequest>,
) -> AppResult<impl IntoResponse> {
    let company_name = required_field(&input.company_name, "company_name")?;
    let manager_email = required_field(&input.manager_email, "manager_email")?;
    let manager_password = input
        .manager_password
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("manager_password must not be empty".into()))?;
    validate_password_strength(manager_password).map_err(AppError::BadRequest)?;

    // Step 1: tenant.
    let tenant = TenantRepo::create(&state.pool, company_name, &input.reward).await?;
    tracing::info!(tenant_id = tenant.id, "Provisioning: tenant created");

    // Step 2: invitation token.
    let token = InviteTokenRepo::create(&state.pool, tenant.id)
        .await
        .map_err(|e| {
            tracing::error!(
                tenant_id = tenant.id,
                error = %e,
                "Provisioning failed at token creation; tenant row needs manual cleanup",
            );
            AppError::from(e)
        })?;
    tracing::info!(tenant_id = tenant.id, token_id = token.id, "Provisioning: invite token created");

    // Step 3: manager credential. A duplicate email surfaces as 409.
    let password_hash = hash_password(manager_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::create_manager(&state.pool, manager_email, &password_hash)
        .await
        .map_err(|e| {
            tracing::error!(
                tenant_id = tenant.id,
                token_id = token.id,
                error = %e,
                "Provisioning failed at credential creation; tenant and token need manual cleanup",
            );
            AppError::from(e)
        })?;
    tracing::info!(tenant_id = tenant.id, user_id = user.id, "Provisioning: manager credential created");

    // Step 4: manager identity.
    let identity = IdentityRepo::create(&state.pool, user.id, tenant.id, ROLE_MANAGER)
        .await
        .map_err(|e| {
            tracing::error!(
                tenant_id = tenant.id,
                token_id = token.id,
                user_id = user.id,
                error = %e,
                "Provisioning failed at identity creation; tenant, token, and credential need manual cleanup",
            );
            AppError::from(e)
        })?;

    let entry_url = format!(
        "{}/entry?token={}",
        state.config.public_base_url.trim_end_matches('/'),
        token.token
    );

    tracing::info!(
        tenant_id = tenant.id,
        identity_id = identity.id,
        "Tenant provisioned",
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateTenantResponse {
            tenant_id: tenant.id,
            token: token.token,
            entry_url,
        }),
    ))
}
