//! Handlers for grievance submission and the caller's point total.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use voicebox_core::admission::{self, SubmissionInput, REASON_SUBMISSION};
use voicebox_core::error::CoreError;
use voicebox_core::types::DbId;
use voicebox_db::models::grievance::NewGrievance;
use voicebox_db::repositories::{GrievanceRepo, IdentityRepo, LedgerRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::state::AppState;

/// Response body for an accepted submission.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub points_earned: i32,
}

/// Response body for `GET /me/points`.
#[derive(Debug, Serialize)]
pub struct PointsResponse {
    pub identity_id: DbId,
    pub total_points: i64,
}

/// POST /api/v1/grievances
///
/// Run the admission policy over the submission and, on acceptance, persist
/// the grievance and append the points ledger entry.
///
/// The rate-limit count and the insert are separate statements: two
/// concurrent submissions by the same identity can both pass the count, so
/// the hourly cap is best-effort rather than a hard guarantee.
pub async fn submit(
    MaybeAuthUser(caller): MaybeAuthUser,
    State(state): State<AppState>,
    Json(input): Json<SubmissionInput>,
) -> AppResult<Json<SubmitResponse>> {
    // Field validation answers before the credential check: a malformed
    // submission is a 400 whether or not the caller holds a session.
    admission::validate(&input)?;

    let user = caller.ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized("Missing or invalid access token".into()))
    })?;

    // Resolve tenant membership. An authenticated credential without an
    // identity row has nothing to attach the grievance to.
    let identity = IdentityRepo::find_by_user_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("No profile found for this session".into()))?;

    let window_start = Utc::now() - chrono::Duration::hours(1);
    let recent_count = GrievanceRepo::count_since(&state.pool, identity.id, window_start).await?;

    let accepted = admission::evaluate(&input, recent_count)?;

    let grievance = GrievanceRepo::create(
        &state.pool,
        &NewGrievance {
            tenant_id: identity.tenant_id,
            identity_id: identity.id,
            category: accepted.category.clone(),
            details: accepted.details.clone(),
            stress_level: accepted.stress_level,
        },
    )
    .await?;

    // Partial-failure policy: the grievance is already durable, so a failed
    // ledger append is logged for manual reconciliation and the submission
    // still succeeds from the caller's perspective.
    match LedgerRepo::append(
        &state.pool,
        identity.tenant_id,
        identity.id,
        accepted.points,
        REASON_SUBMISSION,
    )
    .await
    {
        Ok(entry) => {
            tracing::info!(
                grievance_id = grievance.id,
                ledger_entry_id = entry.id,
                tenant_id = identity.tenant_id,
                points = accepted.points,
                "Grievance accepted",
            );
        }
        Err(e) => {
            tracing::error!(
                grievance_id = grievance.id,
                tenant_id = identity.tenant_id,
                identity_id = identity.id,
                points = accepted.points,
                error = %e,
                "Ledger append failed after grievance insert; points not recorded",
            );
        }
    }

    Ok(Json(SubmitResponse {
        success: true,
        points_earned: accepted.points,
    }))
}

/// GET /api/v1/me/points
///
/// The caller's lifetime point total from the ledger.
pub async fn my_points(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<PointsResponse>> {
    let identity = IdentityRepo::find_by_user_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("No profile found for this session".into()))?;

    let total_points = LedgerRepo::sum_for_identity(&state.pool, identity.id).await?;

    Ok(Json(PointsResponse {
        identity_id: identity.id,
        total_points,
    }))
}
