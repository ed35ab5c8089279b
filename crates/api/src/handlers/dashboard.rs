//! Manager dashboard read endpoints.
//!
//! These are read-only projections over the tenant's data; the submission
//! path never depends on them.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use voicebox_db::models::grievance::Grievance;
use voicebox_db::repositories::{GrievanceRepo, IdentityRepo, LedgerRepo, SubscriptionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireManager;
use crate::response::DataResponse;
use crate::state::AppState;

/// Aggregates for the manager dashboard header.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub grievance_count: i64,
    pub average_stress_level: Option<f64>,
    pub total_points_awarded: i64,
    pub subscription_active: bool,
}

/// GET /api/v1/dashboard/grievances
///
/// The manager's tenant's grievances, newest first.
pub async fn list_grievances(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Grievance>>>> {
    let identity = IdentityRepo::find_by_user_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("No profile found for this session".into()))?;

    let grievances = GrievanceRepo::list_for_tenant(&state.pool, identity.tenant_id).await?;
    Ok(Json(DataResponse { data: grievances }))
}

/// GET /api/v1/dashboard/summary
///
/// Grievance count, average stress level, total points awarded, and whether
/// the tenant's subscription is active.
pub async fn summary(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let identity = IdentityRepo::find_by_user_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("No profile found for this session".into()))?;

    let (grievance_count, average_stress_level) =
        GrievanceRepo::stats_for_tenant(&state.pool, identity.tenant_id).await?;
    let total_points_awarded = LedgerRepo::sum_for_tenant(&state.pool, identity.tenant_id).await?;
    let subscription_active = SubscriptionRepo::is_active(&state.pool, identity.tenant_id).await?;

    Ok(Json(DataResponse {
        data: DashboardSummary {
            grievance_count,
            average_stress_level,
            total_points_awarded,
            subscription_active,
        },
    }))
}
