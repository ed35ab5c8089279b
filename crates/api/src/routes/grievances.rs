//! Route definitions for grievance submission and the caller's points.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::grievances;
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// POST /grievances  -> submit (requires auth)
/// GET  /me/points   -> my_points (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/grievances", post(grievances::submit))
        .route("/me/points", get(grievances::my_points))
}
