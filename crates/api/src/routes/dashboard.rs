//! Route definitions for the manager dashboard.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /grievances  -> list_grievances (manager only)
/// GET /summary     -> summary (manager only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/grievances", get(dashboard::list_grievances))
        .route("/summary", get(dashboard::summary))
}
