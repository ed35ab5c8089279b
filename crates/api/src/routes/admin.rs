//! Route definitions for the provisioning surface.

use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST /tenants  -> create_tenant (requires X-Admin-Key)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/tenants", post(admin::create_tenant))
}
