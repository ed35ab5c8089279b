pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod entry;
pub mod grievances;
pub mod health;
pub mod webhooks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login              manager login (public)
///
/// /grievances              submit (requires auth)
/// /me/points               caller's point total (requires auth)
///
/// /entry/redeem            invitation token redemption (public)
///
/// /admin/tenants           tenant provisioning (requires admin key)
///
/// /dashboard/grievances    tenant grievance list (manager only)
/// /dashboard/summary       tenant aggregates (manager only)
///
/// /webhooks/payments       payment provider events (public, verify seam)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(grievances::router())
        .nest("/entry", entry::router())
        .nest("/admin", admin::router())
        .nest("/dashboard", dashboard::router())
        .nest("/webhooks", webhooks::router())
}
