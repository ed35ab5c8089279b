//! Route definitions for inbound provider webhooks.

use axum::routing::post;
use axum::Router;

use crate::handlers::webhooks;
use crate::state::AppState;

/// Routes mounted at `/webhooks`.
///
/// ```text
/// POST /payments  -> payments (public; verification seam in handler)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/payments", post(webhooks::payments))
}
