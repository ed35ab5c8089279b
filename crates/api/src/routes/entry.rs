//! Route definitions for invitation-token redemption.

use axum::routing::post;
use axum::Router;

use crate::handlers::entry;
use crate::state::AppState;

/// Routes mounted at `/entry`.
///
/// ```text
/// POST /redeem  -> redeem (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/redeem", post(entry::redeem))
}
