use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`). Constructed once per process in `main` and passed explicitly --
/// there is no module-level singleton, so every call site that touches the
/// database can be seen to do so through this state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: voicebox_db::DbPool,
    /// Server configuration (JWT secret, admin key, CORS, timeouts).
    pub config: Arc<ServerConfig>,
}
