//! Shared helpers for HTTP-level integration tests.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use voicebox_api::auth::jwt::{generate_access_token, JwtConfig};
use voicebox_api::config::ServerConfig;
use voicebox_api::routes;
use voicebox_api::state::AppState;
use voicebox_core::types::DbId;

/// Admin key accepted by the test configuration.
pub const TEST_ADMIN_KEY: &str = "test-admin-key";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        public_base_url: "http://localhost:3000".to_string(),
        admin_api_key: Some(TEST_ADMIN_KEY.to_string()),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Generate an access token for a credential using the test JWT config.
pub fn test_token(user_id: DbId, role: &str) -> String {
    let config = test_config();
    generate_access_token(user_id, role, &config.jwt).expect("token generation should succeed")
}

/// Send a GET request with no auth.
#[allow(dead_code)]
pub async fn get(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should complete")
}

/// Send a GET request with a bearer token.
#[allow(dead_code)]
pub async fn get_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should complete")
}

/// Send a POST with a JSON body and no auth.
pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should complete")
}

/// Send a POST with a JSON body and a bearer token.
#[allow(dead_code)]
pub async fn post_json_auth(
    app: Router,
    path: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should complete")
}

/// Send a POST with a JSON body and the test admin key header.
#[allow(dead_code)]
pub async fn post_json_admin(
    app: Router,
    path: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .header("x-admin-key", TEST_ADMIN_KEY)
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should complete")
}

/// Create a tenant and its invitation token directly in the database.
#[allow(dead_code)]
pub async fn seed_tenant(
    pool: &PgPool,
    name: &str,
) -> (
    voicebox_db::models::tenant::Tenant,
    voicebox_db::models::invite_token::InviteToken,
) {
    let tenant = voicebox_db::repositories::TenantRepo::create(
        pool,
        name,
        &voicebox_db::models::tenant::RewardConfig::default(),
    )
    .await
    .expect("tenant creation should succeed");
    let token = voicebox_db::repositories::InviteTokenRepo::create(pool, tenant.id)
        .await
        .expect("token creation should succeed");
    (tenant, token)
}

/// Create an anonymous employee credential and identity in a tenant,
/// returning the identity and a valid access token for it.
#[allow(dead_code)]
pub async fn seed_employee(
    pool: &PgPool,
    tenant_id: DbId,
) -> (voicebox_db::models::identity::Identity, String) {
    let user = voicebox_db::repositories::UserRepo::create_anonymous(pool)
        .await
        .expect("user creation should succeed");
    let identity =
        voicebox_db::repositories::IdentityRepo::create(pool, user.id, tenant_id, "employee")
            .await
            .expect("identity creation should succeed");
    let token = test_token(user.id, "employee");
    (identity, token)
}

/// Create a manager credential and identity in a tenant, returning the
/// identity and a valid access token for it.
#[allow(dead_code)]
pub async fn seed_manager(
    pool: &PgPool,
    tenant_id: DbId,
    email: &str,
    password: &str,
) -> (voicebox_db::models::identity::Identity, String) {
    let hash = voicebox_api::auth::password::hash_password(password)
        .expect("hashing should succeed");
    let user = voicebox_db::repositories::UserRepo::create_manager(pool, email, &hash)
        .await
        .expect("user creation should succeed");
    let identity =
        voicebox_db::repositories::IdentityRepo::create(pool, user.id, tenant_id, "manager")
            .await
            .expect("identity creation should succeed");
    let token = test_token(user.id, "manager");
    (identity, token)
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
