//! HTTP-level integration tests for grievance submission.
//!
//! Covers the admission policy end to end: field validation, length and
//! points tiers, the hourly rate cap, auth failures, and the ledger append.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, post_json_auth};
use sqlx::PgPool;
use voicebox_db::repositories::{GrievanceRepo, LedgerRepo};

fn submission(details: &str) -> serde_json::Value {
    serde_json::json!({
        "category": "workload",
        "details": details,
        "stress_level": 6
    })
}

/// A valid submission is accepted with base points and persists both the
/// grievance and the ledger entry.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submission_accepted(pool: PgPool) {
    let (tenant, _token) = common::seed_tenant(&pool, "Acme").await;
    let (identity, token) = common::seed_employee(&pool, tenant.id).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json_auth(
        app,
        "/api/v1/grievances",
        submission("a perfectly reasonable complaint"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["points_earned"], 10);

    let grievances = GrievanceRepo::list_for_tenant(&pool, tenant.id)
        .await
        .expect("list should succeed");
    assert_eq!(grievances.len(), 1);
    assert_eq!(grievances[0].identity_id, identity.id);
    assert_eq!(grievances[0].category, "workload");
    assert_eq!(grievances[0].stress_level, 6);

    let total = LedgerRepo::sum_for_identity(&pool, identity.id)
        .await
        .expect("sum should succeed");
    assert_eq!(total, 10, "ledger must record the awarded points");
}

/// Details are counted in characters: 15 Japanese characters pass the
/// 10-character minimum and score base points.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submission_japanese_details(pool: PgPool) {
    let (tenant, _token) = common::seed_tenant(&pool, "Acme").await;
    let (_identity, token) = common::seed_employee(&pool, tenant.id).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/grievances",
        submission("古いPCの動作が遅く業務に影響"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["points_earned"], 10);
}

/// 60-character details earn the 50-character bonus; 120 earn the
/// 100-character bonus. The tiers do not stack.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submission_points_tiers(pool: PgPool) {
    let (tenant, _token) = common::seed_tenant(&pool, "Acme").await;

    for (len, expected) in [(60usize, 15), (120usize, 20)] {
        // A fresh identity per case keeps the rate limit out of the way.
        let (_identity, token) = common::seed_employee(&pool, tenant.id).await;
        let app = common::build_test_app(pool.clone());

        let response =
            post_json_auth(app, "/api/v1/grievances", submission(&"x".repeat(len)), &token).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["points_earned"], expected, "details length {len}");
    }
}

/// Details below 10 characters after trimming are rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submission_too_short(pool: PgPool) {
    let (tenant, _token) = common::seed_tenant(&pool, "Acme").await;
    let (identity, token) = common::seed_employee(&pool, tenant.id).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json_auth(
        app,
        "/api/v1/grievances",
        submission("   12345   "),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "TOO_SHORT");

    // Nothing was persisted.
    let grievances = GrievanceRepo::list_for_tenant(&pool, tenant.id)
        .await
        .expect("list should succeed");
    assert!(grievances.is_empty());
    let total = LedgerRepo::sum_for_identity(&pool, identity.id)
        .await
        .expect("sum should succeed");
    assert_eq!(total, 0);
}

/// A missing stress_level rejects with 400 even when category and details
/// are valid.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submission_missing_stress_level(pool: PgPool) {
    let (tenant, _token) = common::seed_tenant(&pool, "Acme").await;
    let (_identity, token) = common::seed_employee(&pool, tenant.id).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "category": "workload",
        "details": "a perfectly reasonable complaint"
    });
    let response = post_json_auth(app, "/api/v1/grievances", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "MISSING_FIELD");
}

/// Stress levels outside 1..=10 reject with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submission_stress_level_out_of_range(pool: PgPool) {
    let (tenant, _token) = common::seed_tenant(&pool, "Acme").await;
    let (_identity, token) = common::seed_employee(&pool, tenant.id).await;

    for level in [0, 11] {
        let app = common::build_test_app(pool.clone());
        let body = serde_json::json!({
            "category": "workload",
            "details": "a perfectly reasonable complaint",
            "stress_level": level
        });
        let response = post_json_auth(app, "/api/v1/grievances", body, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "level {level}");
    }
}

/// Submissions without a bearer token are rejected with 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submission_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/grievances", submission("long enough details")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Field validation answers before authentication: an unauthenticated
/// submission with invalid fields gets the 400, not a 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submission_validation_precedes_auth(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/grievances", submission("short")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "TOO_SHORT");

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "category": "workload",
        "details": "a perfectly reasonable complaint"
    });
    let response = post_json(app, "/api/v1/grievances", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "MISSING_FIELD");
}

/// An authenticated credential with no identity row cannot submit.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submission_requires_profile(pool: PgPool) {
    let user = voicebox_db::repositories::UserRepo::create_anonymous(&pool)
        .await
        .expect("user creation should succeed");
    let token = common::test_token(user.id, "employee");
    let app = common::build_test_app(pool);

    let response =
        post_json_auth(app, "/api/v1/grievances", submission("long enough details"), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// The fourth submission inside an hour is rejected with 429; once the
/// earliest submission ages past the hour window, the cap clears.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submission_rate_limit(pool: PgPool) {
    let (tenant, _token) = common::seed_tenant(&pool, "Acme").await;
    let (identity, token) = common::seed_employee(&pool, tenant.id).await;

    for i in 0..3 {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            "/api/v1/grievances",
            submission(&format!("a perfectly reasonable complaint number {i}")),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK, "submission {i}");
    }

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/grievances",
        submission("one complaint too many this hour"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let json = body_json(response).await;
    assert_eq!(json["code"], "RATE_LIMITED");

    // Age the earliest grievance out of the trailing-hour window.
    sqlx::query(
        "UPDATE grievances SET created_at = now() - interval '61 minutes'
         WHERE id = (SELECT MIN(id) FROM grievances WHERE identity_id = $1)",
    )
    .bind(identity.id)
    .execute(&pool)
    .await
    .expect("backdate should succeed");

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/grievances",
        submission("the window has moved on since then"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// The caller's point total reflects accepted submissions.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_my_points(pool: PgPool) {
    let (tenant, _token) = common::seed_tenant(&pool, "Acme").await;
    let (identity, token) = common::seed_employee(&pool, tenant.id).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/grievances",
        submission(&"x".repeat(60)),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/me/points", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["identity_id"], identity.id);
    assert_eq!(json["total_points"], 15);
}
