//! HTTP-level integration tests for the payment webhook reconciler.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json};
use sqlx::PgPool;
use voicebox_db::repositories::{PurchaseRepo, SubscriptionRepo};

fn capture_event(transaction_id: &str, tenant_id: i64, manager_id: i64) -> serde_json::Value {
    serde_json::json!({
        "event_type": "PAYMENT.CAPTURE.COMPLETED",
        "resource": {
            "id": transaction_id,
            "custom": format!(
                r#"{{"company_id": {tenant_id}, "manager_id": {manager_id}, "report_type": "stress"}}"#
            ),
            "amount": { "value": "49.99" }
        }
    })
}

/// A completed capture records a report purchase; replaying the same event
/// leaves exactly one row.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_capture_recorded_once(pool: PgPool) {
    let (tenant, _token) = common::seed_tenant(&pool, "Acme").await;
    let (manager, _token) =
        common::seed_manager(&pool, tenant.id, "manager@acme.test", "a-strong-password").await;

    for _ in 0..2 {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            "/api/v1/webhooks/payments",
            capture_event("TXN-100", tenant.id, manager.id),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["received"], true);
    }

    let purchases = PurchaseRepo::list_for_tenant(&pool, tenant.id)
        .await
        .expect("list should succeed");
    assert_eq!(purchases.len(), 1, "replay must not create a second row");
    assert_eq!(purchases[0].provider_transaction_id, "TXN-100");
    assert_eq!(purchases[0].report_type, "stress");
    assert_eq!(purchases[0].amount, 49.99);
}

/// A capture whose correlation metadata is not valid JSON rejects with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_capture_malformed_metadata(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "event_type": "PAYMENT.CAPTURE.COMPLETED",
        "resource": { "id": "TXN-101", "custom": "not json at all" }
    });
    let response = post_json(app, "/api/v1/webhooks/payments", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_PAYLOAD");
}

/// Activation upserts a single active subscription row; a later
/// cancellation flips it to canceled without adding rows.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_subscription_lifecycle(pool: PgPool) {
    let (tenant, _token) = common::seed_tenant(&pool, "Acme").await;

    let activate = serde_json::json!({
        "event_type": "BILLING.SUBSCRIPTION.ACTIVATED",
        "resource": { "id": "SUB-1", "custom_id": tenant.id.to_string() }
    });
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/webhooks/payments", activate.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);

    assert!(SubscriptionRepo::is_active(&pool, tenant.id)
        .await
        .expect("lookup should succeed"));

    // A repeated activation keeps the single row per tenant.
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/webhooks/payments", activate).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cancel = serde_json::json!({
        "event_type": "BILLING.SUBSCRIPTION.CANCELLED",
        "resource": { "id": "SUB-1" }
    });
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/webhooks/payments", cancel).await;
    assert_eq!(response.status(), StatusCode::OK);

    let subscription = SubscriptionRepo::find_by_tenant(&pool, tenant.id)
        .await
        .expect("lookup should succeed")
        .expect("subscription row must exist");
    assert_eq!(subscription.status, "canceled");
    assert!(!SubscriptionRepo::is_active(&pool, tenant.id)
        .await
        .expect("lookup should succeed"));
}

/// Activation metadata may arrive as a JSON-wrapped tenant id.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_subscription_activation_json_metadata(pool: PgPool) {
    let (tenant, _token) = common::seed_tenant(&pool, "Acme").await;

    let body = serde_json::json!({
        "event_type": "BILLING.SUBSCRIPTION.UPDATED",
        "resource": {
            "id": "SUB-2",
            "custom_id": format!(r#"{{"company_id": {}}}"#, tenant.id)
        }
    });
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/webhooks/payments", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let subscription = SubscriptionRepo::find_by_tenant(&pool, tenant.id)
        .await
        .expect("lookup should succeed")
        .expect("subscription row must exist");
    assert_eq!(subscription.provider_subscription_id, "SUB-2");
    assert_eq!(subscription.status, "active");
}

/// Cancelling a subscription we never saw is acknowledged without error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_cancel_unknown_subscription(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "event_type": "BILLING.SUBSCRIPTION.CANCELLED",
        "resource": { "id": "SUB-UNKNOWN" }
    });
    let response = post_json(app, "/api/v1/webhooks/payments", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["received"], true);
}

/// Unknown event types are acknowledged and leave the store untouched.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_event_acknowledged(pool: PgPool) {
    let (tenant, _token) = common::seed_tenant(&pool, "Acme").await;

    let body = serde_json::json!({
        "event_type": "CHECKOUT.ORDER.APPROVED",
        "resource": { "id": "ORD-1" }
    });
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/webhooks/payments", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let purchases = PurchaseRepo::list_for_tenant(&pool, tenant.id)
        .await
        .expect("list should succeed");
    assert!(purchases.is_empty());
    assert!(SubscriptionRepo::find_by_tenant(&pool, tenant.id)
        .await
        .expect("lookup should succeed")
        .is_none());
}
