//! HTTP-level integration tests for the `/payments` resource. The
//! signature check runs entirely server-side, so it gets real coverage;
//! the gateway calls are exercised only on their failure paths (nothing
//! listens on the configured endpoints).

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json, TEST_RAZORPAY_SECRET};
use keepsake_core::payment::payment_signature;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Verify
// ---------------------------------------------------------------------------

/// A signature computed with the configured secret verifies.
#[sqlx::test(migrations = "../db/migrations")]
async fn verify_accepts_gateway_signature(pool: PgPool) {
    let signature = payment_signature(TEST_RAZORPAY_SECRET, "order_123", "pay_456");

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/payments/verify",
        serde_json::json!({
            "order_id": "order_123",
            "payment_id": "pay_456",
            "signature": signature,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["verified"], true);
    assert_eq!(json["data"]["message"], "Payment Verified");
}

/// A tampered signature is a hard 400, never a soft false.
#[sqlx::test(migrations = "../db/migrations")]
async fn verify_rejects_tampered_signature(pool: PgPool) {
    let mut signature = payment_signature(TEST_RAZORPAY_SECRET, "order_123", "pay_456");
    signature.push('0');

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/payments/verify",
        serde_json::json!({
            "order_id": "order_123",
            "payment_id": "pay_456",
            "signature": signature,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "Invalid Signature");
}

/// A signature for a different payment does not transfer.
#[sqlx::test(migrations = "../db/migrations")]
async fn verify_rejects_signature_for_other_payment(pool: PgPool) {
    let signature = payment_signature(TEST_RAZORPAY_SECRET, "order_123", "pay_456");

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/payments/verify",
        serde_json::json!({
            "order_id": "order_123",
            "payment_id": "pay_999",
            "signature": signature,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Unconfigured / unreachable gateways
// ---------------------------------------------------------------------------

/// Without gateway credentials the order endpoint fails cleanly.
#[sqlx::test(migrations = "../db/migrations")]
async fn orders_without_razorpay_config_is_internal_error(pool: PgPool) {
    let mut config = common::test_config();
    config.payments.razorpay = None;

    let app = common::build_test_app_with_config(pool, config);
    let response = post_json(app, "/api/v1/payments/orders", serde_json::json!({})).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

/// An unreachable gateway surfaces as a sanitized 500, not a hang.
#[sqlx::test(migrations = "../db/migrations")]
async fn orders_with_unreachable_gateway_is_internal_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/payments/orders", serde_json::json!({})).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
}

/// The alternative gateway is optional; checkout reports when it is off.
#[sqlx::test(migrations = "../db/migrations")]
async fn checkout_without_phonepe_config_is_internal_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/payments/checkout", serde_json::json!({})).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
}

/// Verify also needs the gateway secret to be configured.
#[sqlx::test(migrations = "../db/migrations")]
async fn verify_without_razorpay_config_is_internal_error(pool: PgPool) {
    let mut config = common::test_config();
    config.payments.razorpay = None;

    let app = common::build_test_app_with_config(pool, config);
    let response = post_json(
        app,
        "/api/v1/payments/verify",
        serde_json::json!({
            "order_id": "order_123",
            "payment_id": "pay_456",
            "signature": "deadbeef",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
