//! Shared helpers for HTTP-level integration tests.
//!
//! Tests drive the full router through `tower::ServiceExt::oneshot`, so the
//! whole middleware stack (CORS, request id, timeout, panic recovery,
//! compression) sits between the test and the handler, exactly as in
//! production. `oneshot` consumes the router, so tests rebuild the app per
//! request with `build_test_app(pool.clone())`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use keepsake_api::auth::session::{mint_session, SessionConfig};
use keepsake_api::config::{OperatorConfig, PaymentConfig, RazorpayConfig, ServerConfig};
use keepsake_api::router::build_app_router;
use keepsake_api::state::AppState;
use keepsake_core::access::AccessPolicy;
use keepsake_core::roles::Role;
use keepsake_host::{HostClient, HostConfig};

/// Secret the primary payment gateway signs callbacks with in tests.
pub const TEST_RAZORPAY_SECRET: &str = "rzp-test-secret";

/// Operator credential accepted by the test login endpoint.
pub const TEST_OPERATOR_EMAIL: &str = "operator@example.com";
pub const TEST_OPERATOR_PASSWORD: &str = "operator-pass-123";

/// Override codes the test access policy accepts.
pub const TEST_OVERRIDE_CODES: [&str; 2] = ["skeleton-key-1", "skeleton-key-2"];

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout, and fixed credentials the tests can assert
/// against. The alternative payment gateway is left unconfigured so its
/// endpoint reports that state.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session: SessionConfig {
            secret: "test-session-secret-0123456789abcdef".to_string(),
            expiry_days: 7,
            cookie_secure: false,
        },
        operator: OperatorConfig {
            email: TEST_OPERATOR_EMAIL.to_string(),
            password: TEST_OPERATOR_PASSWORD.to_string(),
        },
        access: AccessPolicy::new(
            TEST_OVERRIDE_CODES.iter().map(|c| c.to_string()).collect(),
            "gallery2026".to_string(),
        ),
        payments: PaymentConfig {
            amount_inr: 400,
            razorpay: Some(RazorpayConfig {
                key_id: "rzp_test_key".to_string(),
                key_secret: TEST_RAZORPAY_SECRET.to_string(),
                // Nothing listens here; order tests exercise the failure path.
                api_url: "http://127.0.0.1:9/razorpay/v1".to_string(),
            }),
            phonepe: None,
        },
    }
}

/// Host configuration pointing at unroutable local endpoints. Tests never
/// talk to the real host; flows that would are covered by the host crate's
/// own tests against fake sources.
fn test_host_config() -> HostConfig {
    HostConfig {
        client_id: "test-client-id".to_string(),
        client_secret: "test-client-secret".to_string(),
        refresh_token: Some("test-refresh-token".to_string()),
        redirect_uri: "http://localhost:3000/api/v1/host/callback".to_string(),
        api_url: "http://127.0.0.1:9/host".to_string(),
        upload_url: "http://127.0.0.1:9/host-upload".to_string(),
        token_url: "http://127.0.0.1:9/host-token".to_string(),
        auth_url: "http://127.0.0.1:9/host-auth".to_string(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and the default test configuration.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_config(pool, test_config())
}

/// Build the application router with a caller-supplied configuration, for
/// tests that need a provider enabled or disabled.
pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        host: Arc::new(HostClient::new(test_host_config())),
        http: reqwest::Client::new(),
        mailer: None,
    };

    build_app_router(state, &config)
}

/// Mint a valid admin session token against the test session secret.
pub fn admin_token() -> String {
    mint_session(Role::Admin, &test_config().session).expect("minting should succeed")
}

/// Mint a valid but non-admin session token, for 403 assertions.
pub fn guest_token() -> String {
    mint_session(Role::Guest, &test_config().session).expect("minting should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a Bearer session token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and a Bearer session token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a PATCH request with a JSON body and a Bearer session token.
pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::PATCH)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE request with a Bearer session token.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
