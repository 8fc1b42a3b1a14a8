//! HTTP-level integration tests for operator login and session handling.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::{
    admin_token, body_json, get, get_auth, post_json, post_json_auth, TEST_OPERATOR_EMAIL,
    TEST_OPERATOR_PASSWORD,
};
use sqlx::PgPool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns the admin role and sets the session cookie.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_success_sets_session_cookie(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": TEST_OPERATOR_EMAIL,
        "password": TEST_OPERATOR_PASSWORD,
    });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login must set the session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("portal_session="));
    assert!(cookie.contains("HttpOnly"));

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["role"], "admin");
}

/// Login with a wrong password returns 401 and no cookie.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_wrong_password_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": TEST_OPERATOR_EMAIL,
        "password": "incorrect",
    });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

/// Login with an unknown email returns 401 even with the right password.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_wrong_email_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "somebody@else.example",
        "password": TEST_OPERATOR_PASSWORD,
    });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Session introspection
// ---------------------------------------------------------------------------

/// Without a token the session endpoint reports the guest role, not an error.
#[sqlx::test(migrations = "../db/migrations")]
async fn session_without_token_is_guest(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/auth/session").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "guest");
}

/// A Bearer admin token resolves to the admin role.
#[sqlx::test(migrations = "../db/migrations")]
async fn session_with_bearer_token_is_admin(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/auth/session", &admin_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "admin");
}

/// A garbage token quietly degrades to guest on the non-strict extractor.
#[sqlx::test(migrations = "../db/migrations")]
async fn session_with_invalid_token_is_guest(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/auth/session", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "guest");
}

/// The cookie minted by login authenticates subsequent requests.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_cookie_round_trips(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "email": TEST_OPERATOR_EMAIL,
        "password": TEST_OPERATOR_PASSWORD,
    });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Strip the attributes; the browser would send only name=value back.
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    let pair = set_cookie.split(';').next().unwrap().to_string();

    let app = common::build_test_app(pool);
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/auth/session")
        .header(header::COOKIE, pair)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "admin");
}

// ---------------------------------------------------------------------------
// Logout
// ---------------------------------------------------------------------------

/// Logout returns 204 and a cookie whose Max-Age is zero.
#[sqlx::test(migrations = "../db/migrations")]
async fn logout_clears_the_cookie(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/auth/logout", serde_json::json!({})).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("logout must clear the session cookie")
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("portal_session=;"));
    assert!(cookie.contains("Max-Age=0"));
}

// ---------------------------------------------------------------------------
// Admin gating
// ---------------------------------------------------------------------------

/// An admin-only route without any token is a 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn admin_route_without_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/uploads/init",
        serde_json::json!({ "title": "x" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

/// An admin-only route with a garbage token is a 401, not a silent guest.
#[sqlx::test(migrations = "../db/migrations")]
async fn admin_route_with_invalid_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/uploads/init",
        serde_json::json!({ "title": "x" }),
        "not-a-jwt",
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
