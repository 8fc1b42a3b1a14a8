//! HTTP-level integration tests for the `/folders` resource: creation
//! rules, role-dependent projection, admission checks, and deletion.

mod common;

use axum::http::{header, StatusCode};
use common::{
    admin_token, body_json, delete_auth, get, get_auth, guest_token, patch_json_auth, post_json,
    post_json_auth,
};
use keepsake_db::models::folder::{CreateFolder, Folder};
use keepsake_db::models::video::{format, CreateVideo};
use keepsake_db::repositories::{FolderRepo, VideoRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Insert a folder row directly, bypassing the API.
async fn seed_folder(pool: &PgPool, name: &str, password: &str) -> Folder {
    FolderRepo::create(
        pool,
        &CreateFolder {
            name: name.to_string(),
            password: password.to_string(),
        },
    )
    .await
    .expect("seeding should succeed")
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// An admin can create a folder and gets the full row back.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_folder_returns_created(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/folders",
        serde_json::json!({ "name": "Receptions", "password": "velvet" }),
        &admin_token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["name"], "Receptions");
    assert_eq!(json["data"]["password"], "velvet");

    let folders = FolderRepo::list_all(&pool).await.unwrap();
    assert_eq!(folders.len(), 1);
}

/// A blank name is rejected before touching the database.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_folder_with_blank_name_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/folders",
        serde_json::json!({ "name": "   ", "password": "velvet" }),
        &admin_token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "name must not be empty");
    assert!(FolderRepo::list_all(&pool).await.unwrap().is_empty());
}

/// Folders must carry a password; membership waives the members' own ones.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_folder_without_password_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/folders",
        serde_json::json!({ "name": "Receptions", "password": "" }),
        &admin_token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "password must not be empty");
}

/// Guests cannot create folders.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_folder_requires_admin(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/folders",
        serde_json::json!({ "name": "Receptions", "password": "velvet" }),
        &guest_token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(FolderRepo::list_all(&pool).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Guests see folders but never their passwords.
#[sqlx::test(migrations = "../db/migrations")]
async fn guest_listing_redacts_passwords(pool: PgPool) {
    seed_folder(&pool, "Receptions", "velvet").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/folders").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Receptions");
    assert!(rows[0].get("password").is_none());
}

/// Admins see the stored password in every row.
#[sqlx::test(migrations = "../db/migrations")]
async fn admin_listing_includes_passwords(pool: PgPool) {
    seed_folder(&pool, "Receptions", "velvet").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/folders", &admin_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["password"], "velvet");
}

// ---------------------------------------------------------------------------
// Unlock
// ---------------------------------------------------------------------------

/// A wrong password is a decision, not an error.
#[sqlx::test(migrations = "../db/migrations")]
async fn unlock_with_wrong_password_is_denied(pool: PgPool) {
    let folder = seed_folder(&pool, "Receptions", "velvet").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/folders/{}/unlock", folder.id),
        serde_json::json!({ "password": "corduroy" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["granted"], false);
}

/// The stored password admits a guest.
#[sqlx::test(migrations = "../db/migrations")]
async fn unlock_with_correct_password_grants_guest(pool: PgPool) {
    let folder = seed_folder(&pool, "Receptions", "velvet").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/folders/{}/unlock", folder.id),
        serde_json::json!({ "password": "velvet" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let json = body_json(response).await;
    assert_eq!(json["data"]["granted"], true);
    assert_eq!(json["data"]["role"], "guest");
}

/// An override code admits the caller and upgrades the session cookie.
#[sqlx::test(migrations = "../db/migrations")]
async fn unlock_with_override_code_elevates_session(pool: PgPool) {
    let folder = seed_folder(&pool, "Receptions", "velvet").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/folders/{}/unlock", folder.id),
        serde_json::json!({ "password": "skeleton-key-1" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("override should set a session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("portal_session="));

    let json = body_json(response).await;
    assert_eq!(json["data"]["granted"], true);
    assert_eq!(json["data"]["role"], "admin");
}

/// Unlocking a missing folder is a 404, not a denial.
#[sqlx::test(migrations = "../db/migrations")]
async fn unlock_unknown_folder_is_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/folders/4242/unlock",
        serde_json::json!({ "password": "velvet" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

/// Deleting a folder sends its members back to the gallery root.
#[sqlx::test(migrations = "../db/migrations")]
async fn delete_folder_reverts_members_to_root(pool: PgPool) {
    let folder = seed_folder(&pool, "Receptions", "velvet").await;
    let video = VideoRepo::create(
        &pool,
        &CreateVideo {
            video_id: "vid-1".to_string(),
            host_video_id: Some("vid-1".to_string()),
            title: "Video vid-1".to_string(),
            password: "tulle".to_string(),
            format: format::HOSTED.to_string(),
            created_at: None,
        },
    )
    .await
    .unwrap();

    // Move the video in through the API so the membership side effects
    // (password and visibility cleared) apply.
    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/api/v1/videos/{}/folder", video.video_id),
        serde_json::json!({ "folder_id": folder.id }),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(
        app,
        &format!("/api/v1/folders/{}", folder.id),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let orphan = VideoRepo::find_by_id(&pool, "vid-1").await.unwrap().unwrap();
    assert_eq!(orphan.folder_id, None);
    assert_eq!(orphan.password, "");
    assert!(!orphan.hidden);
    assert!(FolderRepo::list_all(&pool).await.unwrap().is_empty());
}

/// Deleting a missing folder is a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn delete_unknown_folder_is_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = delete_auth(app, "/api/v1/folders/4242", &admin_token()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Guests cannot delete folders.
#[sqlx::test(migrations = "../db/migrations")]
async fn delete_folder_requires_admin(pool: PgPool) {
    let folder = seed_folder(&pool, "Receptions", "velvet").await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(
        app,
        &format!("/api/v1/folders/{}", folder.id),
        &guest_token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(FolderRepo::list_all(&pool).await.unwrap().len(), 1);
}
