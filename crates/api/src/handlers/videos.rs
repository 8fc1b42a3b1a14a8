//! Handlers for the `/videos` resource.
//!
//! Listing serves guests and the operator alike; guests see visible videos
//! with passwords redacted, the operator sees everything. Unlocking runs the
//! admission rules from `keepsake_core::access` and elevates the session
//! when an override code matches. Mutations require an admin session.
//!
//! Deleting a hosted video records its host id in the blacklist *before*
//! removing the row, so a concurrent sync pass can never resurrect it.

use axum::extract::{Path, State};
use axum::http::header::{self, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use keepsake_core::access::{evaluate_video, AccessDecision, VideoTarget};
use keepsake_core::error::CoreError;
use keepsake_core::roles::Role;
use keepsake_core::types::{DbId, Timestamp};
use keepsake_db::models::video::Video;
use keepsake_db::repositories::{BlacklistRepo, FolderRepo, VideoRepo};
use serde::{Deserialize, Serialize};

use crate::auth::session::{mint_session, session_cookie};
use crate::error::{AppError, AppResult};
use crate::middleware::session::{RequireAdmin, Session};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// A video as exposed over the API.
///
/// The stored password only appears for admin sessions; guests get the
/// `has_password` flag so the frontend knows to show a prompt.
#[derive(Debug, Serialize)]
pub struct VideoDto {
    pub video_id: String,
    pub host_video_id: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub has_password: bool,
    pub hidden: bool,
    pub format: String,
    pub folder_id: Option<DbId>,
    pub created_at: Timestamp,
}

impl VideoDto {
    /// Project a row for the given role, redacting the password for guests.
    pub(crate) fn from_video(video: Video, role: Role) -> Self {
        let has_password = !video.password.is_empty();
        VideoDto {
            video_id: video.video_id,
            host_video_id: video.host_video_id,
            title: video.title,
            password: role.is_admin().then_some(video.password),
            has_password,
            hidden: video.hidden,
            format: video.format,
            folder_id: video.folder_id,
            created_at: video.created_at,
        }
    }
}

/// Request body for `POST /videos/{id}/unlock`.
#[derive(Debug, Deserialize)]
pub struct UnlockRequest {
    /// Supplied secret; absent is treated as the empty string.
    #[serde(default)]
    pub password: String,
}

/// Request body for `PATCH /videos/{id}/password`.
#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    /// New stored password; empty clears the protection.
    pub password: String,
}

/// Request body for `PATCH /videos/{id}/visibility`.
#[derive(Debug, Deserialize)]
pub struct UpdateVisibilityRequest {
    pub hidden: bool,
}

/// Request body for `PATCH /videos/{id}/folder`.
#[derive(Debug, Deserialize)]
pub struct MoveFolderRequest {
    /// Destination folder, or `null` to move back to the gallery root.
    pub folder_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/videos
///
/// List the gallery. Guests see visible videos with passwords redacted;
/// admin sessions see hidden videos and stored passwords too.
pub async fn list(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<DataResponse<Vec<VideoDto>>>> {
    let videos = VideoRepo::list_all(&state.pool).await?;

    let rows: Vec<VideoDto> = videos
        .into_iter()
        .filter(|v| session.role.is_admin() || !v.hidden)
        .map(|v| VideoDto::from_video(v, session.role))
        .collect();

    Ok(Json(DataResponse::new(rows)))
}

/// POST /api/v1/videos/{id}/unlock
///
/// Run the admission rules for one video. Always returns 200 with the
/// decision; a matching override code elevates the session by setting a
/// fresh admin cookie alongside the grant.
pub async fn unlock(
    State(state): State<AppState>,
    session: Session,
    Path(video_id): Path<String>,
    Json(input): Json<UnlockRequest>,
) -> AppResult<Response> {
    // 1. Load the record; unknown ids are a 404, not a denial.
    let video = VideoRepo::find_by_id(&state.pool, &video_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Video", video_id.clone())))?;

    // 2. Evaluate the admission rules.
    let decision: AccessDecision = evaluate_video(
        VideoTarget {
            password: &video.password,
            folder_id: video.folder_id,
        },
        &input.password,
        session.role,
        &state.config.access,
    );

    // 3. An override grant on a guest session persists as an admin cookie.
    let mut response = Json(DataResponse::new(decision)).into_response();
    if decision.granted && decision.role.is_admin() && !session.role.is_admin() {
        let token = mint_session(Role::Admin, &state.config.session)
            .map_err(|e| AppError::InternalError(format!("Session token error: {e}")))?;
        let cookie = session_cookie(&token, &state.config.session);
        let value = HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::InternalError(format!("Cookie header error: {e}")))?;
        response.headers_mut().insert(header::SET_COOKIE, value);

        tracing::info!(video_id = %video_id, "Override code accepted; session elevated");
    }

    Ok(response)
}

/// PATCH /api/v1/videos/{id}/password
///
/// Set or clear a video's password. Admin only.
pub async fn update_password(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Path(video_id): Path<String>,
    Json(input): Json<UpdatePasswordRequest>,
) -> AppResult<Json<DataResponse<VideoDto>>> {
    let video = VideoRepo::update_password(&state.pool, &video_id, &input.password)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Video", video_id.clone())))?;

    Ok(Json(DataResponse::new(VideoDto::from_video(
        video,
        session.role,
    ))))
}

/// PATCH /api/v1/videos/{id}/visibility
///
/// Set a video's hidden flag to an explicit value. Admin only.
pub async fn update_visibility(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Path(video_id): Path<String>,
    Json(input): Json<UpdateVisibilityRequest>,
) -> AppResult<Json<DataResponse<VideoDto>>> {
    let video = VideoRepo::set_hidden(&state.pool, &video_id, input.hidden)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Video", video_id.clone())))?;

    Ok(Json(DataResponse::new(VideoDto::from_video(
        video,
        session.role,
    ))))
}

/// PATCH /api/v1/videos/{id}/folder
///
/// Move a video into a folder or back to the gallery root. Moving into a
/// folder clears the video's own password and hidden flag in the same
/// update, since the folder password now gates it. Admin only.
pub async fn move_folder(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Path(video_id): Path<String>,
    Json(input): Json<MoveFolderRequest>,
) -> AppResult<Json<DataResponse<VideoDto>>> {
    // 1. A destination folder must exist. Checked up front so the caller
    //    gets a 404 instead of a foreign-key violation.
    if let Some(folder_id) = input.folder_id {
        FolderRepo::find_by_id(&state.pool, folder_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::not_found("Folder", folder_id.to_string()))
            })?;
    }

    // 2. Apply the move.
    let video = VideoRepo::move_to_folder(&state.pool, &video_id, input.folder_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Video", video_id.clone())))?;

    Ok(Json(DataResponse::new(VideoDto::from_video(
        video,
        session.role,
    ))))
}

/// DELETE /api/v1/videos/{id}
///
/// Delete a video. Hosted videos are blacklisted first so the next sync
/// pass cannot re-import them. Returns 204 No Content. Admin only.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_session): RequireAdmin,
    Path(video_id): Path<String>,
) -> AppResult<StatusCode> {
    // 1. Load the row to learn its host id.
    let video = VideoRepo::find_by_id(&state.pool, &video_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Video", video_id.clone())))?;

    // 2. Suppress before deleting. If the delete below fails the worst
    //    case is a stale blacklist entry, never a resurrected video.
    if let Some(host_video_id) = &video.host_video_id {
        BlacklistRepo::suppress(&state.pool, host_video_id).await?;
    }

    // 3. Delete the row.
    let deleted = VideoRepo::delete(&state.pool, &video_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Video", video_id)));
    }

    tracing::info!(video_id = %video_id, "Video deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/videos
///
/// Purge the whole gallery: every video, folder, and blacklist entry.
/// The next sync pass re-imports whatever is still live on the host.
/// Returns 204 No Content. Admin only.
pub async fn purge(
    State(state): State<AppState>,
    RequireAdmin(_session): RequireAdmin,
) -> AppResult<StatusCode> {
    let videos = VideoRepo::purge_all(&state.pool).await?;
    let folders = FolderRepo::purge_all(&state.pool).await?;
    let blacklist = BlacklistRepo::purge_all(&state.pool).await?;

    tracing::info!(videos, folders, blacklist, "Gallery purged");
    Ok(StatusCode::NO_CONTENT)
}
