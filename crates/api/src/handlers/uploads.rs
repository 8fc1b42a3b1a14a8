//! Handlers for the `/uploads` resource.
//!
//! Uploading is a two-phase handshake. `init` asks the host for a resumable
//! session URL; the browser then streams the file bytes straight to the
//! host, so they never pass through this server. Once the host finishes
//! processing, `save` records the published video in the gallery.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use keepsake_core::roles::Role;
use keepsake_host::publish::{begin_upload, save_published, SaveDraft};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::handlers::videos::VideoDto;
use crate::middleware::session::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /uploads/init`.
#[derive(Debug, Deserialize)]
pub struct InitUploadRequest {
    /// Title to register on the host; defaults there when absent.
    pub title: Option<String>,
}

/// Response body for `POST /uploads/init`.
#[derive(Debug, Serialize)]
pub struct InitUploadResponse {
    /// Host session URL the browser PUTs the file bytes to.
    pub upload_url: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/uploads/init
///
/// Open a resumable upload session on the host and hand the session URL
/// back to the browser. Admin only.
pub async fn init(
    State(state): State<AppState>,
    RequireAdmin(_session): RequireAdmin,
    Json(input): Json<InitUploadRequest>,
) -> AppResult<Json<DataResponse<InitUploadResponse>>> {
    let upload_url = begin_upload(&state.host, input.title.as_deref()).await?;

    tracing::info!("Resumable upload session opened");

    Ok(Json(DataResponse::new(InitUploadResponse { upload_url })))
}

/// POST /api/v1/uploads/save
///
/// Record a finished upload in the gallery. Returns 201 Created with the
/// stored row. Admin only.
pub async fn save(
    State(state): State<AppState>,
    RequireAdmin(_session): RequireAdmin,
    Json(draft): Json<SaveDraft>,
) -> AppResult<(StatusCode, Json<DataResponse<VideoDto>>)> {
    let video = save_published(&state.pool, draft).await?;

    tracing::info!(video_id = %video.video_id, "Uploaded video saved");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(VideoDto::from_video(video, Role::Admin))),
    ))
}
