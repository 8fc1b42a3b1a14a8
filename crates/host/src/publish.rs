//! Publish flow: the server-side phases of getting a new video live.
//!
//! Phase 1 (init) creates a resumable session on the host and hands the
//! session URL back to the uploading browser. Phase 2, the byte
//! transfer, happens entirely between the browser and that URL; the
//! server never proxies video bytes. Phase 3 (save) records the
//! host-assigned id in the metadata store once the browser reports it.
//!
//! There is no retry machinery: a failed phase means the caller starts
//! over from init. An abandoned session (tab closed mid-transfer) is an
//! accepted orphan on the host side.

use keepsake_core::error::CoreError;
use keepsake_db::models::video::{format, CreateVideo, Video};
use keepsake_db::repositories::VideoRepo;
use serde::Deserialize;
use sqlx::PgPool;

use crate::client::HostClient;
use crate::error::{FlowError, HostError};

/// Title used when the uploader left the field blank at init.
const DEFAULT_UPLOAD_TITLE: &str = "Wedding Video";

/// Title used when the save phase reports none.
const DEFAULT_SAVE_TITLE: &str = "Untitled Video";

/// What the browser reports back after a completed transfer.
///
/// `password` left empty or absent stores an unprotected record; the
/// save phase never injects the sync default.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveDraft {
    /// Host-assigned video id.
    pub id: String,
    pub title: Option<String>,
    pub password: Option<String>,
}

/// Phase 1: create an upload session for a title and return its URL.
pub async fn begin_upload(client: &HostClient, title: Option<&str>) -> Result<String, HostError> {
    let title = match title.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => DEFAULT_UPLOAD_TITLE,
    };
    let session_url = client.init_resumable_upload(title).await?;
    tracing::info!(title, "Opened resumable upload session");
    Ok(session_url)
}

/// Phase 3: persist the metadata for a transferred video.
///
/// The host id doubles as the portal's own `video_id`. Saving an id
/// twice is a conflict; the first record wins.
pub async fn save_published(pool: &PgPool, draft: SaveDraft) -> Result<Video, FlowError> {
    let id = draft.id.trim();
    if id.is_empty() {
        return Err(CoreError::Validation("Video ID required".into()).into());
    }

    if VideoRepo::find_by_id(pool, id).await?.is_some() {
        return Err(CoreError::Conflict(format!("video '{id}' is already saved")).into());
    }

    let input = CreateVideo {
        video_id: id.to_string(),
        host_video_id: Some(id.to_string()),
        title: draft
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_SAVE_TITLE.to_string()),
        password: draft.password.unwrap_or_default(),
        format: format::HOSTED.to_string(),
        created_at: None,
    };

    let video = VideoRepo::create(pool, &input).await?;
    tracing::info!(video_id = %video.video_id, "Saved published video");
    Ok(video)
}
