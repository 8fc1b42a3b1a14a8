//! Sync reconciler: imports the host's unlisted uploads into the
//! metadata store without duplicating or resurrecting records.
//!
//! One pass is a single unit of work triggered by the operator; there
//! is no background timer. Any listing, detail, or store error aborts
//! the whole pass as a failure with no partial-success accounting.

use std::collections::HashSet;

use keepsake_db::models::video::{format, CreateVideo};
use keepsake_db::repositories::{BlacklistRepo, VideoRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::client::{VideoSource, PRIVACY_UNLISTED};
use crate::error::FlowError;

/// How many recent uploads one pass examines.
pub const SYNC_PAGE_SIZE: u32 = 50;

/// Title given to imports whose snippet carries none.
const FALLBACK_TITLE: &str = "Synced Video";

/// Outcome of one reconciler pass.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SyncReport {
    /// Detailed videos examined.
    pub scanned: usize,
    /// New records inserted.
    pub added: usize,
}

/// Reconcile the host's recent uploads into the store.
///
/// In listing order, each detailed video is skipped when it is
/// suppressed, when its privacy status is anything but exactly
/// `unlisted` (a strict allow-list, never a block-list), or when a
/// record for it already exists; otherwise it is inserted with the
/// configured default password and the host's publish timestamp.
pub async fn run_sync(
    pool: &PgPool,
    source: &dyn VideoSource,
    default_password: &str,
) -> Result<SyncReport, FlowError> {
    let uploads = source.list_recent_uploads(SYNC_PAGE_SIZE).await?;
    let ids: Vec<String> = uploads.into_iter().map(|u| u.id).collect();
    if ids.is_empty() {
        tracing::info!("Nothing to sync; uploads listing is empty");
        return Ok(SyncReport {
            scanned: 0,
            added: 0,
        });
    }

    // The playlist listing's status field may be stale or absent; the
    // detail endpoint is the source of truth for privacy.
    let detailed = source.video_details(&ids).await?;

    // One ledger snapshot for the whole pass. A suppression written
    // mid-pass can be missed; a later pass squares that away.
    let suppressed: HashSet<String> = BlacklistRepo::all_suppressed(pool)
        .await?
        .into_iter()
        .collect();

    let scanned = detailed.len();
    let mut added = 0usize;

    for video in detailed {
        if suppressed.contains(&video.id) {
            if VideoRepo::exists_by_host_id(pool, &video.id).await? {
                // A delete raced an earlier pass: the record was
                // re-imported after its suppression. Deleting it again
                // clears it for good.
                tracing::warn!(
                    host_video_id = %video.id,
                    "Suppressed video still has a store record"
                );
            }
            continue;
        }

        if video.privacy_status.as_deref() != Some(PRIVACY_UNLISTED) {
            continue;
        }

        if VideoRepo::exists_by_host_id(pool, &video.id).await? {
            continue;
        }

        let input = CreateVideo {
            video_id: video.id.clone(),
            host_video_id: Some(video.id.clone()),
            title: video
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| FALLBACK_TITLE.to_string()),
            password: default_password.to_string(),
            format: format::HOSTED.to_string(),
            created_at: video.published_at,
        };
        VideoRepo::create(pool, &input).await?;
        added += 1;
        tracing::debug!(host_video_id = %video.id, "Imported unlisted video");
    }

    tracing::info!(scanned, added, "Sync complete");
    Ok(SyncReport { scanned, added })
}
