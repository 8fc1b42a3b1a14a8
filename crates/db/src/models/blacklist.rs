//! Blacklist ledger entity model.

use keepsake_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `blacklist` table.
///
/// Presence of a row means sync must never re-import that host video.
/// Rows are written when an admin deletes a synced/uploaded video and
/// are permanent unless purged out of band.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlacklistEntry {
    pub host_video_id: String,
    pub deleted_at: Timestamp,
}
