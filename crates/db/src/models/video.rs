//! Video entity model and DTOs.

use keepsake_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Well-known `format` values. The column carries a CHECK constraint
/// matching these, so new values need a migration.
pub mod format {
    /// Lives on the external video host; played through its embed player.
    pub const HOSTED: &str = "hosted";
    /// Anything else (external link, legacy import).
    pub const OTHER: &str = "other";
}

/// A row from the `videos` table.
///
/// `video_id` is the portal's own identifier and usually coincides with
/// the host's id for uploaded/synced videos. `password` is a plaintext
/// shared secret; empty means unprotected.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Video {
    pub video_id: String,
    pub host_video_id: Option<String>,
    pub title: String,
    pub password: String,
    pub hidden: bool,
    pub format: String,
    pub folder_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for creating a video record.
///
/// New records always start visible and at gallery root; `created_at`
/// may be backdated to the host's publish timestamp by the sync flow.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideo {
    pub video_id: String,
    pub host_video_id: Option<String>,
    pub title: String,
    pub password: String,
    pub format: String,
    pub created_at: Option<Timestamp>,
}
