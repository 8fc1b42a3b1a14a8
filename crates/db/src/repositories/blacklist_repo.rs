//! Repository for the `blacklist` suppression ledger.
//!
//! An entry keyed by host video id marks that video as intentionally
//! removed from the portal; the sync flow must never re-import it. The
//! host's own delete API is never called, so the ledger is the only
//! record of the removal.

use sqlx::PgPool;

use crate::models::blacklist::BlacklistEntry;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "host_video_id, deleted_at";

/// Provides suppression writes and reads.
pub struct BlacklistRepo;

impl BlacklistRepo {
    /// Record a suppression for the given host video id.
    ///
    /// Idempotent upsert: calling again refreshes `deleted_at` and is
    /// never an error. Callers deleting a video must invoke this before
    /// removing the video row, so a concurrent sync can never observe
    /// "record gone, not yet blacklisted".
    pub async fn suppress(
        pool: &PgPool,
        host_video_id: &str,
    ) -> Result<BlacklistEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO blacklist (host_video_id) VALUES ($1)
             ON CONFLICT (host_video_id) DO UPDATE SET deleted_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlacklistEntry>(&query)
            .bind(host_video_id)
            .fetch_one(pool)
            .await
    }

    /// True when the given host video id is suppressed.
    pub async fn is_suppressed(pool: &PgPool, host_video_id: &str) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM blacklist WHERE host_video_id = $1)")
                .bind(host_video_id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// Every suppressed host video id.
    ///
    /// The sync flow snapshots this once per run instead of probing
    /// per item.
    pub async fn all_suppressed(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT host_video_id FROM blacklist")
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Delete every ledger entry. Returns the count of deleted rows.
    pub async fn purge_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blacklist").execute(pool).await?;
        Ok(result.rows_affected())
    }
}
