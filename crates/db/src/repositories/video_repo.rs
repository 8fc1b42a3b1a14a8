//! Repository for the `videos` table.

use keepsake_core::types::DbId;
use sqlx::PgPool;

use crate::models::video::{CreateVideo, Video};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "video_id, host_video_id, title, password, hidden, \
                       format, folder_id, created_at";

/// Provides CRUD operations for video records.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a new video record, returning the created row.
    ///
    /// `created_at` falls back to `now()` when the caller has no host
    /// publish timestamp to backdate to.
    pub async fn create(pool: &PgPool, input: &CreateVideo) -> Result<Video, sqlx::Error> {
        let query = format!(
            "INSERT INTO videos (video_id, host_video_id, title, password, format, created_at)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, NOW()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(&input.video_id)
            .bind(&input.host_video_id)
            .bind(&input.title)
            .bind(&input.password)
            .bind(&input.format)
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    /// All video records, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos ORDER BY created_at DESC");
        sqlx::query_as::<_, Video>(&query).fetch_all(pool).await
    }

    /// Look up one record by the portal's own identifier.
    pub async fn find_by_id(pool: &PgPool, video_id: &str) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE video_id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(video_id)
            .fetch_optional(pool)
            .await
    }

    /// True when a record already references the given host video,
    /// either as its `host_video_id` or as its own `video_id` (synced
    /// and uploaded records use the host id for both).
    pub async fn exists_by_host_id(pool: &PgPool, host_video_id: &str) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM videos WHERE host_video_id = $1 OR video_id = $1)",
        )
        .bind(host_video_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Replace the per-video password. Returns the updated row, or `None`
    /// if no record matches.
    pub async fn update_password(
        pool: &PgPool,
        video_id: &str,
        password: &str,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!(
            "UPDATE videos SET password = $2 WHERE video_id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(video_id)
            .bind(password)
            .fetch_optional(pool)
            .await
    }

    /// Set the admin-only visibility flag. Returns the updated row, or
    /// `None` if no record matches.
    pub async fn set_hidden(
        pool: &PgPool,
        video_id: &str,
        hidden: bool,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("UPDATE videos SET hidden = $2 WHERE video_id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Video>(&query)
            .bind(video_id)
            .bind(hidden)
            .fetch_optional(pool)
            .await
    }

    /// Move a record into a folder or back to gallery root.
    ///
    /// Entering a folder clears the per-video password and the hidden
    /// flag in the same row update: the folder password gates access
    /// from then on. Moving to root leaves both fields untouched.
    pub async fn move_to_folder(
        pool: &PgPool,
        video_id: &str,
        folder_id: Option<DbId>,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!(
            "UPDATE videos SET
                 folder_id = $2,
                 password = CASE WHEN $2 IS NULL THEN password ELSE '' END,
                 hidden = CASE WHEN $2 IS NULL THEN hidden ELSE FALSE END
             WHERE video_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(video_id)
            .bind(folder_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete one record. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, video_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM videos WHERE video_id = $1")
            .bind(video_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every video record. Returns the count of deleted rows.
    pub async fn purge_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM videos").execute(pool).await?;
        Ok(result.rows_affected())
    }
}
