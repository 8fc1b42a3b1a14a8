//! Repository for the `folders` table.

use keepsake_core::types::DbId;
use sqlx::PgPool;

use crate::models::folder::{CreateFolder, Folder};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, password, created_at";

/// Provides CRUD operations for folders.
pub struct FolderRepo;

impl FolderRepo {
    /// Insert a new folder, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFolder) -> Result<Folder, sqlx::Error> {
        let query = format!(
            "INSERT INTO folders (name, password) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Folder>(&query)
            .bind(&input.name)
            .bind(&input.password)
            .fetch_one(pool)
            .await
    }

    /// All folders, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Folder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM folders ORDER BY created_at DESC");
        sqlx::query_as::<_, Folder>(&query).fetch_all(pool).await
    }

    /// Look up one folder by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Folder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM folders WHERE id = $1");
        sqlx::query_as::<_, Folder>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete one folder. Returns `true` if a row was removed.
    ///
    /// Member videos fall back to gallery root via the foreign key's
    /// `ON DELETE SET NULL`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every folder. Returns the count of deleted rows.
    pub async fn purge_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM folders").execute(pool).await?;
        Ok(result.rows_affected())
    }
}
