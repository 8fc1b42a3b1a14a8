//! Folder entity model and DTOs.

use keepsake_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `folders` table.
///
/// Folders are a single flat level under the gallery root and always
/// carry a non-empty password.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Folder {
    pub id: DbId,
    pub name: String,
    pub password: String,
    pub created_at: Timestamp,
}

/// DTO for creating a folder.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFolder {
    pub name: String,
    pub password: String,
}
