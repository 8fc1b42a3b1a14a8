//! Handlers for the `/folders` resource.
//!
//! Folders are password-gated collections. Creating one requires a
//! non-empty password because folder membership waives the members' own
//! passwords; an unprotected folder would waive them for everyone.

use axum::extract::{Path, State};
use axum::http::header::{self, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use keepsake_core::access::{evaluate_folder, AccessDecision};
use keepsake_core::error::CoreError;
use keepsake_core::roles::Role;
use keepsake_core::types::{DbId, Timestamp};
use keepsake_db::models::folder::{CreateFolder, Folder};
use keepsake_db::repositories::FolderRepo;
use serde::{Deserialize, Serialize};

use crate::auth::session::{mint_session, session_cookie};
use crate::error::{AppError, AppResult};
use crate::middleware::session::{RequireAdmin, Session};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// A folder as exposed over the API. Guests never see the password.
#[derive(Debug, Serialize)]
pub struct FolderDto {
    pub id: DbId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub created_at: Timestamp,
}

impl FolderDto {
    fn from_folder(folder: Folder, role: Role) -> Self {
        FolderDto {
            id: folder.id,
            name: folder.name,
            password: role.is_admin().then_some(folder.password),
            created_at: folder.created_at,
        }
    }
}

/// Request body for `POST /folders`.
#[derive(Debug, Deserialize)]
pub struct CreateFolderRequest {
    pub name: String,
    pub password: String,
}

/// Request body for `POST /folders/{id}/unlock`.
#[derive(Debug, Deserialize)]
pub struct UnlockRequest {
    #[serde(default)]
    pub password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/folders
///
/// List all folders. Passwords appear only for admin sessions.
pub async fn list(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<DataResponse<Vec<FolderDto>>>> {
    let folders = FolderRepo::list_all(&state.pool).await?;

    let rows: Vec<FolderDto> = folders
        .into_iter()
        .map(|f| FolderDto::from_folder(f, session.role))
        .collect();

    Ok(Json(DataResponse::new(rows)))
}

/// POST /api/v1/folders
///
/// Create a folder. Returns 201 Created. Admin only.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Json(input): Json<CreateFolderRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<FolderDto>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    if input.password.is_empty() {
        return Err(AppError::BadRequest("password must not be empty".into()));
    }

    let folder = FolderRepo::create(
        &state.pool,
        &CreateFolder {
            name: input.name,
            password: input.password,
        },
    )
    .await?;

    tracing::info!(folder_id = folder.id, "Folder created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(FolderDto::from_folder(
            folder,
            session.role,
        ))),
    ))
}

/// POST /api/v1/folders/{id}/unlock
///
/// Run the admission rules for a folder. Always returns 200 with the
/// decision; an override code elevates the session like video unlock does.
pub async fn unlock(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<DbId>,
    Json(input): Json<UnlockRequest>,
) -> AppResult<Response> {
    let folder = FolderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Folder", id.to_string())))?;

    let decision: AccessDecision = evaluate_folder(
        &folder.password,
        &input.password,
        session.role,
        &state.config.access,
    );

    let mut response = Json(DataResponse::new(decision)).into_response();
    if decision.granted && decision.role.is_admin() && !session.role.is_admin() {
        let token = mint_session(Role::Admin, &state.config.session)
            .map_err(|e| AppError::InternalError(format!("Session token error: {e}")))?;
        let cookie = session_cookie(&token, &state.config.session);
        let value = HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::InternalError(format!("Cookie header error: {e}")))?;
        response.headers_mut().insert(header::SET_COOKIE, value);

        tracing::info!(folder_id = id, "Override code accepted; session elevated");
    }

    Ok(response)
}

/// DELETE /api/v1/folders/{id}
///
/// Delete a folder. Member videos revert to the gallery root (the schema
/// nulls their `folder_id`), unprotected and visible. Returns 204
/// No Content. Admin only.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_session): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = FolderRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Folder", id.to_string())));
    }

    tracing::info!(folder_id = id, "Folder deleted");
    Ok(StatusCode::NO_CONTENT)
}
