//! Handlers for the `/host` resource: one-time OAuth bootstrap.
//!
//! The portal acts as a single pre-authorized host account. These two
//! routes exist to mint that account's long-lived refresh token once:
//! `authorize` bounces the operator to the host's consent page, and
//! `callback` trades the returned code for tokens and displays the
//! refresh token so it can be copied into the server environment.

use axum::extract::{Query, State};
use axum::response::Redirect;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::session::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /host/callback`.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    /// Authorization code returned by the consent page.
    pub code: Option<String>,
    /// Error indicator returned when the operator declined consent.
    pub error: Option<String>,
}

/// Response body for `GET /host/callback`.
#[derive(Debug, Serialize)]
pub struct GrantResponse {
    /// Long-lived token to copy into `HOST_REFRESH_TOKEN`.
    pub refresh_token: Option<String>,
    /// Short-lived access token, shown for completeness.
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/host/authorize
///
/// Redirect the operator to the host's OAuth consent page. Admin only.
pub async fn authorize(
    State(state): State<AppState>,
    RequireAdmin(_session): RequireAdmin,
) -> Redirect {
    Redirect::temporary(&state.host.consent_url())
}

/// GET /api/v1/host/callback
///
/// Exchange the consent code for tokens and display them. The refresh
/// token is shown exactly once; it is never persisted server-side.
pub async fn callback(
    State(state): State<AppState>,
    RequireAdmin(_session): RequireAdmin,
    Query(params): Query<CallbackParams>,
) -> AppResult<Json<DataResponse<GrantResponse>>> {
    if let Some(error) = params.error {
        return Err(AppError::BadRequest(format!("Consent was denied: {error}")));
    }
    let code = params
        .code
        .ok_or_else(|| AppError::BadRequest("Missing authorization code".into()))?;

    let grant = state.host.exchange_code(&code).await?;

    tracing::info!("OAuth code exchanged for tokens");

    Ok(Json(DataResponse::new(GrantResponse {
        refresh_token: grant.refresh_token,
        access_token: grant.access_token,
        expires_in: grant.expires_in,
    })))
}
