//! Handlers for the `/auth` resource (operator login, session, logout).
//!
//! The portal has a single operator identity configured through the
//! environment, so login is a straight credential comparison followed by
//! minting a signed session cookie. Logout clears the cookie; there is no
//! server-side session state to revoke.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use keepsake_core::error::CoreError;
use keepsake_core::roles::Role;
use serde::{Deserialize, Serialize};

use crate::auth::session::{clear_session_cookie, mint_session, session_cookie};
use crate::error::{AppError, AppResult};
use crate::middleware::session::Session;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Session info returned by login and `GET /auth/session`.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub role: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with the operator email + password. Sets the session cookie
/// and returns the granted role.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    // 1. Compare against the configured operator credential.
    if !state.config.operator.matches(&input.email, &input.password) {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    }

    // 2. Mint a 7-day admin session and install it as an http-only cookie.
    let token = mint_session(Role::Admin, &state.config.session)
        .map_err(|e| AppError::InternalError(format!("Session token error: {e}")))?;
    let cookie = session_cookie(&token, &state.config.session);

    tracing::info!("Operator logged in");

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(DataResponse::new(SessionInfo {
            role: Role::Admin.as_str().to_string(),
        })),
    ))
}

/// GET /api/v1/auth/session
///
/// Report the role of the current session. Guests get `"guest"` rather than
/// an error, so the frontend can render the right chrome without a login
/// round trip.
pub async fn session(session: Session) -> Json<DataResponse<SessionInfo>> {
    Json(DataResponse::new(SessionInfo {
        role: session.role.as_str().to_string(),
    }))
}

/// POST /api/v1/auth/logout
///
/// Clear the session cookie. Returns 204 No Content.
pub async fn logout() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, clear_session_cookie())],
    )
}
