//! Session extractors for Axum handlers.
//!
//! Guests are first-class citizens of the portal: most routes serve both
//! anonymous visitors and the logged-in operator, varying only what they
//! reveal. [`Session`] therefore never rejects; a missing or invalid token
//! simply resolves to [`Role::Guest`]. [`RequireAdmin`] is the strict
//! variant for operator-only routes.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use keepsake_core::error::CoreError;
use keepsake_core::roles::Role;

use crate::auth::session::{validate_session, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

/// The request's session, resolved from the `portal_session` cookie or an
/// `Authorization: Bearer` header.
///
/// Use this in any handler that serves guests and the operator alike:
///
/// ```ignore
/// async fn list(session: Session) -> AppResult<Json<Vec<VideoDto>>> {
///     if session.role.is_admin() { /* full rows */ } else { /* redacted */ }
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Session {
    /// The resolved role; `Guest` when no valid token accompanies the request.
    pub role: Role,
}

/// Pull the raw session token out of the request, cookie first.
fn extract_token(parts: &Parts) -> Option<String> {
    let from_cookie = parts
        .headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|pair| {
                pair.trim()
                    .strip_prefix(SESSION_COOKIE)
                    .and_then(|rest| rest.strip_prefix('='))
                    .map(str::to_string)
            })
        });
    if from_cookie.is_some() {
        return from_cookie;
    }

    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::to_string)
}

impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let role = extract_token(parts)
            .and_then(|token| validate_session(&token, &state.config.session).ok())
            .and_then(|claims| claims.role.parse::<Role>().ok())
            .unwrap_or(Role::Guest);

        Ok(Session { role })
    }
}

/// Requires a valid admin session. Rejects with 401 when no token is
/// present or it fails validation, and 403 for a valid non-admin token.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(session): RequireAdmin) -> AppResult<Json<()>> {
///     // session.role is guaranteed to be Admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub Session);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Missing session token".into()))
        })?;

        let claims = validate_session(&token, &state.config.session).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
        })?;

        let role: Role = claims
            .role
            .parse()
            .map_err(|_| AppError::Core(CoreError::Unauthorized("Unknown session role".into())))?;
        role.require_admin().map_err(AppError::Core)?;

        Ok(RequireAdmin(Session { role }))
    }
}
