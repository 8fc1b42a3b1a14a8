//! Route definitions for the `/folders` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::folders;
use crate::state::AppState;

/// Routes mounted at `/folders`.
///
/// ```text
/// GET    /              -> list (role-dependent projection)
/// POST   /              -> create (admin)
/// POST   /{id}/unlock   -> unlock (admission check)
/// DELETE /{id}          -> delete (admin, members revert to root)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(folders::list).post(folders::create))
        .route("/{id}/unlock", post(folders::unlock))
        .route("/{id}", delete(folders::delete))
}
