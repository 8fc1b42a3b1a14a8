//! Route definitions for the `/videos` resource.

use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::handlers::videos;
use crate::state::AppState;

/// Routes mounted at `/videos`.
///
/// ```text
/// GET    /                 -> list (role-dependent projection)
/// DELETE /                 -> purge (admin)
/// POST   /{id}/unlock      -> unlock (admission check)
/// PATCH  /{id}/password    -> update_password (admin)
/// PATCH  /{id}/visibility  -> update_visibility (admin)
/// PATCH  /{id}/folder      -> move_folder (admin)
/// DELETE /{id}             -> delete (admin, blacklists hosted videos)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(videos::list).delete(videos::purge))
        .route("/{id}/unlock", post(videos::unlock))
        .route("/{id}/password", patch(videos::update_password))
        .route("/{id}/visibility", patch(videos::update_visibility))
        .route("/{id}/folder", patch(videos::move_folder))
        .route("/{id}", delete(videos::delete))
}
