//! Route definitions for the `/uploads` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Routes mounted at `/uploads`.
///
/// ```text
/// POST /init  -> init (open resumable host session, admin)
/// POST /save  -> save (record finished upload, admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/init", post(uploads::init))
        .route("/save", post(uploads::save))
}
