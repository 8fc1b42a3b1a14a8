//! Route definition for the `/sync` operation.

use axum::routing::post;
use axum::Router;

use crate::handlers::sync;
use crate::state::AppState;

/// Routes mounted at `/sync`.
///
/// ```text
/// POST /  -> run (one reconciler pass, admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(sync::run))
}
