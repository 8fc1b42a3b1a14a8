//! Route definitions for the `/host` resource (OAuth bootstrap).

use axum::routing::get;
use axum::Router;

use crate::handlers::host_setup;
use crate::state::AppState;

/// Routes mounted at `/host`.
///
/// ```text
/// GET /authorize  -> authorize (redirect to consent page, admin)
/// GET /callback   -> callback (exchange code for tokens, admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/authorize", get(host_setup::authorize))
        .route("/callback", get(host_setup::callback))
}
