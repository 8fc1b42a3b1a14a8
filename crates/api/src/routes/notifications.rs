//! Route definition for the `/notifications` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// POST /receipt  -> send_receipt (queue payment receipt emails)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/receipt", post(notifications::send_receipt))
}
