//! Handler for the `/sync` operation.

use axum::extract::State;
use axum::Json;
use keepsake_host::sync::run_sync;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::session::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Response body for `POST /sync`.
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    /// Detailed videos examined on the host.
    pub scanned: usize,
    /// New records imported into the gallery.
    pub added: usize,
    /// Human-readable summary shown in the operator UI.
    pub message: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/sync
///
/// Run one reconciler pass against the host's recent uploads. New unlisted
/// videos are imported with the configured default password; blacklisted
/// and already-known ids are skipped. Admin only.
pub async fn run(
    State(state): State<AppState>,
    RequireAdmin(_session): RequireAdmin,
) -> AppResult<Json<DataResponse<SyncResponse>>> {
    let report = run_sync(
        &state.pool,
        state.host.as_ref(),
        state.config.access.default_sync_password(),
    )
    .await?;

    Ok(Json(DataResponse::new(SyncResponse {
        scanned: report.scanned,
        added: report.added,
        message: format!(
            "Sync Complete. Checked {} videos, added {} new unlisted memories.",
            report.scanned, report.added
        ),
    })))
}
