pub mod auth;
pub mod folders;
pub mod health;
pub mod host;
pub mod notifications;
pub mod payments;
pub mod sync;
pub mod uploads;
pub mod videos;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                     operator login (public)
/// /auth/session                   current session role (public)
/// /auth/logout                    clear session cookie (public)
///
/// /videos                         list gallery (public), purge all (admin)
/// /videos/{id}/unlock             admission check (public)
/// /videos/{id}/password           set/clear password (admin)
/// /videos/{id}/visibility         set hidden flag (admin)
/// /videos/{id}/folder             move into/out of folder (admin)
/// /videos/{id}                    delete + blacklist (admin)
///
/// /folders                        list (public), create (admin)
/// /folders/{id}/unlock            admission check (public)
/// /folders/{id}                   delete, members revert to root (admin)
///
/// /uploads/init                   open resumable host session (admin)
/// /uploads/save                   record finished upload (admin)
///
/// /sync                           reconcile host uploads into gallery (admin)
///
/// /host/authorize                 redirect to OAuth consent (admin)
/// /host/callback                  exchange code, show refresh token (admin)
///
/// /payments/orders                create gateway order (public)
/// /payments/verify                verify payment signature (public)
/// /payments/checkout              initiate hosted pay page (public)
///
/// /notifications/receipt          queue receipt emails (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Operator session (login, session introspection, logout).
        .nest("/auth", auth::router())
        // Gallery records: listing, admission, curation, deletion.
        .nest("/videos", videos::router())
        // Password-gated collections.
        .nest("/folders", folders::router())
        // Two-phase browser-direct upload.
        .nest("/uploads", uploads::router())
        // Host reconciliation pass.
        .nest("/sync", sync::router())
        // One-time OAuth bootstrap against the video host.
        .nest("/host", host::router())
        // Payment gateways (order + verify, hosted pay page).
        .nest("/payments", payments::router())
        // Post-payment receipt emails.
        .nest("/notifications", notifications::router())
}
