use std::sync::Arc;

use keepsake_host::HostClient;

use crate::config::ServerConfig;
use crate::notifications::email::EmailDelivery;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: keepsake_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Video host adapter (uploads, listings, token refresh).
    pub host: Arc<HostClient>,
    /// HTTP client for payment gateway calls.
    pub http: reqwest::Client,
    /// Transactional email delivery; `None` when SMTP is unconfigured.
    pub mailer: Option<Arc<EmailDelivery>>,
}
