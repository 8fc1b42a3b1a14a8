use keepsake_core::error::CoreError;

/// Errors from the video host HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Could not obtain an access token. Fatal for the calling
    /// operation; never retried silently.
    #[error("Host authentication failed: {0}")]
    Auth(String),

    /// The host rejected or failed resumable-session creation.
    #[error("Upload session creation failed ({status}): {body}")]
    UploadInit {
        /// Upstream HTTP status code.
        status: u16,
        /// Raw response body for diagnostics.
        body: String,
    },

    /// The authenticated account has no channel or uploads playlist.
    #[error("No channel or uploads playlist found")]
    NoUploadsPlaylist,

    /// Any other non-2xx response from the host.
    #[error("Host API error ({status}): {body}")]
    Api {
        /// Upstream HTTP status code.
        status: u16,
        /// Raw response body for diagnostics.
        body: String,
    },
}

/// Errors from the sync and publish flows, which combine host calls
/// with metadata-store writes.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Store(#[from] sqlx::Error),
}
