//! Video host credentials and endpoints.

/// OAuth scopes requested during the one-time consent bootstrap:
/// upload (publish flow) and readonly (sync listing).
pub const SCOPES: &str = "https://www.googleapis.com/auth/youtube.upload https://www.googleapis.com/auth/youtube.readonly";

/// Configuration for the video host adapter, loaded from environment
/// variables.
///
/// The refresh token is optional at startup: until the operator runs
/// the consent bootstrap, every host operation fails with an auth
/// error instead of preventing the server from booting.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Long-lived refresh credential, produced by the consent bootstrap.
    pub refresh_token: Option<String>,
    /// Redirect URI registered for the OAuth client.
    pub redirect_uri: String,
    /// Data API base URL.
    pub api_url: String,
    /// Resumable-upload API base URL.
    pub upload_url: String,
    /// Token exchange endpoint.
    pub token_url: String,
    /// Interactive consent endpoint.
    pub auth_url: String,
}

impl HostConfig {
    /// Load host configuration from environment variables.
    ///
    /// | Env Var                    | Default                                         |
    /// |----------------------------|-------------------------------------------------|
    /// | `VIDEO_HOST_CLIENT_ID`     | (required)                                      |
    /// | `VIDEO_HOST_CLIENT_SECRET` | (required)                                      |
    /// | `VIDEO_HOST_REFRESH_TOKEN` | unset (host operations fail until bootstrapped) |
    /// | `VIDEO_HOST_REDIRECT_URI`  | `http://localhost:3000/api/v1/host/callback`    |
    /// | `VIDEO_HOST_API_URL`       | `https://www.googleapis.com/youtube/v3`         |
    /// | `VIDEO_HOST_UPLOAD_URL`    | `https://www.googleapis.com/upload/youtube/v3`  |
    /// | `VIDEO_HOST_TOKEN_URL`     | `https://oauth2.googleapis.com/token`           |
    /// | `VIDEO_HOST_AUTH_URL`      | `https://accounts.google.com/o/oauth2/v2/auth`  |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing, so misconfiguration
    /// fails at startup rather than on the first upload.
    pub fn from_env() -> Self {
        let client_id = std::env::var("VIDEO_HOST_CLIENT_ID")
            .expect("VIDEO_HOST_CLIENT_ID must be set in the environment");
        let client_secret = std::env::var("VIDEO_HOST_CLIENT_SECRET")
            .expect("VIDEO_HOST_CLIENT_SECRET must be set in the environment");
        let refresh_token = std::env::var("VIDEO_HOST_REFRESH_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());

        let redirect_uri = std::env::var("VIDEO_HOST_REDIRECT_URI")
            .unwrap_or_else(|_| "http://localhost:3000/api/v1/host/callback".into());
        let api_url = std::env::var("VIDEO_HOST_API_URL")
            .unwrap_or_else(|_| "https://www.googleapis.com/youtube/v3".into());
        let upload_url = std::env::var("VIDEO_HOST_UPLOAD_URL")
            .unwrap_or_else(|_| "https://www.googleapis.com/upload/youtube/v3".into());
        let token_url = std::env::var("VIDEO_HOST_TOKEN_URL")
            .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".into());
        let auth_url = std::env::var("VIDEO_HOST_AUTH_URL")
            .unwrap_or_else(|_| "https://accounts.google.com/o/oauth2/v2/auth".into());

        Self {
            client_id,
            client_secret,
            refresh_token,
            redirect_uri,
            api_url,
            upload_url,
            token_url,
            auth_url,
        }
    }
}
