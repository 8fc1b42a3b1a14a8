//! OAuth token exchange for the video host.
//!
//! Every host operation asks [`TokenProvider::access_token`] first. The
//! provider caches the short-lived access token and performs at most one
//! refresh-grant exchange per call; an exchange failure surfaces as
//! [`HostError::Auth`] and is never retried silently.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::Mutex;

use crate::config::{HostConfig, SCOPES};
use crate::error::HostError;

/// Refresh this long before the host says the token expires.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Response from the token endpoint for both grant types.
#[derive(Debug, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
    /// Only present on authorization-code exchanges that were made with
    /// offline access and forced consent.
    pub refresh_token: Option<String>,
}

struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// Exchanges and caches access tokens for the host API.
pub struct TokenProvider {
    client: reqwest::Client,
    config: Arc<HostConfig>,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(client: reqwest::Client, config: Arc<HostConfig>) -> Self {
        Self {
            client,
            config,
            cached: Mutex::new(None),
        }
    }

    /// A valid access token, refreshed through the stored refresh
    /// credential when the cached one is missing or near expiry.
    ///
    /// The cache lock is held across the exchange so concurrent callers
    /// share one refresh instead of racing the token endpoint.
    pub async fn access_token(&self) -> Result<String, HostError> {
        let mut cached = self.cached.lock().await;
        if let Some(c) = cached.as_ref() {
            if Instant::now() + EXPIRY_MARGIN < c.expires_at {
                return Ok(c.token.clone());
            }
        }

        let refresh_token = self.config.refresh_token.as_deref().ok_or_else(|| {
            HostError::Auth("no refresh credential configured; run the consent bootstrap".into())
        })?;

        let grant = self.exchange_refresh_token(refresh_token).await?;
        let token = grant.access_token.clone();
        *cached = Some(CachedToken {
            token: grant.access_token,
            expires_at: Instant::now() + Duration::from_secs(grant.expires_in.max(0) as u64),
        });
        Ok(token)
    }

    /// Exchange the long-lived refresh credential for an access token.
    async fn exchange_refresh_token(&self, refresh_token: &str) -> Result<TokenGrant, HostError> {
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(HostError::Auth(format!(
                "token endpoint returned {status}: {body}",
                status = status.as_u16()
            )));
        }

        Ok(response.json::<TokenGrant>().await?)
    }

    /// One-time authorization-code exchange used by the consent
    /// bootstrap. Returns the full grant so the caller can surface the
    /// refresh token to the operator.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenGrant, HostError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(HostError::Auth(format!(
                "code exchange returned {status}: {body}",
                status = status.as_u16()
            )));
        }

        Ok(response.json::<TokenGrant>().await?)
    }
}

/// Build the interactive consent URL for the one-time bootstrap.
///
/// `access_type=offline` plus `prompt=consent` forces the host to issue
/// a refresh token, which is the whole point of the flow.
pub fn consent_url(config: &HostConfig) -> String {
    format!(
        "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&access_type=offline&prompt=consent",
        config.auth_url,
        urlencoding::encode(&config.client_id),
        urlencoding::encode(&config.redirect_uri),
        urlencoding::encode(SCOPES),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> HostConfig {
        HostConfig {
            client_id: "client-1".into(),
            client_secret: "secret".into(),
            refresh_token: Some("refresh".into()),
            redirect_uri: "http://localhost:3000/api/v1/host/callback".into(),
            api_url: "https://api.example.test/v3".into(),
            upload_url: "https://upload.example.test/v3".into(),
            token_url: "https://token.example.test".into(),
            auth_url: "https://auth.example.test/consent".into(),
        }
    }

    #[test]
    fn consent_url_requests_offline_access_with_forced_consent() {
        let url = consent_url(&test_config());
        assert!(url.starts_with("https://auth.example.test/consent?client_id=client-1&"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fapi%2Fv1%2Fhost%2Fcallback"));
        assert!(url.contains("scope=https%3A%2F%2Fwww.googleapis.com%2Fauth%2Fyoutube.upload%20"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("prompt=consent"));
    }
}
