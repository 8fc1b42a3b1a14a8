//! REST client for the video host's data and upload APIs.
//!
//! Wraps the channels/playlist-items/videos listing endpoints and the
//! resumable-upload session endpoint using [`reqwest`]. Every call
//! obtains a fresh-enough access token from [`TokenProvider`] first.

use std::sync::Arc;

use async_trait::async_trait;
use keepsake_core::types::Timestamp;
use serde::Deserialize;

use crate::config::HostConfig;
use crate::error::HostError;
use crate::token::{self, TokenGrant, TokenProvider};

/// The only privacy status the portal ever imports or creates.
pub const PRIVACY_UNLISTED: &str = "unlisted";

/// Description stamped on every video this portal uploads.
const UPLOAD_DESCRIPTION: &str = "Uploaded via Wedding Video Portal";

/// A video as reported by the host's listing endpoints.
#[derive(Debug, Clone)]
pub struct RemoteVideo {
    /// Host-assigned video identifier.
    pub id: String,
    pub title: Option<String>,
    pub published_at: Option<Timestamp>,
    /// `"unlisted"`, `"public"`, `"private"`, or absent when the
    /// listing endpoint omitted it.
    pub privacy_status: Option<String>,
}

/// Read side of the host adapter, as consumed by the sync reconciler.
///
/// [`HostClient`] is the production implementation; tests substitute an
/// in-memory one.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Up to `limit` most recent uploads of the authenticated account.
    /// Privacy statuses from this listing may be stale or absent.
    async fn list_recent_uploads(&self, limit: u32) -> Result<Vec<RemoteVideo>, HostError>;

    /// Authoritative details (including privacy status) for the given ids.
    async fn video_details(&self, ids: &[String]) -> Result<Vec<RemoteVideo>, HostError>;
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelResource {
    content_details: Option<ChannelContentDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelContentDetails {
    related_playlists: Option<RelatedPlaylists>,
}

#[derive(Debug, Deserialize)]
struct RelatedPlaylists {
    uploads: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItemsResponse {
    #[serde(default)]
    items: Vec<PlaylistItemResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemResource {
    snippet: Option<Snippet>,
    content_details: Option<PlaylistItemContentDetails>,
    status: Option<StatusPart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemContentDetails {
    video_id: Option<String>,
    video_published_at: Option<Timestamp>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoResource>,
}

#[derive(Debug, Deserialize)]
struct VideoResource {
    id: Option<String>,
    snippet: Option<Snippet>,
    status: Option<StatusPart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: Option<String>,
    published_at: Option<Timestamp>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusPart {
    privacy_status: Option<String>,
}

/// Items without a video id (deleted or region-blocked entries) are
/// dropped rather than surfaced as errors.
fn map_playlist_items(items: Vec<PlaylistItemResource>) -> Vec<RemoteVideo> {
    items
        .into_iter()
        .filter_map(|item| {
            let details = item.content_details?;
            let id = details.video_id?;
            let (title, published_at) = match item.snippet {
                Some(s) => (s.title, s.published_at),
                None => (None, None),
            };
            Some(RemoteVideo {
                id,
                title,
                published_at: published_at.or(details.video_published_at),
                privacy_status: item.status.and_then(|s| s.privacy_status),
            })
        })
        .collect()
}

fn map_video_resources(items: Vec<VideoResource>) -> Vec<RemoteVideo> {
    items
        .into_iter()
        .filter_map(|item| {
            let id = item.id?;
            let (title, published_at) = match item.snippet {
                Some(s) => (s.title, s.published_at),
                None => (None, None),
            };
            Some(RemoteVideo {
                id,
                title,
                published_at,
                privacy_status: item.status.and_then(|s| s.privacy_status),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for the video host.
pub struct HostClient {
    client: reqwest::Client,
    config: Arc<HostConfig>,
    tokens: TokenProvider,
}

impl HostClient {
    /// Create a client from host configuration. One underlying
    /// connection pool is shared with the token provider.
    pub fn new(config: HostConfig) -> Self {
        let config = Arc::new(config);
        let client = reqwest::Client::new();
        let tokens = TokenProvider::new(client.clone(), Arc::clone(&config));
        Self {
            client,
            config,
            tokens,
        }
    }

    /// The interactive consent URL for the one-time operator bootstrap.
    pub fn consent_url(&self) -> String {
        token::consent_url(&self.config)
    }

    /// Exchange a consent callback code for tokens (bootstrap only).
    pub async fn exchange_code(&self, code: &str) -> Result<TokenGrant, HostError> {
        self.tokens.exchange_code(code).await
    }

    /// Create a resumable upload session and return its session URL.
    ///
    /// The session is created unconditionally unlisted and flagged
    /// not-for-kids; neither is a caller choice.
    pub async fn init_resumable_upload(&self, title: &str) -> Result<String, HostError> {
        let token = self.tokens.access_token().await?;

        let metadata = serde_json::json!({
            "snippet": {
                "title": title,
                "description": UPLOAD_DESCRIPTION,
            },
            "status": {
                "privacyStatus": PRIVACY_UNLISTED,
                "selfDeclaredMadeForKids": false,
            },
        });

        let response = self
            .client
            .post(format!(
                "{}/videos?uploadType=resumable&part=snippet,status",
                self.config.upload_url
            ))
            .bearer_auth(&token)
            .header("X-Upload-Content-Type", "video/*")
            .json(&metadata)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(HostError::UploadInit {
                status: status.as_u16(),
                body,
            });
        }

        response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| HostError::UploadInit {
                status: status.as_u16(),
                body: "no session URL in response location header".to_string(),
            })
    }

    /// Resolve the authenticated account's uploads playlist id.
    async fn uploads_playlist_id(&self, token: &str) -> Result<String, HostError> {
        let response = self
            .client
            .get(format!("{}/channels", self.config.api_url))
            .query(&[("part", "contentDetails"), ("mine", "true")])
            .bearer_auth(token)
            .send()
            .await?;

        let channels: ChannelListResponse = Self::parse_response(response).await?;
        channels
            .items
            .into_iter()
            .next()
            .and_then(|c| c.content_details)
            .and_then(|d| d.related_playlists)
            .and_then(|p| p.uploads)
            .ok_or(HostError::NoUploadsPlaylist)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`HostError::Api`] containing
    /// the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, HostError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(HostError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, HostError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl VideoSource for HostClient {
    async fn list_recent_uploads(&self, limit: u32) -> Result<Vec<RemoteVideo>, HostError> {
        let token = self.tokens.access_token().await?;
        let playlist_id = self.uploads_playlist_id(&token).await?;

        let max_results = limit.to_string();
        let response = self
            .client
            .get(format!("{}/playlistItems", self.config.api_url))
            .query(&[
                ("part", "snippet,contentDetails,status"),
                ("playlistId", playlist_id.as_str()),
                ("maxResults", max_results.as_str()),
            ])
            .bearer_auth(&token)
            .send()
            .await?;

        let listing: PlaylistItemsResponse = Self::parse_response(response).await?;
        Ok(map_playlist_items(listing.items))
    }

    async fn video_details(&self, ids: &[String]) -> Result<Vec<RemoteVideo>, HostError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let token = self.tokens.access_token().await?;
        let id_list = ids.join(",");
        let response = self
            .client
            .get(format!("{}/videos", self.config.api_url))
            .query(&[("part", "snippet,status"), ("id", id_list.as_str())])
            .bearer_auth(&token)
            .send()
            .await?;

        let listing: VideoListResponse = Self::parse_response(response).await?;
        Ok(map_video_resources(listing.items))
    }
}
