//! HTTP-backed video store.
//!
//! Talks to two endpoints: a data endpoint serving the catalog under
//! `{data_url}/videos` and a credential endpoint trading an email/password
//! pair for a session token. Requests run on the caller's task with no
//! retries; a request timeout bounds how long a dead endpoint can stall.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::RemoteStoreConfig;
use crate::metrics;

use super::types::{AuthSession, StoreError, VideoRecord};
use super::VideoStore;

/// Faults on the wire, classified for logging. Never escapes this module:
/// every variant degrades to an empty listing or `false` at the trait
/// boundary.
#[derive(Debug, Error)]
enum RemoteError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RemoteError::Timeout
        } else if e.is_connect() {
            RemoteError::ConnectionFailed(e.to_string())
        } else {
            RemoteError::Transport(e.to_string())
        }
    }
}

/// Shapes the data endpoint serves for a listing: a plain array, or an
/// object keyed by server-generated ids. `null` for an empty catalog is
/// handled by parsing into an `Option` of this.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListingPayload {
    Records(Vec<VideoRecord>),
    Keyed(BTreeMap<String, VideoRecord>),
}

impl ListingPayload {
    /// Flatten to records. Keyed payloads are emitted in ascending key
    /// order, which is insertion order for push-style ids.
    fn into_records(self) -> Vec<VideoRecord> {
        match self {
            ListingPayload::Records(records) => records,
            ListingPayload::Keyed(map) => map.into_values().collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CredentialRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(rename = "returnSecureToken")]
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(rename = "idToken")]
    id_token: String,
}

/// HTTP-backed store.
///
/// Writes are unauthenticated: the token stored by a successful
/// `authenticate` is kept in the session but never attached to `add_video`
/// or `list_videos` requests, so the data endpoint must accept them on its
/// own terms.
pub struct RemoteVideoStore {
    client: Client,
    data_url: String,
    auth_url: String,
    session: RwLock<AuthSession>,
}

impl RemoteVideoStore {
    /// Create a remote store from configuration.
    pub fn new(config: RemoteStoreConfig) -> Result<Self, StoreError> {
        if config.data_url.is_empty() {
            return Err(StoreError::Configuration(
                "remote store requires a data_url".to_string(),
            ));
        }
        if config.auth_url.is_empty() {
            return Err(StoreError::Configuration(
                "remote store requires an auth_url".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            data_url: config.data_url.trim_end_matches('/').to_string(),
            auth_url: config.auth_url,
            session: RwLock::new(AuthSession::default()),
        })
    }

    /// Snapshot of the current authentication state.
    pub async fn session(&self) -> AuthSession {
        self.session.read().await.clone()
    }

    fn videos_url(&self) -> String {
        format!("{}/videos", self.data_url)
    }

    async fn fetch_listing(&self) -> Result<Vec<VideoRecord>, RemoteError> {
        let url = self.videos_url();
        debug!("Fetching video listing from {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status));
        }

        let payload: Option<ListingPayload> = response
            .json()
            .await
            .map_err(|e| RemoteError::Malformed(format!("listing payload: {}", e)))?;

        Ok(payload.map(ListingPayload::into_records).unwrap_or_default())
    }

    async fn push_video(&self, video: &VideoRecord) -> Result<(), RemoteError> {
        let url = self.videos_url();
        debug!("Posting video record '{}' to {}", video.title, url);

        let response = self.client.post(&url).json(video).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status));
        }
        Ok(())
    }

    async fn request_token(&self, email: &str, password: &str) -> Result<String, RemoteError> {
        debug!("Requesting session token from credential endpoint");

        let body = CredentialRequest {
            email,
            password,
            return_secure_token: true,
        };
        let response = self.client.post(&self.auth_url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::Malformed(format!("token payload: {}", e)))?;
        Ok(token.id_token)
    }
}

#[async_trait]
impl VideoStore for RemoteVideoStore {
    async fn list_videos(&self) -> Vec<VideoRecord> {
        let started = Instant::now();
        let outcome = self.fetch_listing().await;
        metrics::REMOTE_REQUEST_DURATION
            .with_label_values(&["list"])
            .observe(started.elapsed().as_secs_f64());

        match outcome {
            Ok(videos) => {
                metrics::STORE_LISTINGS
                    .with_label_values(&["remote", "ok"])
                    .inc();
                metrics::LISTING_SIZE
                    .with_label_values(&["remote"])
                    .observe(videos.len() as f64);
                videos
            }
            Err(e) => {
                // Degrades to an empty catalog; the caller cannot tell
                // this apart from a genuinely empty listing.
                warn!("Video listing failed, returning empty catalog: {}", e);
                metrics::STORE_LISTINGS
                    .with_label_values(&["remote", "degraded"])
                    .inc();
                Vec::new()
            }
        }
    }

    async fn add_video(&self, video: VideoRecord) -> bool {
        let started = Instant::now();
        let outcome = self.push_video(&video).await;
        metrics::REMOTE_REQUEST_DURATION
            .with_label_values(&["add"])
            .observe(started.elapsed().as_secs_f64());

        match outcome {
            Ok(()) => {
                metrics::STORE_ADDS
                    .with_label_values(&["remote", "ok"])
                    .inc();
                true
            }
            Err(e) => {
                warn!("Failed to add video '{}': {}", video.title, e);
                metrics::STORE_ADDS
                    .with_label_values(&["remote", "failed"])
                    .inc();
                false
            }
        }
    }

    async fn authenticate(&self, email: &str, password: &str) -> bool {
        let started = Instant::now();
        let outcome = self.request_token(email, password).await;
        metrics::REMOTE_REQUEST_DURATION
            .with_label_values(&["auth"])
            .observe(started.elapsed().as_secs_f64());

        match outcome {
            Ok(token) => {
                let mut session = self.session.write().await;
                session.token = Some(token);
                session.acquired_at = Some(Utc::now());
                debug!("Session token stored");
                metrics::AUTH_ATTEMPTS
                    .with_label_values(&["remote", "ok"])
                    .inc();
                true
            }
            Err(RemoteError::Status(status)) => {
                warn!("Credentials rejected by auth endpoint: HTTP {}", status);
                metrics::AUTH_ATTEMPTS
                    .with_label_values(&["remote", "rejected"])
                    .inc();
                false
            }
            Err(e) => {
                warn!("Authentication failed before the endpoint answered: {}", e);
                metrics::AUTH_ATTEMPTS
                    .with_label_values(&["remote", "rejected"])
                    .inc();
                false
            }
        }
    }
}
