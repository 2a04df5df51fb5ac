//! Mock video store for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::store::{VideoRecord, VideoStore};

/// A recorded store call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    ListVideos,
    AddVideo { title: String },
    Authenticate { email: String },
}

/// Mock implementation of the [`VideoStore`] trait.
///
/// Provides controllable behavior for testing:
/// - Preload records to return from `list_videos`
/// - Script the `authenticate` outcome
/// - Flip into degraded mode, where listings come back empty and writes
///   are rejected, like a real backend with an unreachable endpoint
/// - Track calls for assertions
///
/// # Example
///
/// ```rust,ignore
/// use reelrack_core::testing::{fixtures, MockVideoStore};
///
/// let store = MockVideoStore::new();
/// store.set_videos(vec![
///     fixtures::video("Funny Cats", &["cats"]),
///     fixtures::video("Concert", &["music"]),
/// ]).await;
///
/// let videos = store.list_videos().await;
/// assert_eq!(videos.len(), 2);
///
/// let calls = store.recorded_calls().await;
/// assert_eq!(calls.len(), 1);
/// ```
pub struct MockVideoStore {
    /// Records returned by `list_videos` and extended by `add_video`.
    videos: Arc<RwLock<Vec<VideoRecord>>>,
    /// Scripted outcome for `authenticate`.
    auth_outcome: Arc<RwLock<bool>>,
    /// When set, listings are empty and writes are rejected.
    degraded: Arc<RwLock<bool>>,
    /// Recorded calls.
    calls: Arc<RwLock<Vec<RecordedCall>>>,
}

impl std::fmt::Debug for MockVideoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockVideoStore")
            .field("videos", &"<videos>")
            .field("auth_outcome", &"<auth_outcome>")
            .field("degraded", &"<degraded>")
            .field("calls", &"<calls>")
            .finish()
    }
}

impl Default for MockVideoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockVideoStore {
    /// Create a new mock store with an empty catalog and accepting auth.
    pub fn new() -> Self {
        Self {
            videos: Arc::new(RwLock::new(Vec::new())),
            auth_outcome: Arc::new(RwLock::new(true)),
            degraded: Arc::new(RwLock::new(false)),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Set the records returned by subsequent listings.
    pub async fn set_videos(&self, videos: Vec<VideoRecord>) {
        *self.videos.write().await = videos;
    }

    /// Script the outcome of subsequent `authenticate` calls.
    pub async fn set_auth_outcome(&self, outcome: bool) {
        *self.auth_outcome.write().await = outcome;
    }

    /// Flip degraded mode on or off.
    pub async fn set_degraded(&self, degraded: bool) {
        *self.degraded.write().await = degraded;
    }

    /// Get recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Clear recorded calls.
    pub async fn clear_recorded(&self) {
        self.calls.write().await.clear();
    }

    /// Number of records currently held.
    pub async fn video_count(&self) -> usize {
        self.videos.read().await.len()
    }
}

#[async_trait]
impl VideoStore for MockVideoStore {
    async fn list_videos(&self) -> Vec<VideoRecord> {
        self.calls.write().await.push(RecordedCall::ListVideos);

        if *self.degraded.read().await {
            return Vec::new();
        }
        self.videos.read().await.clone()
    }

    async fn add_video(&self, video: VideoRecord) -> bool {
        self.calls.write().await.push(RecordedCall::AddVideo {
            title: video.title.clone(),
        });

        if *self.degraded.read().await {
            return false;
        }
        self.videos.write().await.push(video);
        true
    }

    async fn authenticate(&self, email: &str, _password: &str) -> bool {
        self.calls.write().await.push(RecordedCall::Authenticate {
            email: email.to_string(),
        });

        if *self.degraded.read().await {
            return false;
        }
        *self.auth_outcome.read().await
    }
}
