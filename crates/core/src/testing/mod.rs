//! Testing utilities and mock implementations.
//!
//! This module provides a mock implementation of the store trait, allowing
//! browser and consumer tests without real files or endpoints.
//!
//! # Example
//!
//! ```rust,ignore
//! use reelrack_core::testing::{fixtures, MockVideoStore};
//!
//! let store = MockVideoStore::new();
//!
//! // Configure mock behavior
//! store.set_videos(vec![fixtures::video("Funny Cats", &["cats"])]).await;
//! store.set_auth_outcome(false).await;
//!
//! // Use behind Arc<dyn VideoStore>...
//! ```

mod mock_store;

pub use mock_store::{MockVideoStore, RecordedCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::store::{Catalog, VideoRecord};

    /// Create a test video record with reasonable defaults.
    pub fn video(title: &str, tags: &[&str]) -> VideoRecord {
        VideoRecord {
            title: title.to_string(),
            description: format!("A video about {}.", title.to_lowercase()),
            thumbnail_url: format!("https://cdn.example.com/thumbs/{}.jpg", slug(title)),
            video_url: format!("https://videos.example.com/{}", slug(title)),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Create `n` numbered, untagged records: "Video 1" through "Video n".
    pub fn numbered_catalog(n: usize) -> Vec<VideoRecord> {
        (1..=n)
            .map(|i| video(&format!("Video {}", i), &[]))
            .collect()
    }

    /// Wrap records in a catalog document.
    pub fn catalog(videos: Vec<VideoRecord>) -> Catalog {
        Catalog { videos }
    }

    fn slug(title: &str) -> String {
        title.to_lowercase().replace(' ', "-")
    }
}
