use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

/// A single video entry in the catalog.
///
/// Records carry metadata only; the media itself lives behind the URLs.
/// There is no identifier field: records are plain values, equal when all
/// their fields are equal, and immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    /// Display title.
    pub title: String,
    /// Longer text shown under the title.
    pub description: String,
    /// Where the preview image lives.
    pub thumbnail_url: String,
    /// Where the playable video lives.
    pub video_url: String,
    /// Unordered, duplicate-free labels. Absent in a payload means empty.
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

/// The catalog document: records in insertion order.
///
/// This is both the in-memory shape and the on-disk JSON shape,
/// `{"videos": [...]}`. A document without the `videos` key reads as an
/// empty catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub videos: Vec<VideoRecord>,
}

impl Catalog {
    /// Number of records in the catalog.
    pub fn len(&self) -> usize {
        self.videos.len()
    }

    /// True when the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}

/// Authentication state held by a store.
///
/// Empty until a backend accepts a credential pair. A failed attempt never
/// clears a previously stored token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSession {
    /// Opaque token returned by the credential endpoint.
    pub token: Option<String>,
    /// When the token was stored.
    pub acquired_at: Option<DateTime<Utc>>,
}

impl AuthSession {
    /// True when a token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Errors surfaced when opening or configuring a store.
///
/// Only construction is fallible. The runtime operations degrade instead:
/// a listing that cannot be fetched comes back empty and a write that
/// cannot land comes back `false`, with the fault logged.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The cache file exists but could not be read or replaced.
    #[error("cache file I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The cache file exists but does not parse as a catalog document.
    /// Surfaced at open rather than silently serving a truncated catalog.
    #[error("cache file {path} is not a valid catalog document: {source}")]
    Corrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A catalog could not be serialized for persistence.
    #[error("failed to serialize catalog: {0}")]
    Serialization(String),

    /// The store configuration is unusable for the selected backend.
    #[error("store configuration error: {0}")]
    Configuration(String),

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
