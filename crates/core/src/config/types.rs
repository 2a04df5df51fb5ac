use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub store: StoreConfig,
    #[serde(default)]
    pub browse: BrowseConfig,
}

/// Which backend serves the catalog and how to reach it
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Storage backend type
    pub backend: StoreBackend,
    /// Local file-backed store settings (all fields defaulted)
    #[serde(default)]
    pub local: Option<LocalStoreConfig>,
    /// Remote HTTP store settings (required when backend = "remote")
    #[serde(default)]
    pub remote: Option<RemoteStoreConfig>,
}

/// Available storage backends
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    Local,
    Remote,
}

/// File-backed store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocalStoreConfig {
    /// Path of the JSON catalog document
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,
    /// Reject `authenticate` calls instead of running the offline bypass.
    ///
    /// A local cache has no credential source, so by default every pair is
    /// accepted and no token is produced. Setting this fails closed.
    #[serde(default)]
    pub require_auth: bool,
}

impl Default for LocalStoreConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
            require_auth: false,
        }
    }
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("reelrack.json")
}

/// Remote HTTP store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteStoreConfig {
    /// Base URL of the data endpoint; the catalog lives at `{data_url}/videos`
    pub data_url: String,
    /// Full URL of the credential endpoint
    pub auth_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

/// Catalog browsing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrowseConfig {
    /// Records revealed per batch (default: 5)
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}

fn default_batch_size() -> usize {
    5
}
