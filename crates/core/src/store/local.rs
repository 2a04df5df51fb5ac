//! File-backed video store with write-through persistence.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::LocalStoreConfig;
use crate::metrics;

use super::types::{Catalog, StoreError, VideoRecord};
use super::VideoStore;

/// File-backed store that keeps the whole catalog in memory and mirrors it
/// to a JSON document on every mutation.
///
/// The document and the in-memory catalog are equal whenever a call has
/// returned: each append is persisted before `add_video` answers, and an
/// append that cannot be persisted is rolled back. Nothing synchronizes
/// file access across processes; two stores pointed at the same path can
/// clobber each other.
pub struct LocalVideoStore {
    path: PathBuf,
    require_auth: bool,
    catalog: RwLock<Catalog>,
}

impl LocalVideoStore {
    /// Open a store backed by the configured path.
    ///
    /// A missing file is an empty catalog; it is not created until the
    /// first append. An existing file must parse as a catalog document,
    /// anything else fails with [`StoreError::Corrupted`].
    pub async fn open(config: LocalStoreConfig) -> Result<Self, StoreError> {
        let path = config.path;

        let catalog = if path.exists() {
            let raw = fs::read_to_string(&path).await.map_err(|e| StoreError::Io {
                path: path.clone(),
                source: e,
            })?;
            let catalog: Catalog =
                serde_json::from_str(&raw).map_err(|e| StoreError::Corrupted {
                    path: path.clone(),
                    source: e,
                })?;
            debug!(
                "Opened video cache at {:?} with {} records",
                path,
                catalog.len()
            );
            catalog
        } else {
            debug!("No cache file at {:?}, starting empty", path);
            Catalog::default()
        };

        Ok(Self {
            path,
            require_auth: config.require_auth,
            catalog: RwLock::new(catalog),
        })
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the catalog and replace the backing file.
    ///
    /// Goes through a sibling temp file and a rename so a crash mid-write
    /// leaves the previous document intact.
    async fn persist(&self, catalog: &Catalog) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(catalog)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json.as_bytes())
            .await
            .map_err(|e| StoreError::Io {
                path: tmp.clone(),
                source: e,
            })?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::Io {
                path: self.path.clone(),
                source: e,
            })?;
        Ok(())
    }
}

#[async_trait]
impl VideoStore for LocalVideoStore {
    async fn list_videos(&self) -> Vec<VideoRecord> {
        let catalog = self.catalog.read().await;
        metrics::STORE_LISTINGS
            .with_label_values(&["local", "ok"])
            .inc();
        metrics::LISTING_SIZE
            .with_label_values(&["local"])
            .observe(catalog.len() as f64);
        catalog.videos.clone()
    }

    async fn add_video(&self, video: VideoRecord) -> bool {
        let mut catalog = self.catalog.write().await;
        catalog.videos.push(video);

        match self.persist(&catalog).await {
            Ok(()) => {
                debug!("Cache persisted with {} records", catalog.len());
                metrics::STORE_ADDS
                    .with_label_values(&["local", "ok"])
                    .inc();
                true
            }
            Err(e) => {
                // Keep memory equal to the file: drop the record we could
                // not persist.
                catalog.videos.pop();
                warn!("Failed to persist video cache, discarding append: {}", e);
                metrics::STORE_ADDS
                    .with_label_values(&["local", "failed"])
                    .inc();
                false
            }
        }
    }

    async fn authenticate(&self, _email: &str, _password: &str) -> bool {
        if self.require_auth {
            warn!("Authentication required but a local cache has no credential source, rejecting");
            metrics::AUTH_ATTEMPTS
                .with_label_values(&["local", "rejected"])
                .inc();
            return false;
        }

        // Offline mode: every credential pair is accepted and no token is
        // ever produced.
        debug!("Offline mode, accepting credentials unchecked");
        metrics::AUTH_ATTEMPTS
            .with_label_values(&["local", "ok"])
            .inc();
        true
    }
}
