//! Video storage backends behind one capability interface.
//!
//! The consumer picks a backend once, at configuration time, and drives it
//! through the [`VideoStore`] trait; whether records come from a JSON file
//! next to the binary or an HTTP endpoint never leaks past construction.
//! Runtime operations degrade instead of failing, so a misbehaving backend
//! shows up as an empty catalog or a `false` return, never as an error the
//! consumer has to route around.

mod local;
mod remote;
mod types;

pub use local::LocalVideoStore;
pub use remote::RemoteVideoStore;
pub use types::*;

use async_trait::async_trait;

use crate::config::{StoreBackend, StoreConfig};

/// Uniform interface over the catalog backends.
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Fetch the full catalog in insertion order.
    ///
    /// Never fails visibly: any underlying fault is logged and degrades to
    /// an empty sequence, indistinguishable from an empty catalog.
    async fn list_videos(&self) -> Vec<VideoRecord>;

    /// Append a record to the catalog.
    ///
    /// `true` means the backing storage accepted the record; any fault
    /// degrades to `false` and leaves the catalog as it was.
    async fn add_video(&self, video: VideoRecord) -> bool;

    /// Trade a credential pair for a session.
    ///
    /// `true` stores a token in the backend's session where one exists;
    /// `false` covers rejected credentials and unreachable endpoints
    /// alike.
    async fn authenticate(&self, email: &str, password: &str) -> bool;
}

/// Factory function to create the configured store variant.
pub async fn create_store(config: &StoreConfig) -> Result<Box<dyn VideoStore>, StoreError> {
    match config.backend {
        StoreBackend::Local => {
            let local = config.local.clone().unwrap_or_default();
            Ok(Box::new(LocalVideoStore::open(local).await?))
        }
        StoreBackend::Remote => {
            let remote = config.remote.clone().ok_or_else(|| {
                StoreError::Configuration(
                    "[store.remote] must be set when using the remote backend".to_string(),
                )
            })?;
            Ok(Box::new(RemoteVideoStore::new(remote)?))
        }
    }
}
