//! reelrack-core: a video-catalog data layer.
//!
//! Records come from one of two interchangeable backends behind the
//! [`VideoStore`] trait: a JSON document on disk or a remote HTTP
//! endpoint. On top of the trait, [`CatalogBrowser`] reveals the catalog
//! in fixed-size batches and narrows it by tag or free text, which is all
//! an interactive consumer needs to drive.

pub mod browse;
pub mod config;
pub mod metrics;
pub mod store;
pub mod testing;

pub use browse::{BatchPager, CatalogBrowser, VideoFilter};
pub use config::{
    load_config, load_config_from_str, validate_config, BrowseConfig, Config, ConfigError,
    LocalStoreConfig, RemoteStoreConfig, StoreBackend, StoreConfig,
};
pub use store::{
    create_store, AuthSession, Catalog, LocalVideoStore, RemoteVideoStore, StoreError, VideoRecord,
    VideoStore,
};
