//! Consumer-facing facade over a store: load once, reveal in batches,
//! narrow by tag or text.

use std::sync::Arc;

use tracing::debug;

use crate::store::{VideoRecord, VideoStore};

use super::filter::VideoFilter;
use super::pager::BatchPager;

/// Drives a [`VideoStore`] for an interactive consumer.
///
/// The browser owns a full in-memory copy of the catalog plus the view,
/// the catalog after filtering. Applying or clearing a filter rebuilds
/// the view and rewinds pagination to the first batch. Batches are
/// windows over the view, so a filtered catalog paginates exactly like an
/// unfiltered one and short final batches fall out of the view length.
pub struct CatalogBrowser {
    store: Arc<dyn VideoStore>,
    catalog: Vec<VideoRecord>,
    view: Vec<VideoRecord>,
    filter: VideoFilter,
    pager: BatchPager,
}

impl CatalogBrowser {
    /// Create a browser over `store` revealing `batch_size` records per
    /// batch. The catalog is empty until [`load`](Self::load) runs.
    pub fn new(store: Arc<dyn VideoStore>, batch_size: usize) -> Self {
        Self {
            store,
            catalog: Vec::new(),
            view: Vec::new(),
            filter: VideoFilter::All,
            pager: BatchPager::new(batch_size),
        }
    }

    /// Fetch the catalog from the store, rebuild the view under the
    /// current filter and rewind pagination. Returns the catalog size.
    ///
    /// A faulting backend shows up here as an empty catalog, per the
    /// store contract.
    pub async fn load(&mut self) -> usize {
        self.catalog = self.store.list_videos().await;
        debug!("Catalog loaded with {} records", self.catalog.len());
        self.rebuild_view();
        self.catalog.len()
    }

    /// The next batch of visible records.
    ///
    /// Empty once the view is exhausted, and stays empty until a filter
    /// change or [`load`](Self::load) rewinds the cursor.
    pub fn next_batch(&mut self) -> &[VideoRecord] {
        let range = self.pager.next_range(self.view.len());
        &self.view[range]
    }

    /// Free-text search: case-insensitive substring match on titles and
    /// tags. An empty query clears the narrowing.
    pub fn search(&mut self, query: &str) {
        self.filter = VideoFilter::from_query(query);
        self.rebuild_view();
    }

    /// Narrow to records carrying exactly `tag`.
    ///
    /// The picked tag also becomes the [`active_query`](Self::active_query)
    /// value, mirroring a query box that displays what was picked.
    pub fn filter_by_tag(&mut self, tag: &str) {
        self.filter = VideoFilter::Tag(tag.to_string());
        self.rebuild_view();
    }

    /// Drop any narrowing and restore the full catalog order.
    pub fn clear_filter(&mut self) {
        self.filter = VideoFilter::All;
        self.rebuild_view();
    }

    /// Append a record through the active store.
    ///
    /// The in-memory catalog is deliberately left alone; the write becomes
    /// visible on the next [`load`](Self::load).
    pub async fn add_video(&self, video: VideoRecord) -> bool {
        self.store.add_video(video).await
    }

    /// Authenticate against the active store.
    pub async fn authenticate(&self, email: &str, password: &str) -> bool {
        self.store.authenticate(email, password).await
    }

    /// The value the consumer's query box should display.
    pub fn active_query(&self) -> &str {
        self.filter.query_text()
    }

    /// The active filter.
    pub fn filter(&self) -> &VideoFilter {
        &self.filter
    }

    /// Records in the full catalog.
    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    /// Records in the current, possibly filtered, view.
    pub fn view_len(&self) -> usize {
        self.view.len()
    }

    /// True once every visible record has been revealed.
    pub fn is_exhausted(&self) -> bool {
        self.pager.is_exhausted(self.view.len())
    }

    fn rebuild_view(&mut self) {
        self.view = self
            .catalog
            .iter()
            .filter(|v| self.filter.matches(v))
            .cloned()
            .collect();
        self.pager.reset();
        debug!(
            "View rebuilt: {} of {} records visible",
            self.view.len(),
            self.catalog.len()
        );
    }
}
