//! Search and tag filtering over catalog records.

use crate::store::VideoRecord;

/// The active narrowing applied to the catalog.
///
/// Tag picks and typed queries share one input slot in the consumer, so
/// only one mode is ever active; applying either replaces the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VideoFilter {
    /// No narrowing: the full catalog in insertion order.
    #[default]
    All,
    /// Exact, case-sensitive membership test against the tag set.
    Tag(String),
    /// Case-insensitive substring match on the title or any tag.
    Text(String),
}

impl VideoFilter {
    /// Filter for a typed query. An empty query clears the narrowing.
    pub fn from_query(query: &str) -> Self {
        if query.is_empty() {
            VideoFilter::All
        } else {
            VideoFilter::Text(query.to_string())
        }
    }

    /// True when the record passes the filter.
    pub fn matches(&self, video: &VideoRecord) -> bool {
        match self {
            VideoFilter::All => true,
            VideoFilter::Tag(tag) => video.tags.contains(tag),
            VideoFilter::Text(query) => {
                let needle = query.to_lowercase();
                video.title.to_lowercase().contains(&needle)
                    || video
                        .tags
                        .iter()
                        .any(|tag| tag.to_lowercase().contains(&needle))
            }
        }
    }

    /// What the consumer's query box shows for this filter: the typed
    /// text, the picked tag's name, or nothing.
    pub fn query_text(&self) -> &str {
        match self {
            VideoFilter::All => "",
            VideoFilter::Tag(tag) => tag,
            VideoFilter::Text(query) => query,
        }
    }

    /// True when any narrowing is active.
    pub fn is_active(&self) -> bool {
        !matches!(self, VideoFilter::All)
    }
}
