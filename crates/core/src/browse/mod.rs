//! Incremental browsing over a loaded catalog.
//!
//! [`CatalogBrowser`] is the surface an interactive consumer drives:
//! batched reveal plus tag and text narrowing over one in-memory catalog.
//! [`BatchPager`] and [`VideoFilter`] are its moving parts, usable on
//! their own.

mod browser;
mod filter;
mod pager;

pub use browser::CatalogBrowser;
pub use filter::VideoFilter;
pub use pager::BatchPager;
