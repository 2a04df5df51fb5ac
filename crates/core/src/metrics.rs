//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Store operations (listings, appends, authentication)
//! - Remote endpoint calls (round-trip durations)
//!
//! The store contract degrades faults into empty listings and `false`
//! returns, so callers never see them; these counters are where a
//! misbehaving backend becomes visible.

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Store Metrics
// =============================================================================

/// Catalog listings total by backend and result.
pub static STORE_LISTINGS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("reelrack_store_list_total", "Total catalog listings"),
        &["backend", "result"], // result: "ok", "degraded"
    )
    .unwrap()
});

/// Record appends total by backend and result.
pub static STORE_ADDS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("reelrack_store_add_total", "Total record appends"),
        &["backend", "result"], // result: "ok", "failed"
    )
    .unwrap()
});

/// Authentication attempts total by backend and result.
pub static AUTH_ATTEMPTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "reelrack_auth_attempts_total",
            "Total authentication attempts",
        ),
        &["backend", "result"], // result: "ok", "rejected"
    )
    .unwrap()
});

/// Records returned per listing.
pub static LISTING_SIZE: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "reelrack_listing_records",
            "Number of records returned per listing",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0]),
        &["backend"],
    )
    .unwrap()
});

// =============================================================================
// Remote Endpoint Metrics
// =============================================================================

/// Remote endpoint round-trip time by operation.
pub static REMOTE_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "reelrack_remote_request_duration_seconds",
            "Duration of remote store requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["operation"], // "list", "add", "auth"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Store
        Box::new(STORE_LISTINGS.clone()),
        Box::new(STORE_ADDS.clone()),
        Box::new(AUTH_ATTEMPTS.clone()),
        Box::new(LISTING_SIZE.clone()),
        // Remote endpoint
        Box::new(REMOTE_REQUEST_DURATION.clone()),
    ]
}
