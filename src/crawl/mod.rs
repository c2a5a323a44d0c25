// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Submodules:
// - fetch: downloads a page and pulls out its raw hrefs (PageFetcher)
// - filter: turns hrefs into absolute same-origin URLs (LinkFilter)
// - frontier: the round-based breadth-first crawl itself
//
// Features:
// - Same-origin restriction (never leaves the site it was pointed at)
// - Fixed number of rounds: depth 0 = just the seed page
// - A failed page is skipped with a warning instead of aborting the crawl
//
// Rust concepts:
// - Private submodules + `pub use`: callers see crawl::crawl_site, not the
//   file it lives in
// =============================================================================

mod fetch;
mod filter;
mod frontier;

pub use fetch::{validate_seed, FetchSettings, HttpFetcher, DEFAULT_USER_AGENT};
pub use frontier::{crawl_site, CrawlResult};
