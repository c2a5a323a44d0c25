// src/crawl/filter.rs
// =============================================================================
// This module decides which hrefs found on a page become crawl candidates.
//
// Two steps:
// 1. resolve()     - turn a raw href into an absolute URL (or drop it)
// 2. same_origin() - keep only URLs under the page's origin
//
// Both are plain string operations. We deliberately do NOT use Url::join()
// here: "../about" or "docs" (relative without a leading slash) are dropped,
// and the same-origin check is a literal prefix test on "scheme://host".
//
// Rust concepts:
// - Option<String>: "maybe a URL" - None means the href is dropped
// - Iterator adapters: filter_map() and filter() chain resolve + same_origin
// - Lifetimes ('a): same_origin_links borrows the hrefs, it doesn't copy them
// =============================================================================

use url::Url;

// Derives the origin ("scheme://host[:port]", no path) of a URL
//
// Returns None for URLs without a tuple origin (e.g. "data:" or "file:")
//
// Examples:
//   "https://x.test/a/b?q=1"  -> Some("https://x.test")
//   "http://127.0.0.1:8080/"  -> Some("http://127.0.0.1:8080")
pub fn origin_of(url: &Url) -> Option<String> {
    // Url::origin() already drops the path and any default port
    let origin = url.origin();
    if origin.is_tuple() {
        Some(origin.ascii_serialization())
    } else {
        None
    }
}

// Resolves a raw href against an origin
//
// Parameters:
//   origin: "scheme://host" of the page the href was found on
//   href: the raw attribute value
//
// Returns: Some(absolute_url) or None if the href is not crawlable
//
// Examples:
//   "/docs"               -> Some("https://x.test/docs")
//   "https://other.test"  -> Some("https://other.test")   (unchanged)
//   "mailto:a@b", "#top", "docs/intro", "javascript:void(0)" -> None
pub fn resolve(origin: &str, href: &str) -> Option<String> {
    if href.starts_with('/') {
        // Root-relative: glue it onto the origin
        Some(format!("{}{}", origin, href))
    } else if href.starts_with("http://") || href.starts_with("https://") {
        // Already absolute: keep the exact string
        Some(href.to_string())
    } else {
        // mailto:, javascript:, "#frag", "docs/intro", ...
        None
    }
}

// True when `candidate` lives under `origin`
//
// This is a string prefix test, not a host comparison.
pub fn same_origin(origin: &str, candidate: &str) -> bool {
    candidate.starts_with(origin)
}

// Resolves and filters every href of one page in a single pass
pub fn same_origin_links<'a, I>(origin: &str, hrefs: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    hrefs
        .into_iter()
        // Step 1: drop hrefs we can't turn into an absolute URL
        .filter_map(|href| resolve(origin, href))
        // Step 2: drop URLs on other sites
        .filter(|link| same_origin(origin, link))
        .collect()
}
