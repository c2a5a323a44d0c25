// src/crawl/frontier.rs
// =============================================================================
// This module implements the breadth-first crawl, one round at a time.
//
// How it works:
// 1. The "next" frontier starts as just the seed URL
// 2. Each round, "next" becomes "current" and a fresh "next" is started
// 3. Every URL in "current" that we haven't seen is fetched, and its
//    same-origin links go into "next"
// 4. After exactly max_depth + 1 rounds we stop, even if "next" is not empty
//
// Unlike a queue with a depth counter per item, rounds act as a barrier:
// everything at distance N is fetched before anything at distance N + 1.
// There is no early exit when a frontier runs dry - an empty round is a
// no-op.
//
// A page that fails to fetch never enters the visited set. It is remembered
// as unreachable so no later round tries it again.
//
// Rust concepts:
// - HashSet: frontiers and the visited set (no duplicates, O(1) lookup)
// - std::mem::take: moves "next" out and leaves an empty set in its place
// - Generics with trait bounds: crawl_site works with any PageFetcher
// - Consuming self: finish() turns the session into the result
// =============================================================================

use std::collections::{BTreeMap, HashSet};

use log::{debug, info, warn};

use super::fetch::PageFetcher;
use super::filter::same_origin_links;

// What a crawl hands back to the caller
#[derive(Debug, Clone, Default)]
pub struct CrawlResult {
    /// Every URL that was fetched successfully
    pub visited: HashSet<String>,
    /// URLs that failed to fetch, with the error message
    pub unreachable: BTreeMap<String, String>,
    /// How many rounds ran (max_depth + 1, saturating at usize::MAX)
    pub rounds: usize,
}

impl CrawlResult {
    /// Visited URLs in a stable (lexicographic) order
    pub fn sorted_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.visited.iter().cloned().collect();
        urls.sort();
        urls
    }
}

// State owned by exactly one crawl_site() call
#[derive(Debug, Default)]
struct CrawlSession {
    visited: HashSet<String>,
    unreachable: BTreeMap<String, String>,
    next: HashSet<String>,
}

impl CrawlSession {
    fn seeded(seed: &str) -> Self {
        let mut session = Self::default();
        session.next.insert(seed.to_string());
        session
    }

    fn already_seen(&self, url: &str) -> bool {
        self.visited.contains(url) || self.unreachable.contains_key(url)
    }

    fn finish(self, rounds: usize) -> CrawlResult {
        CrawlResult {
            visited: self.visited,
            unreachable: self.unreachable,
            rounds,
        }
    }
}

// Crawls from `seed`, running exactly max_depth + 1 rounds
//
// Parameters:
//   fetcher: anything that can fetch a page (real HTTP or a test double)
//   seed: the starting URL
//   max_depth: number of link hops to follow from the seed
//
// Example:
//   max_depth=0: only the seed is fetched
//   max_depth=1: the seed + the same-origin pages it links to
pub async fn crawl_site<F>(fetcher: &F, seed: &str, max_depth: usize) -> CrawlResult
where
    F: PageFetcher + ?Sized,
{
    // All crawl state lives here and dies with this call
    let mut session = CrawlSession::seeded(seed);

    // Inclusive range: max_depth + 1 rounds without computing max_depth + 1,
    // which would overflow for usize::MAX
    for round in 0..=max_depth {
        // Swap frontiers: what we found last round is what we fetch now
        let current = std::mem::take(&mut session.next);
        debug!(
            "Round {} of 0..={}: {} URL(s) in frontier",
            round,
            max_depth,
            current.len()
        );

        for url in current {
            // Seen in an earlier round (or failed there) - cheap no-op
            if session.already_seen(&url) {
                continue;
            }

            match fetcher.fetch(&url).await {
                Ok(page) => {
                    if page.final_url != url {
                        debug!("  {} redirected to {}", url, page.final_url);
                    }

                    // Filter against the origin we landed on, not the one we asked for
                    let links = same_origin_links(&page.origin, &page.hrefs);
                    info!("Crawled [round {}]: {} ({} link(s))", round, url, links.len());

                    session.visited.insert(url);
                    // Set semantics collapse links shared by several pages
                    session.next.extend(links);
                }
                Err(e) => {
                    // Not fatal: remember it so it's never fetched again
                    warn!("Skipping {}: {}", url, e);
                    session.unreachable.insert(url, e.to_string());
                }
            }
        }
    }

    session.finish(max_depth.saturating_add(1))
}
