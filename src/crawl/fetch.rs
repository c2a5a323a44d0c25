// src/crawl/fetch.rs
// =============================================================================
// This module fetches a page and reports what the crawler needs from it:
// - the final URL (after following redirects)
// - the origin of that final URL ("scheme://host")
// - the raw href values of every <a href> on the page
//
// The crawler only talks to the PageFetcher trait, so tests can swap the real
// HTTP fetcher for an in-memory one.
//
// Rust concepts:
// - Traits + async_trait: an async "interface" with swappable implementations
// - thiserror: typed error enums with Display generated for us
// =============================================================================

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use thiserror::Error;
use url::Url;

use super::filter::origin_of;

pub const DEFAULT_USER_AGENT: &str = concat!("site-mapper/", env!("CARGO_PKG_VERSION"));

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("constant selector is valid"));

// Everything that can go wrong while fetching one page
//
// None of these abort the crawl - the crawler logs them and moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL could not be parsed, or has no scheme://host origin
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Connection, timeout, TLS, redirect-loop or body read failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered, but not with a 2xx
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}

// The result of fetching one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Where we ended up after redirects
    pub final_url: String,
    /// "scheme://host" of final_url - links are filtered against this
    pub origin: String,
    /// Raw href attribute values, unresolved and unfiltered
    pub hrefs: Vec<String>,
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

// HTTP client settings, filled in from the command line
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_redirects: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

// The real fetcher, backed by one reused reqwest Client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.max_redirects))
            .user_agent(settings.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self.client.get(url).send().await?;

        // response.url() is the URL after redirects, not the one we asked for
        let final_url = response.url().clone();

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let origin = origin_of(&final_url).ok_or_else(|| FetchError::InvalidUrl {
            url: final_url.to_string(),
            reason: "no scheme://host origin".to_string(),
        })?;

        let body = response.text().await?;

        Ok(FetchedPage {
            final_url: final_url.to_string(),
            origin,
            hrefs: extract_hrefs(&body),
        })
    }
}

// Pulls the raw href value out of every <a href="..."> element
//
// html5ever never fails on malformed markup, it just recovers. Garbage in
// means fewer (or zero) links out.
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}

// Checks that a seed is an absolute http(s) URL before we start crawling
pub fn validate_seed(seed: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(seed).map_err(|e| FetchError::InvalidUrl {
        url: seed.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::InvalidUrl {
            url: seed.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}
