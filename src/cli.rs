// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There are no subcommands: one invocation = one crawl = one sitemap.
// Every flag has a default, so `site-mapper` on its own crawls
// https://example.com three hops deep.
//
// Rust concepts:
// - Derive macros: #[derive(Parser)] generates the argument parser
// - value_parser: a plain fn that validates --depth before we ever see it
// =============================================================================

use std::time::Duration;

use clap::Parser;

use crate::crawl::{FetchSettings, DEFAULT_USER_AGENT};

// Deepest crawl the command line accepts
pub const MAX_DEPTH: usize = 1_000;

// Parses --depth, rejecting anything above MAX_DEPTH
//
// Every depth costs one round, so usize::MAX would never finish.
fn parse_depth(value: &str) -> Result<usize, String> {
    let depth: usize = value
        .parse()
        .map_err(|e| format!("'{}' is not a non-negative integer: {}", value, e))?;

    if depth > MAX_DEPTH {
        return Err(format!("depth {} is above the maximum of {}", depth, MAX_DEPTH));
    }

    Ok(depth)
}

#[derive(Parser, Debug)]
#[command(
    name = "site-mapper",
    version,
    about = "Crawl a website and print a sitemap of its same-site pages",
    long_about = "site-mapper starts at --url, follows same-site links breadth-first for --depth \
                  hops and prints every page it reached as an XML sitemap on stdout. \
                  Progress and warnings go to stderr (tune with RUST_LOG)."
)]
pub struct Cli {
    /// The URL that you want to build the sitemap for
    #[arg(long, default_value = "https://example.com")]
    pub url: String,

    /// How many link hops to follow from the starting page
    ///
    /// Depth 0 = just the starting page
    /// Depth 1 = starting page + the same-site pages it links to
    #[arg(long, default_value_t = 3, value_parser = parse_depth)]
    pub depth: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Maximum number of redirects to follow per request
    #[arg(long, default_value_t = 10)]
    pub max_redirects: usize,

    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Print the URL list as JSON instead of an XML sitemap
    #[arg(long)]
    pub json: bool,

    /// Log every round and redirect (same as RUST_LOG=debug)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            timeout: Duration::from_secs(self.timeout_secs),
            max_redirects: self.max_redirects,
            user_agent: self.user_agent.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["site-mapper"]);
        assert_eq!(cli.url, "https://example.com");
        assert_eq!(cli.depth, 3);
        assert!(!cli.json);

        let default = FetchSettings::default();
        let settings = cli.fetch_settings();
        assert_eq!(settings.timeout, default.timeout);
        assert_eq!(settings.max_redirects, default.max_redirects);
        assert_eq!(settings.user_agent, default.user_agent);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "site-mapper",
            "--url",
            "https://x.test/",
            "--depth",
            "0",
            "--timeout-secs",
            "3",
            "--json",
        ]);
        assert_eq!(cli.url, "https://x.test/");
        assert_eq!(cli.depth, 0);
        assert_eq!(cli.fetch_settings().timeout, Duration::from_secs(3));
        assert!(cli.json);
    }

    #[test]
    fn test_depth_upper_bound() {
        let max = MAX_DEPTH.to_string();
        assert_eq!(Cli::parse_from(["site-mapper", "--depth", max.as_str()]).depth, MAX_DEPTH);

        let above = (MAX_DEPTH + 1).to_string();
        assert!(Cli::try_parse_from(["site-mapper", "--depth", above.as_str()]).is_err());

        let huge = usize::MAX.to_string();
        assert!(Cli::try_parse_from(["site-mapper", "--depth", huge.as_str()]).is_err());
    }

    #[test]
    fn test_negative_depth_is_rejected() {
        assert!(Cli::try_parse_from(["site-mapper", "--depth", "-1"]).is_err());
    }
}
