// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, so stdout stays a clean document)
// 3. Crawl the site breadth-first from --url for --depth hops
// 4. Print the sitemap (or JSON list) of every page reached
// 5. Exit with 0 on success, 1 on a fatal error
//
// A page that fails to load is NOT fatal - it's reported as a warning and
// left out of the sitemap. Fatal means: bad seed URL, HTTP client setup
// failure, or the output document could not be encoded.
//
// Rust concepts:
// - anyhow::Result + .context(): errors bubble up with a readable trail
// - Closures as parameters: emit() takes the renderer, so tests can pass a
//   failing one
// =============================================================================

mod cli;           // src/cli.rs - command-line parsing
mod crawl;         // src/crawl/ - fetching, link filtering, the crawl rounds
mod sitemap;       // src/sitemap.rs - XML / JSON output

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use log::{info, warn};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    crawl::validate_seed(&cli.url).context("cannot start crawl")?;

    info!("Building sitemap for {} (depth {})", cli.url, cli.depth);

    let fetcher = crawl::HttpFetcher::new(&cli.fetch_settings())
        .context("failed to create HTTP client")?;

    let result = crawl::crawl_site(&fetcher, &cli.url, cli.depth).await;

    info!(
        "Crawled {} page(s) in {} round(s)",
        result.visited.len(),
        result.rounds
    );
    if !result.unreachable.is_empty() {
        warn!("{} page(s) could not be fetched:", result.unreachable.len());
        for (url, reason) in &result.unreachable {
            warn!("   {} ({})", url, reason);
        }
    }

    let urls = result.sorted_urls();
    let mut stdout = std::io::stdout().lock();
    if cli.json {
        emit(&mut stdout, &urls, sitemap::render_json)
    } else {
        emit(&mut stdout, &urls, sitemap::render_xml)
    }
}

// Renders the whole document first, then writes it in one go
//
// If rendering fails nothing reaches `out` - no half-written sitemap.
fn emit<W, R>(out: &mut W, urls: &[String], render: R) -> Result<()>
where
    W: Write,
    R: FnOnce(&[String]) -> Result<String, sitemap::SitemapError>,
{
    let document = render(urls).context("failed to encode output")?;

    out.write_all(document.as_bytes())
        .context("failed to write output")?;
    out.flush().context("failed to write output")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sitemap::{self, SitemapError};

    fn urls() -> Vec<String> {
        vec!["https://x.test/".to_string(), "https://x.test/a".to_string()]
    }

    #[test]
    fn test_emit_writes_rendered_document() {
        let mut out = Vec::new();
        emit(&mut out, &urls(), sitemap::render_xml).unwrap();

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("<loc>https://x.test/a</loc>"));
        assert!(written.ends_with('\n'));
    }

    #[test]
    fn test_emit_writes_nothing_when_encoding_fails() {
        let mut out = Vec::new();
        let err = emit(&mut out, &urls(), |_| {
            Err(SitemapError::Xml("unsupported value".to_string()))
        })
        .unwrap_err();

        assert!(out.is_empty(), "partial output: {:?}", String::from_utf8_lossy(&out));
        assert!(format!("{:#}", err).contains("failed to encode output"));
    }
}
