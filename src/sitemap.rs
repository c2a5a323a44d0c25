// src/sitemap.rs
// =============================================================================
// This module turns the crawl result into the document printed on stdout.
//
// Two formats:
// - XML sitemap (default), per https://www.sitemaps.org/protocol.html
// - JSON array of URLs (--json)
//
// The sitemap is described as plain serde structs and quick-xml writes them
// out. The document is rendered fully into memory first, so an encoding
// failure never leaves half a document on stdout.
//
// Rust concepts:
// - #[derive(Serialize)] + #[serde(rename)]: the struct IS the XML layout
// - Borrowed fields (&'a str): the sitemap points at the URLs, no copies
// - #[from]: lets `?` convert serde_json errors into SitemapError
// =============================================================================

use serde::Serialize;
use thiserror::Error;

pub const SITEMAP_XMLNS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("failed to encode sitemap XML: {0}")]
    Xml(String),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// <urlset xmlns="..."> ... </urlset>
//
// The "@" prefix tells quick-xml to write a field as an attribute
#[derive(Debug, Serialize)]
#[serde(rename = "urlset")]
struct UrlSet<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "url")]
    urls: Vec<UrlEntry<'a>>,
}

// <url><loc>https://...</loc></url>
#[derive(Debug, Serialize)]
struct UrlEntry<'a> {
    loc: &'a str,
}

// Renders the XML sitemap, declaration and trailing newline included
pub fn render_xml(urls: &[String]) -> Result<String, SitemapError> {
    let urlset = UrlSet {
        xmlns: SITEMAP_XMLNS,
        urls: urls.iter().map(|url| UrlEntry { loc: url }).collect(),
    };

    let mut body = String::new();
    let mut serializer = quick_xml::se::Serializer::new(&mut body);
    serializer.indent(' ', 2);
    urlset
        .serialize(serializer)
        .map_err(|e| SitemapError::Xml(e.to_string()))?;

    Ok(format!("{}\n{}\n", XML_DECLARATION, body))
}

// Renders the URL list as a pretty-printed JSON array
pub fn render_json(urls: &[String]) -> Result<String, SitemapError> {
    let json = serde_json::to_string_pretty(urls)?;
    Ok(format!("{}\n", json))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn test_xml_layout() {
        let xml = render_xml(&urls(&["https://x.test/", "https://x.test/a"])).unwrap();

        let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://x.test/</loc>
  </url>
  <url>
    <loc>https://x.test/a</loc>
  </url>
</urlset>
"#;
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_xml_escapes_ampersands() {
        let xml = render_xml(&urls(&["https://x.test/?a=1&b=2"])).unwrap();
        assert!(xml.contains("<loc>https://x.test/?a=1&amp;b=2</loc>"), "{}", xml);
    }

    #[test]
    fn test_xml_with_no_urls_still_has_root() {
        let xml = render_xml(&[]).unwrap();
        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.contains("urlset"));
        assert!(xml.contains(SITEMAP_XMLNS));
        assert!(xml.ends_with('\n'));
    }

    #[test]
    fn test_json_list() {
        let json = render_json(&urls(&["https://x.test/", "https://x.test/a"])).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec!["https://x.test/", "https://x.test/a"]);
        assert!(json.ends_with('\n'));
    }
}
