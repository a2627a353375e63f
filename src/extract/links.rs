// src/extract/links.rs
// =============================================================================
// This module extracts anchor links from a fetched page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Never fails on broken markup: html5ever repairs it like a browser would
//
// We also use the `url` crate to:
// - Resolve relative links against the page's effective URL
// - Normalize `.` and `..` segments while joining
//
// Nothing is filtered here. A `mailto:` link or a fragment-only link comes
// back as-is; deciding whether it is worth fetching is the shape filter's job,
// and deduplication across pages is the frontier's job.
// =============================================================================

use crate::page::PageRecord;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

// Extracts every anchor target on a page as an absolute URL
//
// Parameters:
//   page: the fetched page (content may be missing)
//
// Returns: absolute URL strings in document order, each at most once
//
// Example:
//   content  = "<a href='../b'>B</a>"
//   base_url = "https://example.com/docs/a/"
//   result   = ["https://example.com/docs/b"]
pub fn extract_links(page: &PageRecord) -> Vec<String> {
    let (Some(base_url), Some(body)) = (page.base_url(), page.body()) else {
        return Vec::new();
    };

    // Parse the base URL once
    // Without a usable base there is nothing relative links could resolve to
    let base = match Url::parse(base_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Invalid base URL {}: {}", base_url, e);
            return Vec::new();
        }
    };

    let html = String::from_utf8_lossy(body);
    extract_from_html(&html, &base)
}

// Collects anchor targets from HTML text, resolved against `base`
fn extract_from_html(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);

    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if let Some(absolute_url) = resolve_url(base, href) {
            // First occurrence wins, later copies on the same page are dropped
            if seen.insert(absolute_url.clone()) {
                links.push(absolute_url);
            }
        }
    }

    links
}

// Resolves a possibly-relative href to an absolute URL
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs"              -> Some("https://example.com/docs")
//   href = "../other?x=1#top"   -> Some("https://example.com/other?x=1#top")
//   href = "https://other.com"  -> Some("https://other.com/")
//   href = "http://[bad"        -> None
fn resolve_url(base: &Url, href: &str) -> Option<String> {
    // join() handles absolute hrefs too: a scheme in href replaces the base
    base.join(href.trim()).ok().map(|url| url.to_string())
}
