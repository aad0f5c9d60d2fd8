// src/extract/links.rs
// =============================================================================
// This module extracts the links worth crawling from an HTML page.
//
// We use the `scraper` crate to find every <a href="..."> in the page, and
// the `url` crate to:
// - Resolve relative hrefs against the page URL
// - Compare the host (and explicit port) of each link with the page's
//
// Only links that stay on the same host are returned. The match is an exact
// string match: "www.example.test" and "example.test" are different hosts,
// while "http://" and "https://" links on one host are both kept.
//
// This function knows nothing about which pages were already visited or how
// many pages the crawl may still fetch. The crawl engine does that filtering.
// =============================================================================

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

use super::normalize::normalize_parsed;

// "a[href]" is a constant selector, so parsing it can't fail at runtime
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static selector is valid"));

// Extracts same-host links from an HTML page
//
// Parameters:
//   base_url: the URL the page was fetched from (for resolving relative links)
//   html: the page body
//
// Returns: normalized absolute URLs, each listed once, in the order they
//          first appear in the document
//
// Example:
//   base_url = "https://example.test/a"
//   html     = "<a href='/b?x=1'>B</a> <a href='https://other.test/'>O</a>"
//   result   = ["https://example.test/b"]
pub fn extract_links(base_url: &str, html: &str) -> Vec<String> {
    let mut links = Vec::new();

    let base = match Url::parse(base_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(base_url, error = %e, "page URL is not absolute, skipping link extraction");
            return links;
        }
    };

    let document = Html::parse_document(html);
    let mut seen = HashSet::new();

    for element in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        // join() handles absolute hrefs too: they simply replace the base
        let resolved = match base.join(href.trim()) {
            Ok(url) => url,
            Err(_) => continue,
        };

        if !same_authority(&base, &resolved) {
            continue;
        }

        let link = normalize_parsed(resolved);
        if seen.insert(link.clone()) {
            links.push(link);
        }
    }

    links
}

// Host string and explicit port must both match.
// mailto:, javascript: and friends have no host and fall out here.
fn same_authority(base: &Url, candidate: &Url) -> bool {
    candidate.host_str().is_some()
        && candidate.host_str() == base.host_str()
        && candidate.port() == base.port()
}
