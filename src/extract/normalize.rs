// src/extract/normalize.rs
// =============================================================================
// Canonical form of a URL, used as the dedup key for the whole crawl.
//
// Two URLs that differ only in their query string or fragment point at the
// same page as far as the crawler is concerned:
//   https://example.test/a?ref=nav#top  ->  https://example.test/a
//
// Relative links are NOT handled here; callers join them against the page
// URL first (see links.rs).
// =============================================================================

use url::Url;

// Returns `url` without its query and fragment.
//
// Input that the `url` crate can't parse is still accepted: it is cut at the
// first '?' or '#' and returned otherwise untouched. Running the function on
// its own output gives the same string back.
pub fn normalize(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => normalize_parsed(parsed),
        Err(_) => {
            let end = url.find(['?', '#']).unwrap_or(url.len());
            url[..end].to_string()
        }
    }
}

// Same as `normalize` for an already parsed URL (avoids a re-parse when the
// link extractor has just built it with `Url::join`).
pub(crate) fn normalize_parsed(mut url: Url) -> String {
    url.set_query(None);
    url.set_fragment(None);
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_query_and_fragment() {
        assert_eq!(
            normalize("https://example.test/a?ref=nav&x=1#top"),
            "https://example.test/a"
        );
    }

    #[test]
    fn test_leaves_plain_url_alone() {
        assert_eq!(normalize("https://example.test/a/b"), "https://example.test/a/b");
    }

    #[test]
    fn test_is_idempotent() {
        let inputs = [
            "https://example.test/a?q=1#f",
            "https://example.test",
            "http://example.test:8080/x/?#",
            "not a url?at=all#really",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input: {input}");
        }
    }

    #[test]
    fn test_malformed_passes_through() {
        assert_eq!(normalize("/relative/path?x=1"), "/relative/path");
        assert_eq!(normalize("::garbage#frag"), "::garbage");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_different_queries_collapse() {
        assert_eq!(
            normalize("https://example.test/page?a=1"),
            normalize("https://example.test/page#section")
        );
    }
}
