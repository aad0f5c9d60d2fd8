// src/extract/emails.rs
// =============================================================================
// Finds email-like strings in a page body.
//
// The pattern is purely syntactic:
//   local part   [A-Za-z0-9._%+-]+
//   '@'
//   domain       [A-Za-z0-9.-]+
//   '.' and a top-level label of 2+ letters
//
// Whatever the pattern accepts is an "email" for this crate, including
// false positives such as "logo@2x.png". Case is preserved, so
// "bar@example.test" and "BAR@EXAMPLE.TEST" are two distinct results.
// =============================================================================

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("static regex is valid")
});

// Returns every distinct match of the email pattern in `text`.
// Duplicates within one page collapse into a single entry.
pub fn extract_emails(text: &str) -> HashSet<String> {
    EMAIL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_finds_plain_address() {
        let emails = extract_emails("contact: foo@example.test");
        assert_eq!(emails, set(&["foo@example.test"]));
    }

    #[test]
    fn test_case_variants_are_distinct() {
        let emails = extract_emails("bar@example.test, BAR@EXAMPLE.TEST");
        assert_eq!(emails, set(&["bar@example.test", "BAR@EXAMPLE.TEST"]));
    }

    #[test]
    fn test_duplicates_collapse() {
        let emails = extract_emails("a@b.io a@b.io <b>a@b.io</b>");
        assert_eq!(emails, set(&["a@b.io"]));
    }

    #[test]
    fn test_inside_markup() {
        let html = r#"<a href="mailto:sales+eu@shop.example.co.uk">Sales</a>
                      <p>first.last%tag@sub-domain.example.org</p>"#;
        let emails = extract_emails(html);
        assert_eq!(
            emails,
            set(&["sales+eu@shop.example.co.uk", "first.last%tag@sub-domain.example.org"])
        );
    }

    #[test]
    fn test_single_letter_tld_rejected() {
        assert!(extract_emails("user@host.x").is_empty());
        assert!(extract_emails("no at sign here.com").is_empty());
    }

    #[test]
    fn test_pattern_false_positive_is_kept() {
        // image names like this match the pattern and are reported as-is
        assert_eq!(extract_emails("logo@2x.png"), set(&["logo@2x.png"]));
    }

    #[test]
    fn test_idempotent_and_order_independent() {
        let body = "<p>x@one.test</p>\n<div>y@two.test</div>";
        let reordered = "<div>y@two.test</div>   <p>x@one.test</p>";
        assert_eq!(extract_emails(body), extract_emails(body));
        assert_eq!(extract_emails(body), extract_emails(reordered));
    }

    #[test]
    fn test_empty_body() {
        assert!(extract_emails("").is_empty());
    }
}
