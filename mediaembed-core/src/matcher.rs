//! Domain matching.
//!
//! A provider is responsible for a URL when any of its domain fragments
//! occurs in the URL as a literal substring. There is no case or scheme
//! normalization; providers needing stricter rules override
//! [`EmbedProvider::is_match`](crate::EmbedProvider::is_match).

use crate::models::Domains;

/// Returns true if any domain fragment occurs within `url`.
///
/// An empty URL never matches, and blank fragments are ignored.
pub fn is_match(domains: &Domains, url: &str) -> bool {
    if url.is_empty() {
        return false;
    }
    domains
        .as_slice()
        .iter()
        .any(|domain| !domain.is_empty() && url.contains(domain.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_url_never_matches() {
        let domains = Domains::from_static(&["vimeo.com"]);
        assert!(!is_match(&domains, ""));
    }

    #[test]
    fn test_substring_match_any_fragment() {
        let domains = Domains::from_static(&["youtube.com", "youtu.be"]);
        assert!(is_match(&domains, "https://www.youtube.com/watch?v=abc"));
        assert!(is_match(&domains, "https://youtu.be/abc"));
        assert!(!is_match(&domains, "https://vimeo.com/123"));
    }

    #[test]
    fn test_match_is_not_anchored() {
        let domains = Domains::one("vimeo.com");
        // The fragment may appear anywhere, not just in the host.
        assert!(is_match(&domains, "https://example.org/?ref=vimeo.com"));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let domains = Domains::one("vimeo.com");
        assert!(!is_match(&domains, "https://VIMEO.COM/123"));
    }

    #[test]
    fn test_blank_fragment_ignored() {
        let domains = Domains::Many(vec![String::new()]);
        assert!(!is_match(&domains, "https://anything.example"));
    }
}
