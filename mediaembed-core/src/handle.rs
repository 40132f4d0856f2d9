//! Handle generation.
//!
//! Turns arbitrary text (typically a request URL) into a lowercase,
//! delimiter-separated handle. Used as the record id when a provider
//! declares no identifier field.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum handle length, in characters.
pub const MAX_HANDLE_LENGTH: usize = 255;

/// Delimiter placed between legal character runs.
const DELIMITER: char = '-';

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid regex"));

static PUNCTUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[.'"]+"#).expect("Invalid regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex"));

static LEGAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^<>?@:!-/\[-`;‘’…]+").expect("Invalid regex")
});

/// Creates a handle from `input`.
///
/// Tags and `.'"` are dropped, whitespace and every other punctuation run
/// become a single `-`, and the result is lowercased and capped at
/// [`MAX_HANDLE_LENGTH`] characters. The output is deterministic.
pub fn create_handle(input: &str) -> String {
    let stripped = TAG_RE.replace_all(input, "");
    let trimmed = stripped.trim();
    let unpunctuated = PUNCTUATION_RE.replace_all(trimmed, "");
    let delimited = WHITESPACE_RE.replace_all(&unpunctuated, DELIMITER.to_string().as_str());

    let joined = LEGAL_RE
        .find_iter(&delimited)
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string());

    let handle = joined.trim_matches(DELIMITER).to_lowercase();
    truncate_chars(&handle, MAX_HANDLE_LENGTH)
        .trim_end_matches(DELIMITER)
        .to_string()
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
