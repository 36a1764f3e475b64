// crates/geoinsight-core/src/validate.rs

//! Submission rules for free-typed search terms.

use crate::error::ValidationError;
use crate::text::char_len;

/// Minimum number of characters a search term or suggestion query needs.
pub const MIN_QUERY_LEN: usize = 2;

/// Punctuation that can never appear in a country name typed by the user.
pub const DISALLOWED_PUNCTUATION: &[char] = &[
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '_', '+', '=', '{', '}', '[', ']', ':', ';',
    '"', '\'', '<', '>', ',', '.', '?', '/', '|', '\\',
];

/// Returns `true` for characters that disqualify a typed search term.
#[inline]
pub fn is_disallowed(c: char) -> bool {
    c.is_ascii_digit() || DISALLOWED_PUNCTUATION.contains(&c)
}

/// Validates a raw search term and returns it trimmed.
///
/// Rules are checked in order: empty after trimming, shorter than
/// [`MIN_QUERY_LEN`] characters, then any digit or disallowed punctuation.
///
/// # Examples
///
/// ```rust
/// use geoinsight_core::validate::validate_search_term;
/// use geoinsight_core::ValidationError;
///
/// assert_eq!(validate_search_term("  Germany "), Ok("Germany"));
/// assert_eq!(validate_search_term(" "), Err(ValidationError::Empty));
/// assert_eq!(validate_search_term("G3rmany"), Err(ValidationError::InvalidCharacters));
/// ```
pub fn validate_search_term(raw: &str) -> Result<&str, ValidationError> {
    let term = raw.trim();
    if term.is_empty() {
        return Err(ValidationError::Empty);
    }
    if char_len(term) < MIN_QUERY_LEN {
        return Err(ValidationError::TooShort);
    }
    if term.chars().any(is_disallowed) {
        return Err(ValidationError::InvalidCharacters);
    }
    Ok(term)
}
