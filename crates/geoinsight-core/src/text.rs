// crates/geoinsight-core/src/text.rs

/// Convert a string into a folded key suitable for comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Côte d'Ivoire` -> `Cote d'Ivoire`)
/// 2\) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use geoinsight_core::text::fold_key;
///
/// assert_eq!(fold_key("Türkiye"), "turkiye");
/// assert_eq!(fold_key("ÅLAND"), "aland");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Accent- and case-insensitive substring test.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    fold_key(haystack).contains(&fold_key(needle))
}

/// Number of user-perceived characters the length rules count.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}
