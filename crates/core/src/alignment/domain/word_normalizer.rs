use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical comparison form of a word: lowercased, canonically decomposed (NFD),
/// with everything except letters and digits removed. Combining marks count as
/// neither, so vowel points and accents fall away after decomposition.
///
/// Two words are equivalent when their normalized forms are identical.
pub fn normalize(word: &str) -> String {
    word.to_lowercase()
        .nfd()
        .filter(|&c| c.is_alphanumeric() && !is_combining_mark(c))
        .collect()
}

/// Whether two words compare equal after normalization.
pub fn equivalent(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}
