//! Accent stripping and case folding for keyword matching.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Remove diacritics from a string via NFKD decomposition, dropping
/// combining marks.
#[must_use]
pub fn strip_accents(s: &str) -> String {
    s.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Lowercase and strip accents. This is the canonical form used for
/// keyword matching across all adapters.
#[must_use]
pub fn normalize(s: &str) -> String {
    strip_accents(s).to_lowercase()
}
