//! Text normalization shared by every analysis path.
//!
//! Both the pronunciation scorer and the correction engine compare text at
//! the word level, so they first pass their inputs through the same
//! normalization: case folding, punctuation stripping, and whitespace
//! collapsing. Keeping this in one place guarantees that "Cat, bat, hat"
//! and "cat bat hat" tokenize identically on both sides of a comparison.
//!
//! All functions here are total: empty or garbage input yields empty
//! output, never an error.

/// Normalize text for comparison.
///
/// Lower-cases the input, removes every character that is neither
/// alphanumeric nor whitespace, collapses whitespace runs to a single
/// space, and trims the ends.
///
/// # Examples
///
/// ```rust
/// use libfluency::normalize::normalize;
///
/// assert_eq!(normalize("Hello, World!  How are you?"), "hello world how are you");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split text into normalized word tokens.
///
/// Applies [`normalize`] and splits on spaces, dropping empty tokens.
/// Empty input yields an empty list.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(|w| w.to_string())
        .collect()
}

/// Number of normalized word tokens in `text`.
#[inline]
pub fn word_count(text: &str) -> usize {
    normalize(text).split_whitespace().count()
}

/// Number of Unicode codepoints in `s`.
#[inline]
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}
