//! Comparison normalisation for shadowing.
//!
//! [`normalize`] reduces a display word to the lower-case alphanumeric form
//! used for matching a spoken attempt against the reference sentence.
//! Display rendering always uses the original token; normalisation is
//! computed on demand and never stored.

/// Canonicalise `input` for word comparison.
///
/// Lower-cases the input, then keeps only characters that are alphanumeric,
/// `_`, or whitespace.  Everything else (punctuation, quotes, symbols) is
/// dropped.  Internal whitespace runs are left alone — callers split on
/// one-or-more whitespace anyway.
///
/// Idempotent: lowercasing happens before the filter, so any multi-char
/// lowercase expansion (e.g. a combining mark produced by `İ`) is stripped
/// in the same pass and a second call is a no-op.
///
/// # Examples
///
/// ```
/// use shadow_reader::text::normalize;
///
/// assert_eq!(normalize("Hello,"), "hello");
/// assert_eq!(normalize("World!"), "world");
/// assert_eq!(normalize("it's"), "its");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}

/// Split `input` on one-or-more whitespace into display words.
///
/// Thin wrapper over `split_whitespace` so the splitting policy lives in one
/// place; never yields empty tokens.
pub fn split_words(input: &str) -> impl Iterator<Item = &str> {
    input.split_whitespace()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
