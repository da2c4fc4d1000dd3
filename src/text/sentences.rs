//! Sentence segmentation for the selection surface.
//!
//! Page text arrives as one flat string (see `document::assemble`); the
//! reader offers individual sentences for explanation and shadowing.  The
//! splitter is deliberately simple — terminator runs (`.`, `!`, `?`, `…`)
//! end a sentence and stay attached to it.

/// Split `text` into trimmed sentences.
///
/// A sentence ends after a run of terminator characters; the terminators
/// are kept as part of the sentence so the display text reads naturally.
/// Whitespace-only fragments are dropped.  Text without any terminator
/// comes back as a single sentence.
///
/// # Examples
///
/// ```
/// use shadow_reader::text::split_sentences;
///
/// let s = split_sentences("Good morning. How are you? Fine!");
/// assert_eq!(s, vec!["Good morning.", "How are you?", "Fine!"]);
/// ```
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut in_terminator = false;

    for c in text.chars() {
        let is_terminator = matches!(c, '.' | '!' | '?' | '…');

        // A terminator run has just ended — flush the finished sentence.
        if in_terminator && !is_terminator {
            flush(&mut current, &mut sentences);
        }

        current.push(c);
        in_terminator = is_terminator;
    }
    flush(&mut current, &mut sentences);

    sentences
}

fn flush(current: &mut String, sentences: &mut Vec<String>) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    current.clear();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
