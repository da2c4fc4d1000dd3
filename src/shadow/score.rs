//! Word-level scoring of a spoken attempt against a reference sentence.
//!
//! The matcher is bag-of-words containment, not positional alignment: each
//! reference word is looked up among the spoken words without consuming a
//! match.  That is deliberately lenient for beginners — word order does not
//! matter, and a reference word repeated three times is credited three
//! times if it was spoken once.  Tests pin this behaviour.

use crate::text::{normalize, split_words};

// ---------------------------------------------------------------------------
// WordStatus / WordFeedback
// ---------------------------------------------------------------------------

/// Whether a reference word was found in the spoken attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordStatus {
    /// The word's normalised form appeared among the spoken words.
    Ok,
    /// The word was not heard.
    Missed,
}

/// Per-word verdict, one entry per reference word in original order.
///
/// `display_word` keeps the original casing and punctuation so it can be
/// rendered back exactly as it appears in the book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordFeedback {
    pub display_word: String,
    pub status: WordStatus,
}

// ---------------------------------------------------------------------------
// ScoreResult
// ---------------------------------------------------------------------------

/// Outcome of one scoring pass.
///
/// Produced fresh on every pass and superseded wholesale — never mutated
/// in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreResult {
    /// One entry per reference word, in reference order.
    pub feedback: Vec<WordFeedback>,
    /// Matched words as a rounded percentage of reference words, 0–100.
    pub percentage: u8,
}

impl ScoreResult {
    /// Number of reference words credited as spoken.
    pub fn matched(&self) -> usize {
        self.feedback
            .iter()
            .filter(|f| f.status == WordStatus::Ok)
            .count()
    }
}

// ---------------------------------------------------------------------------
// score
// ---------------------------------------------------------------------------

/// Score `transcript` against `reference`.
///
/// Total function — any pair of strings, including empty ones, produces a
/// result.  The reference is split unnormalised so the feedback carries the
/// original display words; each word is normalised individually for the
/// membership test against the normalised spoken words.
///
/// An empty reference yields empty feedback and 0% (the divisor is floored
/// at 1).  The percentage is clamped to 100 as a guard; with containment
/// matching the match count can never exceed the reference count.
///
/// # Examples
///
/// ```
/// use shadow_reader::shadow::{score, WordStatus};
///
/// let result = score("Hello, World!", "hello world");
/// assert_eq!(result.percentage, 100);
/// assert!(result.feedback.iter().all(|f| f.status == WordStatus::Ok));
/// ```
pub fn score(reference: &str, transcript: &str) -> ScoreResult {
    let normalized_transcript = normalize(transcript);
    let spoken: Vec<&str> = split_words(&normalized_transcript).collect();

    let feedback: Vec<WordFeedback> = split_words(reference)
        .map(|word| {
            let normalized = normalize(word);
            let status = if spoken.contains(&normalized.as_str()) {
                WordStatus::Ok
            } else {
                WordStatus::Missed
            };
            WordFeedback {
                display_word: word.to_string(),
                status,
            }
        })
        .collect();

    let matched = feedback
        .iter()
        .filter(|f| f.status == WordStatus::Ok)
        .count();
    let divisor = feedback.len().max(1);
    let percentage = ((matched as f64 / divisor as f64) * 100.0).round() as u8;

    ScoreResult {
        feedback,
        percentage: percentage.min(100),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
