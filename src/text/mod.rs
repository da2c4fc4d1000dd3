//! Text canonicalisation and segmentation helpers.
//!
//! Everything in this module is a pure, total function over `&str` — no
//! errors, no I/O, no state.  The shadowing scorer builds on
//! [`normalize`] / [`split_words`]; the reading surface builds on
//! [`split_sentences`].

pub mod normalize;
pub mod sentences;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use normalize::{normalize, split_words};
pub use sentences::split_sentences;
