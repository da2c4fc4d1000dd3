//! shadow-reader — a terminal reading companion for language learners.
//!
//! The crate ingests a document, paginates its text, and layers three
//! learning affordances over the reading flow:
//!
//! * **Explanation** — a selected sentence is sent to an LLM "teacher"
//!   ([`explain`]).
//! * **Listening** — the sentence can be spoken aloud through a synthesis
//!   capability ([`speech::synth`]).
//! * **Shadowing** — the learner repeats the sentence; a capture
//!   capability produces a transcript that is scored word-by-word against
//!   the reference ([`shadow`]).
//!
//! The shadowing core (normaliser, scorer, session state machine) is pure
//! and synchronous; everything platform-specific — recognition, synthesis,
//! document decoding — sits behind injectable `Send + Sync` traits with
//! in-crate stand-ins, so the whole flow is testable without any platform
//! API.
//!
//! # Module map
//!
//! | Module | Role |
//! |--------|------|
//! | [`text`] | normalisation, word/sentence splitting |
//! | [`shadow`] | scorer + session state machine (the core) |
//! | [`speech`] | capture/synthesis capability interfaces |
//! | [`explain`] | LLM explanation client |
//! | [`document`] | extraction seam, page assembly, pagination |
//! | [`library`] | book metadata + reading progress persistence |
//! | [`reader`] | open book, page cursor, sentence selection |
//! | [`config`] | settings (TOML) + platform paths |

pub mod config;
pub mod document;
pub mod explain;
pub mod library;
pub mod reader;
pub mod shadow;
pub mod speech;
pub mod text;
