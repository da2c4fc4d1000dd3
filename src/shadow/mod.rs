//! Shadowing — pronunciation practice against a reference sentence.
//!
//! This module is the heart of the crate:
//!
//! * [`score`] compares a finalized transcript against the selected
//!   sentence and produces per-word [`WordFeedback`] plus an aggregate
//!   percentage ([`ScoreResult`]).
//! * [`ShadowingSession`] owns the capture lifecycle state machine
//!   ([`SessionState`]) and runs the scorer when the speech capability
//!   delivers a final transcript.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use shadow_reader::shadow::{ShadowingSession, SessionState};
//! use shadow_reader::speech::ManualCapture;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let capture = Arc::new(ManualCapture::new());
//! let mut session = ShadowingSession::new(capture.clone(), "en-US");
//!
//! session.set_reference("The quick fox");
//! session.toggle().unwrap();                    // → Listening
//! capture.push_transcript("the fox");
//!
//! let event = session.next_event().await.unwrap();
//! session.handle_event(event);                  // → Scored
//!
//! let result = session.result().unwrap();
//! assert_eq!(result.percentage, 67);
//! # }
//! ```

pub mod score;
pub mod session;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use score::{score, ScoreResult, WordFeedback, WordStatus};
pub use session::{SessionError, SessionState, ShadowingSession};
