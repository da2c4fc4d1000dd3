//! Platform speech capabilities (capture and synthesis) as injectable
//! interfaces.
//!
//! Neither capability is implemented in-crate beyond stand-ins; the point
//! of this module is the seam.  The shadowing session holds an
//! `Arc<dyn SpeechCapture>` and the reading surface an
//! `Arc<dyn SpeechSynth>`, so a real platform engine slots in without
//! touching the state machine, and a missing engine degrades to a
//! reportable condition.

pub mod capture;
pub mod synth;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use capture::{CaptureError, CaptureEvent, ManualCapture, SpeechCapture, UnavailableCapture};
pub use synth::{NullSynth, SpeakRequest, SpeechSynth, SynthError, VoiceInfo};
