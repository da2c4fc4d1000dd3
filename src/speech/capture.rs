//! Speech-capture capability interface.
//!
//! # Overview
//!
//! [`SpeechCapture`] abstracts a platform speech recognizer behind an
//! object-safe, `Send + Sync` trait so the shadowing session can be driven
//! and tested without any concrete recognition engine.  The engine's
//! asynchronous callbacks are modelled as an explicit event enum
//! ([`CaptureEvent`]) delivered over a `tokio::sync::mpsc` channel that the
//! caller supplies to [`start`](SpeechCapture::start).
//!
//! Two implementations ship with the crate:
//!
//! * [`ManualCapture`] — transcripts are pushed in by the hosting surface
//!   (the terminal front-end's stand-in recognizer, and the test double).
//! * [`UnavailableCapture`] — always reports that recognition is missing;
//!   used when no recognizer can be wired up, so the absence surfaces as a
//!   reportable condition instead of a crash.

use std::sync::Mutex;

use thiserror::Error;
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// CaptureEvent
// ---------------------------------------------------------------------------

/// Events delivered by a capture engine for one open session.
///
/// A well-behaved engine sends at most one `FinalTranscript` or `Error`,
/// followed by `End`.  `End` without a preceding transcript means the
/// session closed silently (e.g. no speech detected).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// Recognition finished with a final transcript.
    FinalTranscript(String),
    /// The engine failed mid-session.
    Error(String),
    /// The session ended.
    End,
}

// ---------------------------------------------------------------------------
// CaptureError
// ---------------------------------------------------------------------------

/// Errors reported synchronously when opening a capture session.
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    /// No speech-recognition capability exists on this platform.
    #[error("speech recognition is not available on this platform")]
    Unavailable,

    /// The engine exists but refused to open a session.
    #[error("failed to open capture session: {0}")]
    Start(String),
}

// ---------------------------------------------------------------------------
// SpeechCapture trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for speech-capture engines.
///
/// # Contract
///
/// - At most one session is open per engine instance; the session
///   controller enforces this and the engine may assume it.
/// - After [`stop`](SpeechCapture::stop) the engine must not deliver
///   further events for the stopped session (the controller additionally
///   drops its receiver, so a straggler has nowhere to land).
/// - `locale` is a BCP-47 tag (this reader always passes an English
///   variant); engines may ignore it.
pub trait SpeechCapture: Send + Sync {
    /// Open a capture session, delivering events into `events`.
    fn start(&self, locale: &str, events: mpsc::Sender<CaptureEvent>) -> Result<(), CaptureError>;

    /// Cancel the open session, if any.  Idempotent.
    fn stop(&self);
}

// Compile-time assertion: Box<dyn SpeechCapture> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SpeechCapture>) {}
};

// ---------------------------------------------------------------------------
// ManualCapture
// ---------------------------------------------------------------------------

/// Capture engine whose "recognition" is fed in by the hosting surface.
///
/// The terminal front-end uses this as its recognizer: the user types what
/// they said and [`push_transcript`](ManualCapture::push_transcript) plays
/// the role of the engine's final-result callback.  Tests use it the same
/// way.
///
/// A pushed transcript (or error) closes the session, mirroring a
/// single-shot recognizer that stops after one final result.
#[derive(Default)]
pub struct ManualCapture {
    session: Mutex<Option<mpsc::Sender<CaptureEvent>>>,
}

impl ManualCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a capture session is currently open.
    pub fn is_open(&self) -> bool {
        self.session.lock().unwrap().is_some()
    }

    /// Deliver a final transcript followed by `End`, closing the session.
    ///
    /// Returns `false` when no session is open (the push is dropped, just
    /// as a real engine's late callback would be).
    pub fn push_transcript(&self, text: impl Into<String>) -> bool {
        self.finish_with(CaptureEvent::FinalTranscript(text.into()))
    }

    /// Deliver an engine error followed by `End`, closing the session.
    pub fn push_error(&self, reason: impl Into<String>) -> bool {
        self.finish_with(CaptureEvent::Error(reason.into()))
    }

    /// End the session with no transcript (silence / no speech detected).
    pub fn end(&self) -> bool {
        let Some(tx) = self.session.lock().unwrap().take() else {
            return false;
        };
        send(&tx, CaptureEvent::End)
    }

    fn finish_with(&self, event: CaptureEvent) -> bool {
        let Some(tx) = self.session.lock().unwrap().take() else {
            log::debug!("capture: push with no open session — dropped");
            return false;
        };
        let delivered = send(&tx, event);
        send(&tx, CaptureEvent::End);
        delivered
    }
}

/// Non-blocking send; the controller's channel is never held full for long,
/// and a dropped receiver just means the session was reset.
fn send(tx: &mpsc::Sender<CaptureEvent>, event: CaptureEvent) -> bool {
    match tx.try_send(event) {
        Ok(()) => true,
        Err(e) => {
            log::debug!("capture: event not delivered ({e})");
            false
        }
    }
}

impl SpeechCapture for ManualCapture {
    fn start(&self, locale: &str, events: mpsc::Sender<CaptureEvent>) -> Result<(), CaptureError> {
        log::debug!("capture: session opened (locale={locale})");
        let mut session = self.session.lock().unwrap();
        if session.is_some() {
            log::warn!("capture: start while a session was open — replacing it");
        }
        *session = Some(events);
        Ok(())
    }

    fn stop(&self) {
        if self.session.lock().unwrap().take().is_some() {
            log::debug!("capture: session cancelled");
        }
    }
}

// ---------------------------------------------------------------------------
// UnavailableCapture
// ---------------------------------------------------------------------------

/// Capture engine stub for platforms with no recognizer.
///
/// Every [`start`](SpeechCapture::start) fails with
/// [`CaptureError::Unavailable`]; the session controller surfaces that to
/// the user and stays idle.
#[derive(Debug, Default)]
pub struct UnavailableCapture;

impl SpeechCapture for UnavailableCapture {
    fn start(&self, _locale: &str, _events: mpsc::Sender<CaptureEvent>) -> Result<(), CaptureError> {
        Err(CaptureError::Unavailable)
    }

    fn stop(&self) {}
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pushed_transcript_arrives_then_end() {
        let capture = ManualCapture::new();
        let (tx, mut rx) = mpsc::channel(8);

        capture.start("en-US", tx).unwrap();
        assert!(capture.push_transcript("hello"));

        assert_eq!(
            rx.recv().await,
            Some(CaptureEvent::FinalTranscript("hello".into()))
        );
        assert_eq!(rx.recv().await, Some(CaptureEvent::End));
        // Sender was dropped when the session closed.
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn pushed_error_arrives_then_end() {
        let capture = ManualCapture::new();
        let (tx, mut rx) = mpsc::channel(8);

        capture.start("en-US", tx).unwrap();
        assert!(capture.push_error("mic permission denied"));

        assert_eq!(
            rx.recv().await,
            Some(CaptureEvent::Error("mic permission denied".into()))
        );
        assert_eq!(rx.recv().await, Some(CaptureEvent::End));
    }

    #[tokio::test]
    async fn end_without_transcript_closes_session() {
        let capture = ManualCapture::new();
        let (tx, mut rx) = mpsc::channel(8);

        capture.start("en-US", tx).unwrap();
        assert!(capture.end());
        assert!(!capture.is_open());

        assert_eq!(rx.recv().await, Some(CaptureEvent::End));
    }

    #[test]
    fn push_with_no_session_is_dropped() {
        let capture = ManualCapture::new();
        assert!(!capture.push_transcript("lost"));
        assert!(!capture.push_error("lost"));
        assert!(!capture.end());
    }

    #[test]
    fn stop_is_idempotent() {
        let capture = ManualCapture::new();
        let (tx, _rx) = mpsc::channel(8);
        capture.start("en-US", tx).unwrap();

        capture.stop();
        capture.stop();
        assert!(!capture.is_open());
    }

    #[test]
    fn transcript_is_a_single_final_result() {
        let capture = ManualCapture::new();
        let (tx, _rx) = mpsc::channel(8);
        capture.start("en-US", tx).unwrap();

        assert!(capture.push_transcript("first"));
        // Session closed by the first push; a second push has no session.
        assert!(!capture.push_transcript("second"));
    }

    #[test]
    fn unavailable_capture_reports_unavailable() {
        let capture = UnavailableCapture;
        let (tx, _rx) = mpsc::channel(8);
        let err = capture.start("en-US", tx).unwrap_err();
        assert!(matches!(err, CaptureError::Unavailable));
    }

    #[test]
    fn box_dyn_speech_capture_compiles() {
        // If this test compiles, the trait is object-safe.
        let engine: Box<dyn SpeechCapture> = Box::new(ManualCapture::new());
        engine.stop();
    }
}
