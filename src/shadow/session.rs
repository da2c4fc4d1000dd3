//! Shadowing session controller — the capture → score state machine.
//!
//! [`ShadowingSession`] owns the [`SessionState`] and is the only writer to
//! it.  The state machine is:
//!
//! ```text
//! Idle ──toggle (capability ok)──▶ Listening
//! Idle ──toggle (unavailable)───▶ Idle          (error returned to caller)
//! Listening ──FinalTranscript──▶ Scored        (scorer runs, result stored)
//! Listening ──Error────────────▶ Errored       (reason stored, no retry)
//! Listening ──End──────────────▶ Idle          (no transcript, no score)
//! Listening ──toggle───────────▶ Idle          (cancel; never two sessions)
//! any ──set_reference──────────▶ Idle          (capture cancelled, result
//!                                               and transcript discarded)
//! ```
//!
//! Every capture session gets a **fresh** event channel; resetting the
//! session drops the receiver, so an engine callback that arrives late has
//! nowhere to land.  [`handle_event`](ShadowingSession::handle_event)
//! additionally ignores events outside `Listening`.
//!
//! The reference sentence cannot change while `Listening` without a reset,
//! so a finalized transcript always scores against the reference that was
//! active when capture started.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::speech::{CaptureError, CaptureEvent, SpeechCapture};

use super::score::{score, ScoreResult};

/// Capacity of a capture session's event channel.  A single-shot session
/// delivers at most a handful of events.
const EVENT_CHANNEL_CAPACITY: usize = 8;

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// States of a shadowing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No capture open, no pending work.
    Idle,
    /// A capture session is open; waiting on the engine.
    Listening,
    /// A transcript was scored; the result is available.
    Scored,
    /// The engine failed mid-session; restart is manual.
    Errored,
}

impl SessionState {
    /// A short human-readable label for a status line.
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Idle => "Idle",
            SessionState::Listening => "Listening",
            SessionState::Scored => "Scored",
            SessionState::Errored => "Error",
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Idle
    }
}

// ---------------------------------------------------------------------------
// SessionError
// ---------------------------------------------------------------------------

/// Errors reported synchronously by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Capture was requested with no reference sentence selected.
    #[error("no reference sentence selected")]
    NoReference,

    /// The capture capability refused to open a session.
    #[error(transparent)]
    Capture(#[from] CaptureError),
}

// ---------------------------------------------------------------------------
// ShadowingSession
// ---------------------------------------------------------------------------

/// Orchestrates one shadowing attempt at a time against the selected
/// reference sentence.
///
/// Construct with [`new`](Self::new), select a sentence with
/// [`set_reference`](Self::set_reference), then drive with
/// [`toggle`](Self::toggle) and feed engine events through
/// [`handle_event`](Self::handle_event) (usually via
/// [`next_event`](Self::next_event) in an async loop).
pub struct ShadowingSession {
    capture: Arc<dyn SpeechCapture>,
    locale: String,
    state: SessionState,
    reference: Option<String>,
    transcript: Option<String>,
    result: Option<ScoreResult>,
    error: Option<String>,
    /// Receiver for the current capture session's events; `None` when no
    /// session has been opened since the last reset.
    events: Option<mpsc::Receiver<CaptureEvent>>,
}

impl ShadowingSession {
    pub fn new(capture: Arc<dyn SpeechCapture>, locale: impl Into<String>) -> Self {
        Self {
            capture,
            locale: locale.into(),
            state: SessionState::Idle,
            reference: None,
            transcript: None,
            result: None,
            error: None,
            events: None,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// The finalized transcript of the last scored attempt.
    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    /// The result of the last scoring pass; superseded wholesale by each
    /// new attempt.
    pub fn result(&self) -> Option<&ScoreResult> {
        self.result.as_ref()
    }

    /// Engine failure reason when `state() == Errored`.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_listening(&self) -> bool {
        self.state == SessionState::Listening
    }

    // -----------------------------------------------------------------------
    // Reference changes
    // -----------------------------------------------------------------------

    /// Select a new reference sentence.
    ///
    /// Always resets to `Idle`: an open capture is cancelled first so the
    /// engine cannot deliver a late callback into the new session, then any
    /// previous score and transcript are discarded.
    pub fn set_reference(&mut self, text: impl Into<String>) {
        self.reset();
        let text = text.into();
        log::debug!("session: reference set ({} chars)", text.len());
        self.reference = Some(text);
    }

    /// Drop the selected sentence entirely (e.g. the page was turned).
    pub fn clear_reference(&mut self) {
        self.reset();
        self.reference = None;
    }

    fn reset(&mut self) {
        if self.state == SessionState::Listening {
            log::debug!("session: reset while listening — cancelling capture");
            self.capture.stop();
        }
        // Dropping the receiver orphans any event still in flight.
        self.events = None;
        self.transcript = None;
        self.result = None;
        self.error = None;
        self.state = SessionState::Idle;
    }

    // -----------------------------------------------------------------------
    // Capture control
    // -----------------------------------------------------------------------

    /// Start capture, or cancel it when already listening.
    ///
    /// Toggle semantics guarantee a single open capture session: a second
    /// start request while `Listening` stops the open session and returns
    /// to `Idle` without scoring.  Starting discards the previous result
    /// and transcript.  A capability failure is returned synchronously and
    /// leaves the session `Idle`.
    pub fn toggle(&mut self) -> Result<SessionState, SessionError> {
        if self.state == SessionState::Listening {
            log::debug!("session: toggle while listening — cancelling");
            self.capture.stop();
            self.events = None;
            self.state = SessionState::Idle;
            return Ok(self.state);
        }

        if self.reference.is_none() {
            return Err(SessionError::NoReference);
        }

        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        self.capture.start(&self.locale, tx)?;

        self.transcript = None;
        self.result = None;
        self.error = None;
        self.events = Some(rx);
        self.state = SessionState::Listening;
        log::debug!("session: capture started (locale={})", self.locale);

        Ok(self.state)
    }

    // -----------------------------------------------------------------------
    // Event handling
    // -----------------------------------------------------------------------

    /// Await the next event of the current capture session.
    ///
    /// Returns `None` when no session channel is open.  If the engine hangs
    /// up without sending `End` while we are still `Listening`, the session
    /// falls back to `Idle` — equivalent to an end with no transcript.
    pub async fn next_event(&mut self) -> Option<CaptureEvent> {
        let rx = self.events.as_mut()?;
        match rx.recv().await {
            Some(event) => Some(event),
            None => {
                self.events = None;
                if self.state == SessionState::Listening {
                    log::warn!("session: capture channel closed mid-session");
                    self.state = SessionState::Idle;
                }
                None
            }
        }
    }

    /// Non-blocking variant of [`next_event`](Self::next_event) for
    /// command-driven hosts: returns a pending event or `None` right away.
    pub fn try_next_event(&mut self) -> Option<CaptureEvent> {
        use tokio::sync::mpsc::error::TryRecvError;

        let rx = self.events.as_mut()?;
        match rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.events = None;
                if self.state == SessionState::Listening {
                    log::warn!("session: capture channel closed mid-session");
                    self.state = SessionState::Idle;
                }
                None
            }
        }
    }

    /// Whether [`next_event`](Self::next_event) has a channel to poll.
    pub fn has_open_channel(&self) -> bool {
        self.events.is_some()
    }

    /// Consume one engine event.
    ///
    /// Events are only meaningful while `Listening`; anything else is a
    /// late or duplicate callback and is discarded.
    pub fn handle_event(&mut self, event: CaptureEvent) {
        if self.state != SessionState::Listening {
            log::debug!("session: event in state {:?} ignored", self.state);
            return;
        }

        match event {
            CaptureEvent::FinalTranscript(text) => {
                // Invariant: Listening implies a reference is set (toggle
                // refuses to start without one, and set_reference resets).
                let reference = self.reference.as_deref().unwrap_or("");
                let result = score(reference, &text);
                log::info!(
                    "session: scored {}% ({}/{} words)",
                    result.percentage,
                    result.matched(),
                    result.feedback.len()
                );
                self.transcript = Some(text);
                self.result = Some(result);
                self.state = SessionState::Scored;
            }
            CaptureEvent::Error(reason) => {
                log::error!("session: capture error: {reason}");
                self.error = Some(reason);
                self.state = SessionState::Errored;
            }
            CaptureEvent::End => {
                log::debug!("session: capture ended with no transcript");
                self.state = SessionState::Idle;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shadow::score::WordStatus;
    use crate::speech::{ManualCapture, UnavailableCapture};

    fn make_session() -> (Arc<ManualCapture>, ShadowingSession) {
        let capture = Arc::new(ManualCapture::new());
        let session = ShadowingSession::new(capture.clone(), "en-US");
        (capture, session)
    }

    /// Drain and apply every pending engine event.
    async fn pump(session: &mut ShadowingSession) {
        while session.has_open_channel() {
            match session.next_event().await {
                Some(event) => session.handle_event(event),
                None => break,
            }
        }
    }

    // ---- initial state / guards ---

    #[test]
    fn starts_idle_with_nothing_stored() {
        let (_capture, session) = make_session();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.reference().is_none());
        assert!(session.result().is_none());
        assert!(session.error_message().is_none());
    }

    #[test]
    fn toggle_without_reference_is_refused() {
        let (capture, mut session) = make_session();
        let err = session.toggle().unwrap_err();
        assert!(matches!(err, SessionError::NoReference));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!capture.is_open());
    }

    #[test]
    fn unavailable_capability_is_reported_and_stays_idle() {
        let mut session = ShadowingSession::new(Arc::new(UnavailableCapture), "en-US");
        session.set_reference("Good morning");

        let err = session.toggle().unwrap_err();
        assert!(matches!(
            err,
            SessionError::Capture(CaptureError::Unavailable)
        ));
        assert_eq!(session.state(), SessionState::Idle);
    }

    // ---- happy path ---

    #[tokio::test]
    async fn transcript_scores_and_moves_to_scored() {
        let (capture, mut session) = make_session();
        session.set_reference("The quick fox");

        assert_eq!(session.toggle().unwrap(), SessionState::Listening);
        capture.push_transcript("the fox");
        pump(&mut session).await;

        assert_eq!(session.state(), SessionState::Scored);
        assert_eq!(session.transcript(), Some("the fox"));

        let result = session.result().expect("score stored");
        assert_eq!(result.percentage, 67);
        let statuses: Vec<WordStatus> = result.feedback.iter().map(|f| f.status).collect();
        assert_eq!(
            statuses,
            vec![WordStatus::Ok, WordStatus::Missed, WordStatus::Ok]
        );
    }

    #[tokio::test]
    async fn engine_error_moves_to_errored_with_reason() {
        let (capture, mut session) = make_session();
        session.set_reference("Good morning");
        session.toggle().unwrap();

        capture.push_error("audio device lost");
        pump(&mut session).await;

        assert_eq!(session.state(), SessionState::Errored);
        assert_eq!(session.error_message(), Some("audio device lost"));
        assert!(session.result().is_none());
    }

    #[tokio::test]
    async fn end_without_transcript_returns_to_idle() {
        let (capture, mut session) = make_session();
        session.set_reference("Good morning");
        session.toggle().unwrap();

        capture.end();
        pump(&mut session).await;

        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.result().is_none());
    }

    // ---- toggle semantics / single session ---

    #[tokio::test]
    async fn second_toggle_cancels_instead_of_double_opening() {
        let (capture, mut session) = make_session();
        session.set_reference("Good morning");

        session.toggle().unwrap();
        assert!(capture.is_open());

        // Second start request while listening = stop, no scoring.
        assert_eq!(session.toggle().unwrap(), SessionState::Idle);
        assert!(!capture.is_open());
        assert!(session.result().is_none());
    }

    #[tokio::test]
    async fn restart_after_scoring_discards_previous_result() {
        let (capture, mut session) = make_session();
        session.set_reference("go go go");

        session.toggle().unwrap();
        capture.push_transcript("go");
        pump(&mut session).await;
        assert!(session.result().is_some());

        // New attempt begins with a clean slate.
        assert_eq!(session.toggle().unwrap(), SessionState::Listening);
        assert!(session.result().is_none());
        assert!(session.transcript().is_none());
    }

    // ---- reference changes + late callbacks ---

    #[tokio::test]
    async fn reference_change_while_listening_resets_and_orphans_callbacks() {
        let (capture, mut session) = make_session();
        session.set_reference("The quick fox");
        session.toggle().unwrap();

        session.set_reference("A different sentence");
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!capture.is_open(), "capture must be cancelled on reset");
        assert!(session.result().is_none());

        // A late engine callback after the reset is dropped outright.
        assert!(!capture.push_transcript("the quick fox"));
        assert!(session.result().is_none());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn reference_change_after_scoring_discards_result() {
        let (capture, mut session) = make_session();
        session.set_reference("Good morning");
        session.toggle().unwrap();
        capture.push_transcript("good morning");
        pump(&mut session).await;
        assert_eq!(session.state(), SessionState::Scored);

        session.set_reference("Another one");
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.result().is_none());
        assert!(session.transcript().is_none());
    }

    #[test]
    fn clear_reference_resets_everything() {
        let (_capture, mut session) = make_session();
        session.set_reference("Good morning");
        session.clear_reference();

        assert!(session.reference().is_none());
        assert!(matches!(session.toggle(), Err(SessionError::NoReference)));
    }

    // ---- stale events / channel hang-up ---

    #[test]
    fn events_outside_listening_are_ignored() {
        let (_capture, mut session) = make_session();
        session.set_reference("Good morning");

        session.handle_event(CaptureEvent::FinalTranscript("good morning".into()));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.result().is_none());

        session.handle_event(CaptureEvent::Error("late failure".into()));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.error_message().is_none());
    }

    #[tokio::test]
    async fn stale_end_after_scoring_does_not_disturb_result() {
        let (capture, mut session) = make_session();
        session.set_reference("Good morning");
        session.toggle().unwrap();

        // ManualCapture sends FinalTranscript followed by End; the End
        // arrives after we are already Scored and must change nothing.
        capture.push_transcript("good morning");
        pump(&mut session).await;

        assert_eq!(session.state(), SessionState::Scored);
        assert_eq!(session.result().unwrap().percentage, 100);
    }

    #[tokio::test]
    async fn channel_hangup_while_listening_falls_back_to_idle() {
        let (capture, mut session) = make_session();
        session.set_reference("Good morning");
        session.toggle().unwrap();

        // The engine drops its sender without delivering End.
        capture.stop();

        assert_eq!(session.next_event().await, None);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.has_open_channel());
    }

    #[tokio::test]
    async fn next_event_with_no_session_returns_none() {
        let (_capture, mut session) = make_session();
        assert_eq!(session.next_event().await, None);
    }

    #[tokio::test]
    async fn try_next_event_drains_pending_events() {
        let (capture, mut session) = make_session();
        session.set_reference("Good morning");
        session.toggle().unwrap();
        capture.push_transcript("good morning");

        while let Some(event) = session.try_next_event() {
            session.handle_event(event);
        }

        assert_eq!(session.state(), SessionState::Scored);
        assert_eq!(session.result().unwrap().percentage, 100);
    }

    #[tokio::test]
    async fn try_next_event_is_none_while_engine_is_silent() {
        let (_capture, mut session) = make_session();
        session.set_reference("Good morning");
        session.toggle().unwrap();

        assert_eq!(session.try_next_event(), None);
        assert_eq!(session.state(), SessionState::Listening);
    }

    // ---- labels ---

    #[test]
    fn state_labels() {
        assert_eq!(SessionState::Idle.label(), "Idle");
        assert_eq!(SessionState::Listening.label(), "Listening");
        assert_eq!(SessionState::Scored.label(), "Scored");
        assert_eq!(SessionState::Errored.label(), "Error");
    }
}
