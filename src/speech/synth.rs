//! Speech-synthesis capability interface.
//!
//! Playback itself is a platform concern; this crate only fixes the
//! contract: the reading surface passes an explicit [`SpeakRequest`] built
//! from [`SpeechConfig`](crate::config::SpeechConfig) — voice choice and
//! rate travel with the request, never through ambient global state.

use thiserror::Error;

// ---------------------------------------------------------------------------
// VoiceInfo / SpeakRequest
// ---------------------------------------------------------------------------

/// A synthesis voice offered by the platform engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceInfo {
    /// Stable identifier used in [`SpeakRequest::voice`].
    pub id: String,
    /// Human-readable name for a voice picker.
    pub name: String,
    /// BCP-47 language tag of the voice.
    pub locale: String,
}

/// One utterance to synthesise.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakRequest {
    pub text: String,
    /// Selected voice id; `None` lets the engine pick its default.
    pub voice: Option<String>,
    /// Playback rate, 1.0 = normal speed.
    pub rate: f32,
}

impl SpeakRequest {
    pub fn new(text: impl Into<String>, voice: Option<String>, rate: f32) -> Self {
        Self {
            text: text.into(),
            voice,
            rate,
        }
    }
}

// ---------------------------------------------------------------------------
// SynthError / SpeechSynth
// ---------------------------------------------------------------------------

/// Errors reported by a synthesis engine.
#[derive(Debug, Clone, Error)]
pub enum SynthError {
    /// No synthesis capability exists on this platform.
    #[error("speech synthesis is not available on this platform")]
    Unavailable,

    /// The requested voice id is unknown to the engine.
    #[error("unknown voice: {0}")]
    UnknownVoice(String),
}

/// Object-safe, thread-safe interface for speech-synthesis engines.
pub trait SpeechSynth: Send + Sync {
    /// Voices the engine can speak with.
    fn voices(&self) -> Vec<VoiceInfo>;

    /// Queue `request` for playback.
    fn speak(&self, request: &SpeakRequest) -> Result<(), SynthError>;

    /// Stop any in-flight playback.  Idempotent.
    fn cancel(&self);
}

// ---------------------------------------------------------------------------
// NullSynth
// ---------------------------------------------------------------------------

/// Synthesis stub for builds without platform TTS.
///
/// Accepts every request and logs it, so the reading flow keeps working in
/// a terminal build.
#[derive(Debug, Default)]
pub struct NullSynth;

impl SpeechSynth for NullSynth {
    fn voices(&self) -> Vec<VoiceInfo> {
        Vec::new()
    }

    fn speak(&self, request: &SpeakRequest) -> Result<(), SynthError> {
        log::info!(
            "synth: speak (voice={:?}, rate={}): {:?}",
            request.voice,
            request.rate,
            request.text
        );
        Ok(())
    }

    fn cancel(&self) {}
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_synth_accepts_any_request() {
        let synth = NullSynth;
        let request = SpeakRequest::new("Good morning", None, 1.0);
        assert!(synth.speak(&request).is_ok());
        assert!(synth.voices().is_empty());
    }

    #[test]
    fn speak_request_carries_explicit_voice_and_rate() {
        let request = SpeakRequest::new("Hola", Some("es-ES-1".into()), 0.8);
        assert_eq!(request.voice.as_deref(), Some("es-ES-1"));
        assert!((request.rate - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn box_dyn_speech_synth_compiles() {
        let synth: Box<dyn SpeechSynth> = Box::new(NullSynth);
        synth.cancel();
    }
}
