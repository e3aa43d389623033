//! Speech capability messages. Exchanged between the session and the
//! speech adapters; no audio types here.

/// Fixed delivery rate for every spoken response.
pub const SPEECH_RATE: f32 = 0.9;
/// Fixed delivery pitch.
pub const SPEECH_PITCH: f32 = 1.0;
/// Fixed delivery volume.
pub const SPEECH_VOLUME: f32 = 0.8;
/// Recognition locale. Recognition runs continuous with final results only.
pub const RECOGNITION_LOCALE: &str = "en-US";

/// Text plus delivery parameters handed to a synthesizer.
#[derive(Debug, Clone, PartialEq)]
pub struct SpokenUtterance {
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl SpokenUtterance {
    /// Utterance with the fixed delivery parameters.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rate: SPEECH_RATE,
            pitch: SPEECH_PITCH,
            volume: SPEECH_VOLUME,
        }
    }
}

/// Lifecycle events reported by a synthesizer. Only used to track the
/// session's speaking flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechEvent {
    Started,
    Ended,
    Failed,
}

/// Events delivered by a recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Best transcript of one final (non-interim) result.
    Transcript(String),
    /// Recognizer failed; the only contract is to stop listening.
    Error(String),
    /// Recognizer stopped on its own.
    Ended,
}
