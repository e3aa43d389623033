//! Console speech adapters. The synthesizer prints what would be spoken;
//! the recognizer turns typed lines into final transcripts.

use crate::domain::{DomainError, RECOGNITION_LOCALE, RecognitionEvent, SpeechEvent, SpokenUtterance};
use crate::ports::{SpeechRecognizer, SpeechSynthesizer};
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{Write, stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;
use tracing::{debug, warn};

const SPEECH_COLOR: Color = Color::Rgb {
    r: 0x0f,
    g: 0xf0,
    b: 0xfc,
};

/// Prints utterances to stdout. Each utterance is reported as started and
/// ended on the event channel once printed.
pub struct ConsoleSynthesizer {
    events: mpsc::UnboundedSender<SpeechEvent>,
}

impl ConsoleSynthesizer {
    pub fn new(events: mpsc::UnboundedSender<SpeechEvent>) -> Self {
        Self { events }
    }

    fn emit(&self, event: SpeechEvent) {
        if self.events.send(event).is_err() {
            debug!(?event, "speech event channel closed");
        }
    }
}

impl SpeechSynthesizer for ConsoleSynthesizer {
    fn speak(&self, utterance: SpokenUtterance) {
        debug!(
            rate = utterance.rate,
            pitch = utterance.pitch,
            volume = utterance.volume,
            chars = utterance.text.len(),
            "speaking"
        );
        self.emit(SpeechEvent::Started);
        let mut out = stdout();
        let printed = out
            .execute(SetForegroundColor(SPEECH_COLOR))
            .and_then(|o| o.execute(Print(format!("\r\n🔊 {}\r\n", utterance.text))))
            .and_then(|o| o.execute(ResetColor))
            .and_then(|o| o.flush());
        match printed {
            Ok(()) => self.emit(SpeechEvent::Ended),
            Err(e) => {
                warn!(error = %e, "console speech output failed");
                self.emit(SpeechEvent::Failed);
            }
        }
    }

    fn cancel(&self) {
        debug!("speech cancelled");
    }
}

/// Delivers typed lines as recognition results while listening.
pub struct ConsoleRecognizer {
    listening: AtomicBool,
    events: mpsc::UnboundedSender<RecognitionEvent>,
}

impl ConsoleRecognizer {
    pub fn new(events: mpsc::UnboundedSender<RecognitionEvent>) -> Self {
        Self {
            listening: AtomicBool::new(false),
            events,
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    /// Hand a typed line to the session as a final transcript. Returns false
    /// when the line was dropped (not listening, or blank).
    pub fn transcribe(&self, line: &str) -> bool {
        if !self.is_listening() {
            debug!("not listening; transcript dropped");
            return false;
        }
        if line.trim().is_empty() {
            return false;
        }
        self.events
            .send(RecognitionEvent::Transcript(line.to_string()))
            .is_ok()
    }
}

impl SpeechRecognizer for ConsoleRecognizer {
    fn start(&self) -> Result<(), DomainError> {
        if self.events.is_closed() {
            return Err(DomainError::Recognition(
                "recognition event channel closed".into(),
            ));
        }
        self.listening.store(true, Ordering::SeqCst);
        debug!(
            locale = RECOGNITION_LOCALE,
            continuous = true,
            interim_results = false,
            "console recognizer started"
        );
        Ok(())
    }

    fn stop(&self) {
        if self.listening.swap(false, Ordering::SeqCst) {
            let _ = self.events.send(RecognitionEvent::Ended);
        }
    }
}
