//! Voice session: owns the listening/speaking state and executes command
//! outcomes through the capability ports.
//!
//! Listening and speaking toggle independently (`Idle <-> Listening`,
//! `Idle <-> Speaking`). Follow-up responses are one-shot timers that are
//! never cancelled, so two commands inside the delay window both get their
//! follow-up, in timer order.

use crate::domain::{DomainError, RecognitionEvent, SpeechEvent, SpokenUtterance};
use crate::ports::{
    RecordProvider, Scheduler, SectionNavigator, SpeechRecognizer, SpeechSynthesizer,
};
use crate::usecases::command_interpreter::{CommandInterpreter, CommandOutcome, normalize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Capabilities the session drives.
pub struct SessionCapabilities {
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    /// `None` when the host offers no speech recognition.
    pub recognizer: Option<Arc<dyn SpeechRecognizer>>,
    pub navigator: Arc<dyn SectionNavigator>,
    pub scheduler: Arc<dyn Scheduler>,
}

pub struct VoiceSession {
    interpreter: CommandInterpreter,
    records: Arc<dyn RecordProvider>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
    navigator: Arc<dyn SectionNavigator>,
    scheduler: Arc<dyn Scheduler>,
    follow_up_delay: Duration,
    listening: AtomicBool,
    speaking: AtomicBool,
    playback: Mutex<Playback>,
    /// Count of utterances fully executed; hosts wait on it.
    handled: watch::Sender<u64>,
}

/// Catalog playback requested with `toggle_playback`.
///
/// An item stays `pending` until the synthesizer reports it started, so the
/// end event of a cancelled item cannot clear its replacement.
#[derive(Debug, Default)]
struct Playback {
    pending: Option<String>,
    playing: Option<String>,
}

impl Playback {
    fn holds(&self, content_id: &str) -> bool {
        self.pending.as_deref() == Some(content_id) || self.playing.as_deref() == Some(content_id)
    }

    fn clear(&mut self) {
        self.pending = None;
        self.playing = None;
    }
}

impl VoiceSession {
    pub fn new(
        interpreter: CommandInterpreter,
        records: Arc<dyn RecordProvider>,
        capabilities: SessionCapabilities,
        follow_up_delay: Duration,
    ) -> Self {
        Self {
            interpreter,
            records,
            synthesizer: capabilities.synthesizer,
            recognizer: capabilities.recognizer,
            navigator: capabilities.navigator,
            scheduler: capabilities.scheduler,
            follow_up_delay,
            listening: AtomicBool::new(false),
            speaking: AtomicBool::new(false),
            playback: Mutex::new(Playback::default()),
            handled: watch::Sender::new(0),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.recognizer.is_some()
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }

    /// Catalog item the synthesizer is currently reading, if any.
    pub fn now_playing(&self) -> Option<String> {
        self.playback().playing.clone()
    }

    /// Watches the number of utterances executed so far.
    pub fn subscribe_handled(&self) -> watch::Receiver<u64> {
        self.handled.subscribe()
    }

    /// Starts recognition. No-op while already listening.
    pub fn start_listening(&self) -> Result<(), DomainError> {
        let recognizer = self
            .recognizer
            .as_ref()
            .ok_or(DomainError::RecognitionUnsupported)?;
        if self
            .listening
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("already listening");
            return Ok(());
        }
        if let Err(e) = recognizer.start() {
            self.listening.store(false, Ordering::SeqCst);
            return Err(e);
        }
        info!("listening started");
        Ok(())
    }

    /// Stops recognition. No-op while not listening.
    pub fn stop_listening(&self) {
        let Some(recognizer) = self.recognizer.as_ref() else {
            return;
        };
        if self.listening.swap(false, Ordering::SeqCst) {
            recognizer.stop();
            info!("listening stopped");
        }
    }

    pub fn on_recognition_event(&self, event: RecognitionEvent) {
        match event {
            RecognitionEvent::Transcript(text) => {
                self.handle_utterance(&text);
            }
            RecognitionEvent::Error(reason) => {
                warn!(error = %reason, "speech recognition error");
                self.listening.store(false, Ordering::SeqCst);
            }
            RecognitionEvent::Ended => {
                self.listening.store(false, Ordering::SeqCst);
            }
        }
    }

    pub fn on_speech_event(&self, event: SpeechEvent) {
        match event {
            SpeechEvent::Started => {
                self.speaking.store(true, Ordering::SeqCst);
                let mut playback = self.playback();
                if let Some(id) = playback.pending.take() {
                    playback.playing = Some(id);
                }
            }
            SpeechEvent::Ended | SpeechEvent::Failed => {
                self.speaking.store(false, Ordering::SeqCst);
                self.playback().playing = None;
            }
        }
    }

    /// Interprets one utterance and executes the outcome. Returns the outcome
    /// so hosts can mirror it in their own view.
    pub fn handle_utterance(&self, raw: &str) -> CommandOutcome {
        let utterance = normalize(raw);
        info!(command = %utterance, "voice command received");
        let outcome = self.interpreter.interpret(&utterance);
        self.execute(&outcome);
        self.handled.send_modify(|count| *count += 1);
        outcome
    }

    fn execute(&self, outcome: &CommandOutcome) {
        if outcome.cancel_speech {
            self.stop_speaking();
        }
        if let Some(section) = outcome.section {
            self.navigator.on_section_change(section);
        }
        if let Some(response) = &outcome.response {
            self.synthesizer.speak(SpokenUtterance::new(response.as_str()));
        }
        if let Some(follow_up) = &outcome.follow_up {
            let synthesizer = Arc::clone(&self.synthesizer);
            let text = follow_up.clone();
            self.scheduler.schedule_once(
                self.follow_up_delay,
                Box::new(move || synthesizer.speak(SpokenUtterance::new(text))),
            );
        }
    }

    /// Cancels all speech and clears the speaking state.
    pub fn stop_speaking(&self) {
        self.synthesizer.cancel();
        self.speaking.store(false, Ordering::SeqCst);
        self.playback().clear();
    }

    /// Plays a catalog item's transcript, or stops it when it is the item
    /// already playing.
    pub fn toggle_playback(&self, content_id: &str) {
        let Some(item) = self.records.content().iter().find(|c| c.id == content_id) else {
            warn!(content_id, "no study content with this id");
            return;
        };

        let already_playing = {
            let mut playback = self.playback();
            let held = playback.holds(content_id);
            if held {
                playback.clear();
            } else {
                playback.pending = Some(item.id.clone());
            }
            held
        };
        self.synthesizer.cancel();
        if already_playing {
            self.speaking.store(false, Ordering::SeqCst);
            info!(content_id, "playback stopped");
            return;
        }
        self.synthesizer
            .speak(SpokenUtterance::new(item.transcript.as_str()));
        info!(content_id, title = %item.title, "playback started");
    }

    /// The student the "recommend" command reports on.
    pub fn default_student_id(&self) -> &str {
        self.interpreter.default_student_id()
    }

    /// Feeds recognizer events into the session until the channel closes.
    pub async fn pump_recognition(
        self: Arc<Self>,
        mut rx: mpsc::UnboundedReceiver<RecognitionEvent>,
    ) {
        while let Some(event) = rx.recv().await {
            self.on_recognition_event(event);
        }
        debug!("recognition event channel closed");
    }

    /// Feeds synthesizer events into the session until the channel closes.
    pub async fn pump_speech(self: Arc<Self>, mut rx: mpsc::UnboundedReceiver<SpeechEvent>) {
        while let Some(event) = rx.recv().await {
            self.on_speech_event(event);
        }
        debug!("speech event channel closed");
    }

    fn playback(&self) -> std::sync::MutexGuard<'_, Playback> {
        self.playback
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::records::InMemoryRecords;
    use crate::adapters::testing::{
        ManualScheduler, RecordingNavigator, RecordingRecognizer, RecordingSynthesizer,
    };
    use crate::domain::Section;
    use crate::usecases::command_interpreter::FALLBACK_HELP;
    use crate::usecases::performance_analyzer::PerformanceAnalyzer;

    struct Harness {
        session: Arc<VoiceSession>,
        synth: Arc<RecordingSynthesizer>,
        recognizer: Arc<RecordingRecognizer>,
        navigator: Arc<RecordingNavigator>,
        scheduler: Arc<ManualScheduler>,
    }

    fn harness() -> Harness {
        let records: Arc<dyn RecordProvider> = Arc::new(InMemoryRecords::demo().unwrap());
        let analyzer = Arc::new(PerformanceAnalyzer::new(Arc::clone(&records)));
        let interpreter = CommandInterpreter::new(Arc::clone(&records), analyzer, "2");
        let synth = Arc::new(RecordingSynthesizer::default());
        let recognizer = Arc::new(RecordingRecognizer::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let scheduler = Arc::new(ManualScheduler::default());
        let session = Arc::new(VoiceSession::new(
            interpreter,
            records,
            SessionCapabilities {
                synthesizer: synth.clone(),
                recognizer: Some(recognizer.clone()),
                navigator: navigator.clone(),
                scheduler: scheduler.clone(),
            },
            Duration::from_millis(1000),
        ));
        Harness {
            session,
            synth,
            recognizer,
            navigator,
            scheduler,
        }
    }

    #[test]
    fn test_listening_guards_are_idempotent() {
        let h = harness();
        h.session.stop_listening();
        assert_eq!(h.recognizer.stops(), 0);

        h.session.start_listening().unwrap();
        h.session.start_listening().unwrap();
        assert!(h.session.is_listening());
        assert_eq!(h.recognizer.starts(), 1);

        h.session.stop_listening();
        h.session.stop_listening();
        assert!(!h.session.is_listening());
        assert_eq!(h.recognizer.stops(), 1);
    }

    #[test]
    fn test_start_listening_without_recognizer() {
        let h = harness();
        let session = VoiceSession::new(
            CommandInterpreter::new(
                h.session.records.clone(),
                Arc::new(PerformanceAnalyzer::new(h.session.records.clone())),
                "2",
            ),
            h.session.records.clone(),
            SessionCapabilities {
                synthesizer: h.synth.clone(),
                recognizer: None,
                navigator: h.navigator.clone(),
                scheduler: h.scheduler.clone(),
            },
            Duration::from_millis(1000),
        );
        assert!(!session.is_supported());
        assert!(matches!(
            session.start_listening(),
            Err(DomainError::RecognitionUnsupported)
        ));
        assert!(!session.is_listening());
    }

    #[test]
    fn test_recognition_error_stops_listening() {
        let h = harness();
        h.session.start_listening().unwrap();
        h.session
            .on_recognition_event(RecognitionEvent::Error("network".into()));
        assert!(!h.session.is_listening());

        h.session.start_listening().unwrap();
        h.session.on_recognition_event(RecognitionEvent::Ended);
        assert!(!h.session.is_listening());
        assert_eq!(h.recognizer.starts(), 2);
    }

    #[test]
    fn test_navigation_speaks_then_schedules_follow_up() {
        let h = harness();
        h.session
            .on_recognition_event(RecognitionEvent::Transcript("  Open Subjects ".into()));

        assert_eq!(h.navigator.sections(), vec![Section::Subjects]);
        assert_eq!(
            h.synth.spoken(),
            vec!["Opening subjects section. Here are the available subjects:".to_string()]
        );
        assert_eq!(h.scheduler.delays(), vec![Duration::from_millis(1000)]);

        h.scheduler.fire_all();
        let spoken = h.synth.spoken();
        assert_eq!(spoken.len(), 2);
        assert!(spoken[1].starts_with("The subjects are:"));
    }

    #[test]
    fn test_overlapping_commands_fire_both_follow_ups() {
        let h = harness();
        h.session.handle_utterance("open attendance");
        h.session.handle_utterance("open reminders");
        assert_eq!(h.scheduler.pending(), 2);

        h.scheduler.fire_all();
        let spoken = h.synth.spoken();
        assert_eq!(spoken.len(), 4);
        assert!(spoken[2].starts_with("Recent attendance:"));
        assert!(spoken[3].starts_with("Your reminders:"));
    }

    #[test]
    fn test_stop_cancels_silently() {
        let h = harness();
        h.session.on_speech_event(SpeechEvent::Started);
        assert!(h.session.is_speaking());

        let outcome = h.session.handle_utterance("stop");
        assert!(outcome.cancel_speech);
        assert!(!h.session.is_speaking());
        assert_eq!(h.synth.cancels(), 1);
        assert!(h.synth.spoken().is_empty());
        assert_eq!(h.scheduler.pending(), 0);
    }

    #[test]
    fn test_stop_does_not_cancel_pending_follow_ups() {
        let h = harness();
        h.session.handle_utterance("open faculty");
        h.session.handle_utterance("stop");
        h.scheduler.fire_all();
        let spoken = h.synth.spoken();
        assert!(spoken.last().unwrap().starts_with("Faculty members:"));
    }

    #[test]
    fn test_fallback_is_spoken() {
        let h = harness();
        h.session.handle_utterance("sing me a song");
        assert_eq!(h.synth.spoken(), vec![FALLBACK_HELP.to_string()]);
        assert!(h.navigator.sections().is_empty());
    }

    #[test]
    fn test_utterances_use_fixed_delivery() {
        let h = harness();
        h.session.handle_utterance("open progress");
        let utterances = h.synth.utterances();
        let utterance = &utterances[0];
        assert_eq!(utterance.rate, 0.9);
        assert_eq!(utterance.pitch, 1.0);
        assert_eq!(utterance.volume, 0.8);
    }

    #[test]
    fn test_speech_events_track_speaking() {
        let h = harness();
        h.session.on_speech_event(SpeechEvent::Started);
        assert!(h.session.is_speaking());
        h.session.on_speech_event(SpeechEvent::Failed);
        assert!(!h.session.is_speaking());
        h.session.on_speech_event(SpeechEvent::Started);
        h.session.on_speech_event(SpeechEvent::Ended);
        assert!(!h.session.is_speaking());
    }

    #[test]
    fn test_toggle_playback() {
        let h = harness();
        h.session.toggle_playback("1");
        assert!(h.session.now_playing().is_none());
        h.session.on_speech_event(SpeechEvent::Started);
        assert_eq!(h.session.now_playing().as_deref(), Some("1"));
        assert!(h.synth.spoken()[0].starts_with("Welcome to the lecture on Binary Trees."));

        h.session.toggle_playback("2");
        h.session.on_speech_event(SpeechEvent::Started);
        assert_eq!(h.session.now_playing().as_deref(), Some("2"));
        assert_eq!(h.synth.spoken().len(), 2);

        h.session.toggle_playback("2");
        assert!(h.session.now_playing().is_none());
        assert_eq!(h.synth.spoken().len(), 2);
        assert_eq!(h.synth.cancels(), 3);

        h.session.toggle_playback("missing");
        assert_eq!(h.synth.cancels(), 3);
    }

    #[test]
    fn test_switching_items_survives_end_of_cancelled_item() {
        let h = harness();
        h.session.toggle_playback("1");
        h.session.on_speech_event(SpeechEvent::Started);
        h.session.toggle_playback("2");
        // End of the cancelled first item, then start of the second.
        h.session.on_speech_event(SpeechEvent::Ended);
        assert!(h.session.now_playing().is_none());
        h.session.on_speech_event(SpeechEvent::Started);
        assert_eq!(h.session.now_playing().as_deref(), Some("2"));

        h.session.toggle_playback("2");
        assert!(h.session.now_playing().is_none());
        assert_eq!(h.synth.spoken().len(), 2);
    }

    #[test]
    fn test_pending_item_toggles_off_before_it_starts() {
        let h = harness();
        h.session.toggle_playback("1");
        h.session.toggle_playback("1");
        h.session.on_speech_event(SpeechEvent::Started);
        assert!(h.session.now_playing().is_none());
        assert_eq!(h.synth.spoken().len(), 1);
    }

    #[test]
    fn test_handled_count_advances_per_utterance() {
        let h = harness();
        let mut handled = h.session.subscribe_handled();
        assert_eq!(*handled.borrow_and_update(), 0);

        h.session
            .on_recognition_event(RecognitionEvent::Transcript("open reminders".into()));
        assert!(handled.has_changed().unwrap());
        assert_eq!(*handled.borrow_and_update(), 1);

        h.session.on_recognition_event(RecognitionEvent::Ended);
        assert!(!handled.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_handled_wait_resolves_after_pumped_transcript() {
        let h = harness();
        let mut handled = h.session.subscribe_handled();
        let (rec_tx, rec_rx) = mpsc::unbounded_channel();
        tokio::spawn(Arc::clone(&h.session).pump_recognition(rec_rx));

        handled.mark_unchanged();
        rec_tx
            .send(RecognitionEvent::Transcript("open faculty".into()))
            .unwrap();
        handled.changed().await.unwrap();
        assert_eq!(
            h.synth.spoken(),
            vec!["Opening faculty directory. Here are the faculty members:".to_string()]
        );
    }

    #[tokio::test]
    async fn test_pumps_deliver_events() {
        let h = harness();
        let (rec_tx, rec_rx) = mpsc::unbounded_channel();
        let (speech_tx, speech_rx) = mpsc::unbounded_channel();
        let rec_pump = tokio::spawn(Arc::clone(&h.session).pump_recognition(rec_rx));
        let speech_pump = tokio::spawn(Arc::clone(&h.session).pump_speech(speech_rx));

        rec_tx
            .send(RecognitionEvent::Transcript("open study content".into()))
            .unwrap();
        speech_tx.send(SpeechEvent::Started).unwrap();
        drop(rec_tx);
        drop(speech_tx);
        rec_pump.await.unwrap();
        speech_pump.await.unwrap();

        assert_eq!(h.navigator.sections(), vec![Section::StudyContent]);
        assert!(h.session.is_speaking());
    }
}
