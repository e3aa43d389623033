//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters. All of them are synchronous: the core is called
//! from an event callback and must return immediately.

use crate::domain::{
    AssessmentRecord, AttendanceRecord, ContentItem, DomainError, FacultyMember, Reminder,
    Section, SpokenUtterance, Student, Subject,
};
use std::time::Duration;

/// Read-only access to the portal's reference records. Slices keep the
/// provider's order; the core never mutates them.
pub trait RecordProvider: Send + Sync {
    fn students(&self) -> &[Student];
    fn subjects(&self) -> &[Subject];
    fn attendance(&self) -> &[AttendanceRecord];
    fn reminders(&self) -> &[Reminder];
    fn assessments(&self) -> &[AssessmentRecord];
    fn faculty(&self) -> &[FacultyMember];
    /// The content catalog.
    fn content(&self) -> &[ContentItem];
}

/// Text-to-speech capability. Lifecycle events are reported out of band
/// (see `SpeechEvent`).
pub trait SpeechSynthesizer: Send + Sync {
    /// Queue an utterance. Queuing and interruption policy belong to the adapter.
    fn speak(&self, utterance: SpokenUtterance);

    /// Cancel everything queued or being spoken.
    fn cancel(&self);
}

/// Speech-to-text capability. Transcripts are delivered out of band
/// (see `RecognitionEvent`).
pub trait SpeechRecognizer: Send + Sync {
    fn start(&self) -> Result<(), DomainError>;
    fn stop(&self);
}

/// Host callback invoked when a command selects a portal section.
pub trait SectionNavigator: Send + Sync {
    fn on_section_change(&self, section: Section);
}

/// One-shot deferred work.
pub type DeferredTask = Box<dyn FnOnce() + Send + 'static>;

/// Timer capability. Tasks fire once after `delay`; there is no cancellation.
pub trait Scheduler: Send + Sync {
    fn schedule_once(&self, delay: Duration, task: DeferredTask);
}
