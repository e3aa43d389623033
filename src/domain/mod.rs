//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod speech;

pub use entities::{
    AssessmentRecord, AttendanceRecord, AttendanceStatus, ContentItem, ContentType,
    FacultyMember, Priority, RecommendedItem, Reminder, ReminderKind, Section, Student,
    StudyRecommendation, Subject, WeakArea,
};
pub use errors::DomainError;
pub use speech::{RECOGNITION_LOCALE, RecognitionEvent, SpeechEvent, SpokenUtterance};
