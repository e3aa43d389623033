//! Test doubles for the capability ports. They record calls instead of
//! producing audio or timers.

use crate::domain::{
    AssessmentRecord, ContentItem, ContentType, DomainError, Section, SpokenUtterance,
};
use crate::ports::{DeferredTask, Scheduler, SectionNavigator, SpeechRecognizer, SpeechSynthesizer};
use chrono::NaiveDate;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn assessment(student_id: &str, subject: &str, score: f64, max_score: f64) -> AssessmentRecord {
    AssessmentRecord {
        id: format!("{}-{}", student_id, subject),
        student_id: student_id.to_string(),
        subject_id: "0".to_string(),
        assessment_type: "Quiz".to_string(),
        score,
        max_score,
        date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        student_name: format!("Student {}", student_id),
        subject_name: subject.to_string(),
    }
}

pub fn content_item(id: &str, title: &str, transcript: &str) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        subject_id: "0".to_string(),
        kind: ContentType::Lecture,
        audio_url: None,
        transcript: transcript.to_string(),
        duration: "10:00".to_string(),
        upload_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
    }
}

#[derive(Default)]
pub struct RecordingSynthesizer {
    utterances: Mutex<Vec<SpokenUtterance>>,
    cancels: AtomicUsize,
}

impl RecordingSynthesizer {
    pub fn utterances(&self) -> Vec<SpokenUtterance> {
        self.utterances.lock().unwrap().clone()
    }

    pub fn spoken(&self) -> Vec<String> {
        self.utterances().into_iter().map(|u| u.text).collect()
    }

    pub fn cancels(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }
}

impl SpeechSynthesizer for RecordingSynthesizer {
    fn speak(&self, utterance: SpokenUtterance) {
        self.utterances.lock().unwrap().push(utterance);
    }

    fn cancel(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingRecognizer {
    starts: AtomicUsize,
    stops: AtomicUsize,
}

impl RecordingRecognizer {
    pub fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

impl SpeechRecognizer for RecordingRecognizer {
    fn start(&self) -> Result<(), DomainError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    sections: Mutex<Vec<Section>>,
}

impl RecordingNavigator {
    pub fn sections(&self) -> Vec<Section> {
        self.sections.lock().unwrap().clone()
    }
}

impl SectionNavigator for RecordingNavigator {
    fn on_section_change(&self, section: Section) {
        self.sections.lock().unwrap().push(section);
    }
}

/// Holds scheduled tasks until `fire_all` runs them in scheduling order.
#[derive(Default)]
pub struct ManualScheduler {
    tasks: Mutex<Vec<(Duration, DeferredTask)>>,
}

impl ManualScheduler {
    pub fn pending(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.tasks.lock().unwrap().iter().map(|(d, _)| *d).collect()
    }

    pub fn fire_all(&self) {
        let tasks: Vec<_> = self.tasks.lock().unwrap().drain(..).collect();
        for (_, task) in tasks {
            task();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&self, delay: Duration, task: DeferredTask) {
        self.tasks.lock().unwrap().push((delay, task));
    }
}
