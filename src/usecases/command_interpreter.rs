//! Voice command interpretation: utterance -> intent -> outcome.
//!
//! Classification is an ordered list of matchers over the normalized
//! utterance; the first matcher that fires wins and no intents combine.
//! The interpreter never performs side effects itself: it returns a
//! `CommandOutcome` for the session to execute.

use crate::domain::{RecommendedItem, Section};
use crate::ports::RecordProvider;
use crate::usecases::briefing::{opening_line, section_summary};
use crate::usecases::performance_analyzer::PerformanceAnalyzer;
use std::sync::Arc;
use tracing::{debug, info};

/// Spoken when no command matches.
pub const FALLBACK_HELP: &str = "I did not understand that command. You can say things like: \
     Open student records, Open subjects, Open attendance, Open reminders, Open progress records, \
     Open faculty directory, Open study content, Read followed by a content title, Recommend, or Stop.";

/// Spoken when the student has no weak areas.
pub const PRAISE_MESSAGE: &str =
    "Great news! You're performing well across all subjects. Keep up the great work!";

const READ_PREFIX: &str = "read ";
const RECOMMEND_PHRASES: &[&str] = &["recommend", "suggestion", "help me study"];
const STOP_PHRASES: &[&str] = &["stop speaking", "stop"];

/// Navigation phrases in priority order. Each rule fires on either phrase.
const NAVIGATION_RULES: &[([&str; 2], Section)] = &[
    (["open student records", "student records"], Section::Students),
    (["open subjects", "subjects"], Section::Subjects),
    (["open attendance", "attendance"], Section::Attendance),
    (["open reminders", "reminders"], Section::Reminders),
    (["open progress", "progress records"], Section::Progress),
    (["open faculty", "faculty directory"], Section::Faculty),
    (["open study content", "study content"], Section::StudyContent),
];

/// What an utterance asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Read a catalog item; `query` is the text after "read ".
    ReadContent { query: String },
    Recommend,
    Navigate(Section),
    Stop,
    Unrecognized,
}

type Matcher = fn(&str) -> Option<Intent>;

/// Classification rules, checked in this order.
const RULES: &[(&str, Matcher)] = &[
    ("read", match_read),
    ("recommend", match_recommend),
    ("navigate", match_navigation),
    ("stop", match_stop),
];

fn match_read(utterance: &str) -> Option<Intent> {
    utterance.find(READ_PREFIX).map(|at| Intent::ReadContent {
        query: utterance[at + READ_PREFIX.len()..].trim().to_string(),
    })
}

fn match_recommend(utterance: &str) -> Option<Intent> {
    contains_any(utterance, RECOMMEND_PHRASES).then_some(Intent::Recommend)
}

fn match_navigation(utterance: &str) -> Option<Intent> {
    NAVIGATION_RULES
        .iter()
        .find(|(phrases, _)| contains_any(utterance, phrases))
        .map(|(_, section)| Intent::Navigate(*section))
}

fn match_stop(utterance: &str) -> Option<Intent> {
    contains_any(utterance, STOP_PHRASES).then_some(Intent::Stop)
}

fn contains_any(utterance: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| utterance.contains(p))
}

/// Lower-cases and trims a raw transcript.
pub fn normalize(utterance: &str) -> String {
    utterance.trim().to_lowercase()
}

/// Classifies an utterance. Normalizes first, so raw transcripts are fine.
pub fn classify(utterance: &str) -> Intent {
    let normalized = normalize(utterance);
    RULES
        .iter()
        .find_map(|(name, matcher)| {
            let intent = matcher(&normalized)?;
            debug!(rule = *name, "command rule matched");
            Some(intent)
        })
        .unwrap_or(Intent::Unrecognized)
}

/// Instructions for the host produced by one utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome {
    pub intent: Intent,
    /// Section to switch to.
    pub section: Option<Section>,
    /// Spoken right away.
    pub response: Option<String>,
    /// Spoken once after the follow-up delay.
    pub follow_up: Option<String>,
    /// Cancel all speech in progress.
    pub cancel_speech: bool,
}

impl CommandOutcome {
    fn new(intent: Intent) -> Self {
        Self {
            intent,
            section: None,
            response: None,
            follow_up: None,
            cancel_speech: false,
        }
    }

    fn respond(mut self, text: impl Into<String>) -> Self {
        self.response = Some(text.into());
        self
    }

    fn then_say(mut self, text: impl Into<String>) -> Self {
        self.follow_up = Some(text.into());
        self
    }
}

/// Maps utterances to outcomes against the record set and the analyzer.
pub struct CommandInterpreter {
    records: Arc<dyn RecordProvider>,
    analyzer: Arc<PerformanceAnalyzer>,
    /// Student the "recommend" command reports on. The interpreter is not
    /// told who is using the portal.
    default_student_id: String,
}

impl CommandInterpreter {
    pub fn new(
        records: Arc<dyn RecordProvider>,
        analyzer: Arc<PerformanceAnalyzer>,
        default_student_id: impl Into<String>,
    ) -> Self {
        Self {
            records,
            analyzer,
            default_student_id: default_student_id.into(),
        }
    }

    pub fn default_student_id(&self) -> &str {
        &self.default_student_id
    }

    /// Classifies and resolves one utterance.
    pub fn interpret(&self, utterance: &str) -> CommandOutcome {
        let intent = classify(utterance);
        info!(?intent, "voice command classified");
        match &intent {
            Intent::ReadContent { query } => {
                let response = self.read_content(query);
                CommandOutcome::new(intent.clone()).respond(response)
            }
            Intent::Recommend => self.recommend(),
            Intent::Navigate(section) => {
                let section = *section;
                let mut outcome = CommandOutcome::new(intent.clone())
                    .respond(opening_line(section))
                    .then_say(section_summary(section, self.records.as_ref()));
                outcome.section = Some(section);
                outcome
            }
            Intent::Stop => {
                let mut outcome = CommandOutcome::new(Intent::Stop);
                outcome.cancel_speech = true;
                outcome
            }
            Intent::Unrecognized => {
                CommandOutcome::new(Intent::Unrecognized).respond(FALLBACK_HELP)
            }
        }
    }

    fn read_content(&self, query: &str) -> String {
        let catalog = self.records.content();
        let hit = if query.is_empty() {
            None
        } else {
            catalog
                .iter()
                .find(|item| item.title.to_lowercase().contains(query))
        };
        match hit {
            Some(item) => format!("Reading {}. {}", item.title, item.transcript),
            None => {
                let titles: Vec<&str> = catalog.iter().map(|c| c.title.as_str()).collect();
                format!(
                    "Sorry, I could not find any study content matching \"{}\". Available content: {}",
                    query,
                    titles.join(", ")
                )
            }
        }
    }

    fn recommend(&self) -> CommandOutcome {
        match self
            .analyzer
            .get_study_recommendation(&self.default_student_id)
        {
            Some(rec) => CommandOutcome::new(Intent::Recommend)
                .respond(rec.message)
                .then_say(materials_line(&rec.content_items)),
            None => CommandOutcome::new(Intent::Recommend).respond(PRAISE_MESSAGE),
        }
    }
}

fn materials_line(items: &[RecommendedItem]) -> String {
    if items.is_empty() {
        return "There are no study materials for this subject in the catalog yet. \
                Ask your instructor for additional resources."
            .to_string();
    }
    let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
    format!(
        "Recommended materials: {}. Say read followed by a title to listen to it.",
        titles.join(", ")
    )
}
