//! Performance analysis: weak subject areas and study recommendations.
//!
//! Pure functions over the assessment records and the content catalog.
//! Nothing here fails; "no weak areas" is an empty result.

use crate::domain::{RecommendedItem, StudyRecommendation, WeakArea};
use crate::ports::RecordProvider;
use std::sync::Arc;
use tracing::debug;

/// A subject is weak when its average percentage is strictly below this.
pub const WEAK_AREA_THRESHOLD: f64 = 75.0;

/// Subject display name -> suggested study topics, in suggestion order.
const TOPIC_MAPPING: &[(&str, &[&str])] = &[
    (
        "Artificial Intelligence and Machine Learning",
        &[
            "Neural Networks Fundamentals",
            "Machine Learning Algorithms",
            "Deep Learning Concepts",
            "Introduction to Binary Trees",
        ],
    ),
    (
        "Data Structures and Algorithms",
        &[
            "Introduction to Binary Trees",
            "Graph Algorithms",
            "Dynamic Programming",
        ],
    ),
    (
        "Database Management Systems",
        &["SQL Fundamentals", "Database Design"],
    ),
];

/// Topics suggested for a subject; empty when the subject is not mapped.
pub fn topics_for_subject(subject: &str) -> Vec<String> {
    TOPIC_MAPPING
        .iter()
        .find(|(name, _)| *name == subject)
        .map(|(_, topics)| topics.iter().map(|t| t.to_string()).collect())
        .unwrap_or_default()
}

/// Scores a student's assessments and derives recommendations.
pub struct PerformanceAnalyzer {
    records: Arc<dyn RecordProvider>,
}

impl PerformanceAnalyzer {
    pub fn new(records: Arc<dyn RecordProvider>) -> Self {
        Self { records }
    }

    /// Weak areas for `student_id`, in order of each subject's first
    /// appearance among the student's records.
    ///
    /// Records are grouped by subject display name, so two subjects sharing a
    /// name are treated as one.
    pub fn analyze_performance(&self, student_id: &str) -> Vec<WeakArea> {
        let mut groups: Vec<(&str, Vec<f64>)> = Vec::new();
        for record in self
            .records
            .assessments()
            .iter()
            .filter(|r| r.student_id == student_id)
        {
            match groups
                .iter_mut()
                .find(|(subject, _)| *subject == record.subject_name)
            {
                Some((_, percentages)) => percentages.push(record.percentage()),
                None => groups.push((record.subject_name.as_str(), vec![record.percentage()])),
            }
        }

        let weak_areas: Vec<WeakArea> = groups
            .into_iter()
            .filter_map(|(subject, percentages)| {
                let average = percentages.iter().sum::<f64>() / percentages.len() as f64;
                (average < WEAK_AREA_THRESHOLD).then(|| WeakArea {
                    subject: subject.to_string(),
                    average_score_percent: average,
                    recommended_topics: topics_for_subject(subject),
                })
            })
            .collect();

        debug!(student_id, weak_areas = weak_areas.len(), "performance analyzed");
        weak_areas
    }

    /// Recommendation built from the first weak area, or `None` when the
    /// student has none.
    ///
    /// The first weak area is the first weak subject in record order, which
    /// is not necessarily the one with the lowest average.
    pub fn get_study_recommendation(&self, student_id: &str) -> Option<StudyRecommendation> {
        let primary = self.analyze_performance(student_id).into_iter().next()?;

        let topics: Vec<String> = primary
            .recommended_topics
            .iter()
            .map(|t| t.to_lowercase())
            .collect();
        let content_items: Vec<RecommendedItem> = self
            .records
            .content()
            .iter()
            .filter(|item| {
                let title = item.title.to_lowercase();
                topics.iter().any(|topic| title.contains(topic.as_str()))
            })
            .map(|item| RecommendedItem {
                title: item.title.clone(),
                subject: primary.subject.clone(),
                content: item.transcript.clone(),
            })
            .collect();

        debug!(
            student_id,
            subject = %primary.subject,
            items = content_items.len(),
            "study recommendation built"
        );

        Some(StudyRecommendation {
            message: format!(
                "Based on your recent performance ({:.1}% average), I recommend focusing on {}. \
                 Here are some materials to help you improve:",
                primary.average_score_percent, primary.subject
            ),
            content_items,
        })
    }
}
