//! Implements RecordProvider over record vectors held in memory.
//!
//! The JSON layout mirrors the portal's data module: one array per record
//! set (`students`, `subjects`, `attendanceRecords`, `reminders`,
//! `progressRecords`, `faculty`, `studyContent`).

use crate::domain::{
    AssessmentRecord, AttendanceRecord, ContentItem, DomainError, FacultyMember, Reminder,
    Student, Subject,
};
use crate::ports::RecordProvider;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Demo record set bundled with the binary.
const DEMO_RECORDS: &str = include_str!("../../../data/demo_records.json");

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InMemoryRecords {
    pub students: Vec<Student>,
    pub subjects: Vec<Subject>,
    #[serde(rename = "attendanceRecords")]
    pub attendance: Vec<AttendanceRecord>,
    pub reminders: Vec<Reminder>,
    #[serde(rename = "progressRecords")]
    pub assessments: Vec<AssessmentRecord>,
    pub faculty: Vec<FacultyMember>,
    #[serde(rename = "studyContent")]
    pub content: Vec<ContentItem>,
}

impl InMemoryRecords {
    /// The bundled demo records.
    pub fn demo() -> Result<Self, DomainError> {
        Self::from_json_str(DEMO_RECORDS)
    }

    /// Parse and validate a JSON record set.
    pub fn from_json_str(json: &str) -> Result<Self, DomainError> {
        let records: Self = serde_json::from_str(json)
            .map_err(|e| DomainError::Records(format!("invalid record JSON: {}", e)))?;
        records.validate()?;
        Ok(records)
    }

    /// Checks the invariants the analyzer and interpreter rely on:
    /// `0 <= score <= maxScore` with `maxScore > 0`, non-empty transcripts,
    /// and catalog titles unique ignoring case.
    pub fn validate(&self) -> Result<(), DomainError> {
        for record in &self.assessments {
            if record.max_score.is_nan() || record.max_score <= 0.0 {
                return Err(DomainError::Records(format!(
                    "assessment {}: maxScore must be positive",
                    record.id
                )));
            }
            if record.score < 0.0 || record.score > record.max_score {
                return Err(DomainError::Records(format!(
                    "assessment {}: score {} outside 0..={}",
                    record.id, record.score, record.max_score
                )));
            }
        }

        let mut titles = HashSet::new();
        for item in &self.content {
            if item.transcript.trim().is_empty() {
                return Err(DomainError::Records(format!(
                    "study content {}: transcript is empty",
                    item.id
                )));
            }
            if !titles.insert(item.title.to_lowercase()) {
                return Err(DomainError::Records(format!(
                    "study content title '{}' is not unique",
                    item.title
                )));
            }
        }
        Ok(())
    }
}

impl RecordProvider for InMemoryRecords {
    fn students(&self) -> &[Student] {
        &self.students
    }

    fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    fn attendance(&self) -> &[AttendanceRecord] {
        &self.attendance
    }

    fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    fn assessments(&self) -> &[AssessmentRecord] {
        &self.assessments
    }

    fn faculty(&self) -> &[FacultyMember] {
        &self.faculty
    }

    fn content(&self) -> &[ContentItem] {
        &self.content
    }
}
