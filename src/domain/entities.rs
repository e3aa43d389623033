//! Domain entities. Pure data structures for the portal records.
//!
//! Records are read-only reference data supplied by a `RecordProvider`.
//! Field names serialize as camelCase so a JSON record file can reuse the
//! portal's data layout as-is.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub roll_no: String,
    pub email: String,
    pub department: String,
    pub semester: u8,
    pub gpa: f64,
    pub phone: String,
    pub address: String,
    pub enrollment_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub code: String,
    pub credits: u8,
    pub instructor: String,
    pub department: String,
    pub semester: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub student_id: String,
    pub subject_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub student_name: String,
    pub subject_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    Assignment,
    Exam,
    Event,
    Deadline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: ReminderKind,
    pub priority: Priority,
}

/// A single graded assessment. Callers guarantee `0 <= score <= max_score`
/// and `max_score > 0`; the analyzer does not re-check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    pub id: String,
    pub student_id: String,
    pub subject_id: String,
    pub assessment_type: String,
    pub score: f64,
    pub max_score: f64,
    pub date: NaiveDate,
    pub student_name: String,
    pub subject_name: String,
}

impl AssessmentRecord {
    /// Score as a percentage of the maximum.
    pub fn percentage(&self) -> f64 {
        self.score / self.max_score * 100.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyMember {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub designation: String,
    pub phone: String,
    /// Course codes taught (e.g. "CS301").
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Lecture,
    Tutorial,
    Lab,
    Assignment,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContentType::Lecture => "lecture",
            ContentType::Tutorial => "tutorial",
            ContentType::Lab => "lab",
            ContentType::Assignment => "assignment",
        })
    }
}

/// Study material in the content catalog. Titles are unique when compared
/// case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub subject_id: String,
    #[serde(rename = "type")]
    pub kind: ContentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    pub transcript: String,
    /// Display duration, e.g. "45:30".
    pub duration: String,
    pub upload_date: NaiveDate,
}

/// A subject where the student's average falls below the weak-area threshold.
/// Derived per analysis call.
#[derive(Debug, Clone, PartialEq)]
pub struct WeakArea {
    pub subject: String,
    pub average_score_percent: f64,
    pub recommended_topics: Vec<String>,
}

/// One recommended study item, carrying the full transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendedItem {
    pub title: String,
    pub subject: String,
    pub content: String,
}

/// Recommendation built from the primary weak area.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyRecommendation {
    pub message: String,
    pub content_items: Vec<RecommendedItem>,
}

/// Portal sections the host can switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Students,
    Subjects,
    Attendance,
    Reminders,
    Progress,
    Faculty,
    StudyContent,
}

impl Section {
    /// Identifier handed to the host's section-change callback.
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Students => "students",
            Section::Subjects => "subjects",
            Section::Attendance => "attendance",
            Section::Reminders => "reminders",
            Section::Progress => "progress",
            Section::Faculty => "faculty",
            Section::StudyContent => "study-content",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_identifiers() {
        assert_eq!(Section::Students.as_str(), "students");
        assert_eq!(Section::StudyContent.to_string(), "study-content");
    }

    #[test]
    fn test_content_item_deserializes_portal_layout() {
        let json = r#"{
            "id": "1",
            "title": "Introduction to Binary Trees",
            "description": "Lecture",
            "subjectId": "1",
            "type": "lecture",
            "transcript": "Welcome.",
            "duration": "45:30",
            "uploadDate": "2024-01-10"
        }"#;
        let item: ContentItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, ContentType::Lecture);
        assert_eq!(item.subject_id, "1");
        assert!(item.audio_url.is_none());
        assert_eq!(item.upload_date.to_string(), "2024-01-10");
    }

    #[test]
    fn test_assessment_percentage() {
        let record = AssessmentRecord {
            id: "1".into(),
            student_id: "1".into(),
            subject_id: "1".into(),
            assessment_type: "Quiz 1".into(),
            score: 45.0,
            max_score: 60.0,
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            student_name: "Aarav Shah".into(),
            subject_name: "Data Structures and Algorithms".into(),
        };
        assert!((record.percentage() - 75.0).abs() < f64::EPSILON);
    }
}
