//! Spoken briefings for portal sections: the "opening" line and the
//! follow-up summary read after it.

use crate::domain::Section;
use crate::ports::RecordProvider;

/// Attendance and progress briefings only read the most recent entries.
const RECENT_LIMIT: usize = 5;

/// Appended to the study-content summary.
pub const CONTENT_COMMANDS_HINT: &str = "Say read followed by a content title to listen to it, \
     or say recommend for personalized study suggestions.";

/// Immediate response when a section opens.
pub fn opening_line(section: Section) -> &'static str {
    match section {
        Section::Students => "Opening student records. Here are the students:",
        Section::Subjects => "Opening subjects section. Here are the available subjects:",
        Section::Attendance => "Opening attendance records. Here is the attendance information:",
        Section::Reminders => "Opening reminders section. Here are the upcoming reminders:",
        Section::Progress => "Opening progress records. Here are the latest assessment results:",
        Section::Faculty => "Opening faculty directory. Here are the faculty members:",
        Section::StudyContent => {
            "Opening study content section. Here are the available study materials:"
        }
    }
}

/// Follow-up summary of the section's record set.
pub fn section_summary(section: Section, records: &dyn RecordProvider) -> String {
    match section {
        Section::Students => {
            let students = join_sentences(records.students().iter().map(|s| {
                format!(
                    "{}, roll number {}, department {}, semester {}, GPA {}",
                    s.name, s.roll_no, s.department, s.semester, s.gpa
                )
            }));
            format!("The students are: {}", students)
        }
        Section::Subjects => {
            let subjects = join_sentences(records.subjects().iter().map(|s| {
                format!(
                    "{}, code {}, taught by {}, {} credits",
                    s.name, s.code, s.instructor, s.credits
                )
            }));
            format!("The subjects are: {}", subjects)
        }
        Section::Attendance => {
            let attendance = join_sentences(records.attendance().iter().take(RECENT_LIMIT).map(
                |a| {
                    format!(
                        "{} was {} for {} on {}",
                        a.student_name, a.status, a.subject_name, a.date
                    )
                },
            ));
            format!("Recent attendance: {}", attendance)
        }
        Section::Reminders => {
            let reminders = join_sentences(
                records
                    .reminders()
                    .iter()
                    .map(|r| format!("{} on {}, priority {}", r.title, r.date, r.priority)),
            );
            format!("Your reminders: {}", reminders)
        }
        Section::Progress => {
            let progress = join_sentences(records.assessments().iter().take(RECENT_LIMIT).map(
                |p| {
                    format!(
                        "{} scored {} out of {} in {} for {}",
                        p.student_name, p.score, p.max_score, p.assessment_type, p.subject_name
                    )
                },
            ));
            format!("Recent progress: {}", progress)
        }
        Section::Faculty => {
            let faculty = join_sentences(records.faculty().iter().map(|f| {
                format!(
                    "{}, {}, department {}, teaching {}",
                    f.name,
                    f.designation,
                    f.department,
                    f.subjects.join(" and ")
                )
            }));
            format!("Faculty members: {}", faculty)
        }
        Section::StudyContent => {
            let content = join_sentences(
                records
                    .content()
                    .iter()
                    .map(|c| format!("{}, {}, duration {}", c.title, c.kind, c.duration)),
            );
            format!("Study content: {}. {}", content, CONTENT_COMMANDS_HINT)
        }
    }
}

fn join_sentences(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join(". ")
}
