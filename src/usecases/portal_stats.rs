//! Dashboard aggregations: attendance breakdown and per-student progress rows.

use crate::domain::AttendanceStatus;
use crate::ports::RecordProvider;
use std::sync::Arc;

/// Attendance counts across every record.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceBreakdown {
    pub present: usize,
    pub absent: usize,
    pub late: usize,
}

impl AttendanceBreakdown {
    pub fn total(&self) -> usize {
        self.present + self.absent + self.late
    }
}

/// One assessment as shown on the progress chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRow {
    /// First two words of the subject name.
    pub subject_label: String,
    pub score: f64,
    pub max_score: f64,
    /// Rounded to the nearest whole percent.
    pub percentage: u32,
}

pub struct PortalStats {
    records: Arc<dyn RecordProvider>,
}

impl PortalStats {
    pub fn new(records: Arc<dyn RecordProvider>) -> Self {
        Self { records }
    }

    pub fn attendance_breakdown(&self) -> AttendanceBreakdown {
        self.records
            .attendance()
            .iter()
            .fold(AttendanceBreakdown::default(), |mut acc, record| {
                match record.status {
                    AttendanceStatus::Present => acc.present += 1,
                    AttendanceStatus::Absent => acc.absent += 1,
                    AttendanceStatus::Late => acc.late += 1,
                }
                acc
            })
    }

    /// The student's assessments in record order.
    pub fn progress_rows(&self, student_id: &str) -> Vec<ProgressRow> {
        self.records
            .assessments()
            .iter()
            .filter(|r| r.student_id == student_id)
            .map(|r| ProgressRow {
                subject_label: r
                    .subject_name
                    .split(' ')
                    .take(2)
                    .collect::<Vec<_>>()
                    .join(" "),
                score: r.score,
                max_score: r.max_score,
                percentage: r.percentage().round() as u32,
            })
            .collect()
    }
}
