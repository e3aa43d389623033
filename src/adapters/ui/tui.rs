//! Implements InputPort. Inquire-based interactive host.
//!
//! The voice console stands in for a microphone: each typed line goes
//! through the console recognizer exactly like a recognized utterance.

use crate::adapters::speech::ConsoleRecognizer;
use crate::adapters::ui::navigator::TerminalNavigator;
use crate::domain::DomainError;
use crate::ports::{InputPort, RecordProvider};
use crate::usecases::{PerformanceAnalyzer, PortalStats, VoiceSession};
use async_trait::async_trait;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{InquireError, Select, Text};
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Characters of a transcript shown in a recommendation preview.
const PREVIEW_CHARS: usize = 150;

/// Applies the prompt theme globally.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("◆").with_fg(Color::Rgb {
            r: 0x08,
            g: 0x91,
            b: 0xb2,
        }))
        .with_highlighted_option_prefix(Styled::new("➤").with_fg(Color::LightCyan));
    inquire::set_global_render_config(config);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    VoiceConsole,
    Dashboard,
    StudyInsights,
    Listen,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 5] = [
        MenuItem::VoiceConsole,
        MenuItem::Dashboard,
        MenuItem::StudyInsights,
        MenuItem::Listen,
        MenuItem::Quit,
    ];
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MenuItem::VoiceConsole => "Voice commands",
            MenuItem::Dashboard => "Dashboard",
            MenuItem::StudyInsights => "Areas for improvement",
            MenuItem::Listen => "Listen to study content",
            MenuItem::Quit => "Quit",
        })
    }
}

/// True when the user backed out of a prompt (Esc / Ctrl-C).
fn is_cancel(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    session: Arc<VoiceSession>,
    recognizer: Arc<ConsoleRecognizer>,
    navigator: Arc<TerminalNavigator>,
    analyzer: Arc<PerformanceAnalyzer>,
    stats: Arc<PortalStats>,
    records: Arc<dyn RecordProvider>,
}

impl TuiInputPort {
    pub fn new(
        session: Arc<VoiceSession>,
        recognizer: Arc<ConsoleRecognizer>,
        navigator: Arc<TerminalNavigator>,
        analyzer: Arc<PerformanceAnalyzer>,
        stats: Arc<PortalStats>,
        records: Arc<dyn RecordProvider>,
    ) -> Self {
        Self {
            session,
            recognizer,
            navigator,
            analyzer,
            stats,
            records,
        }
    }

    async fn run_voice_console(&self) -> Result<(), DomainError> {
        self.session.start_listening()?;
        let mut handled = self.session.subscribe_handled();
        println!("Listening. Try \"open subjects\", \"read binary trees\", \"recommend\" or \"stop\".");
        loop {
            let line = match Text::new("🎙")
                .with_help_message("Type what you would say; empty line returns to the menu")
                .prompt()
            {
                Ok(line) => line,
                Err(e) if is_cancel(&e) => break,
                Err(e) => {
                    self.session.stop_listening();
                    return Err(DomainError::Input(e.to_string()));
                }
            };
            if line.trim().is_empty() {
                break;
            }
            handled.mark_unchanged();
            // The immediate response is printed before the next prompt.
            if self.recognizer.transcribe(&line) && handled.changed().await.is_err() {
                break;
            }
        }
        self.session.stop_listening();
        Ok(())
    }

    fn show_dashboard(&self) {
        let records = self.records.as_ref();
        println!();
        println!("Students:       {}", records.students().len());
        println!("Subjects:       {}", records.subjects().len());
        println!("Attendance:     {}", records.attendance().len());
        println!("Reminders:      {}", records.reminders().len());
        println!("Assessments:    {}", records.assessments().len());
        println!("Faculty:        {}", records.faculty().len());
        println!("Study content:  {}", records.content().len());
        if let Some(section) = self.navigator.active_section() {
            println!("Active section: {}", section);
        }

        let attendance = self.stats.attendance_breakdown();
        println!();
        println!(
            "Attendance: {} present, {} absent, {} late",
            attendance.present, attendance.absent, attendance.late
        );

        let student_id = self.session.default_student_id();
        let rows = self.stats.progress_rows(student_id);
        println!();
        println!("Progress for student {}:", student_id);
        for row in rows {
            println!(
                "  {:<20} {:>5}/{:<5} {:>3}%",
                row.subject_label, row.score, row.max_score, row.percentage
            );
        }
        println!();
    }

    fn show_study_insights(&self) -> Result<(), DomainError> {
        let students = self.records.students();
        let options: Vec<String> = students
            .iter()
            .map(|s| format!("{} ({})", s.name, s.roll_no))
            .collect();
        let choice = match Select::new("Student", options.clone()).prompt() {
            Ok(choice) => choice,
            Err(e) if is_cancel(&e) => return Ok(()),
            Err(e) => return Err(DomainError::Input(e.to_string())),
        };
        let Some(student) = options
            .iter()
            .position(|o| *o == choice)
            .map(|i| &students[i])
        else {
            return Ok(());
        };

        let weak_areas = self.analyzer.analyze_performance(&student.id);
        println!();
        if weak_areas.is_empty() {
            println!("Excellent Performance! You're performing well across all subjects. Keep up the great work!");
            println!();
            return Ok(());
        }

        println!("Areas for improvement:");
        for area in &weak_areas {
            println!(
                "  {} - average {:.1}%",
                area.subject, area.average_score_percent
            );
        }

        if let Some(rec) = self.analyzer.get_study_recommendation(&student.id) {
            println!();
            println!("{}", rec.message);
            for item in &rec.content_items {
                let preview: String = item.content.chars().take(PREVIEW_CHARS).collect();
                println!("  * {} [{}]", item.title, item.subject);
                println!("    {}...", preview);
            }
            println!("Voice tip: say \"read\" and a content title, or \"recommend\".");
        }
        println!();
        info!(student_id = %student.id, weak_areas = weak_areas.len(), "study insights shown");
        Ok(())
    }

    fn listen_to_content(&self) -> Result<(), DomainError> {
        let catalog = self.records.content();
        let playing = self.session.now_playing();
        let options: Vec<String> = catalog
            .iter()
            .map(|c| {
                let marker = if playing.as_deref() == Some(c.id.as_str()) {
                    " (playing, select to stop)"
                } else {
                    ""
                };
                format!("{} - {}, {}{}", c.title, c.kind, c.duration, marker)
            })
            .collect();
        let choice = match Select::new("Study content", options.clone()).prompt() {
            Ok(choice) => choice,
            Err(e) if is_cancel(&e) => return Ok(()),
            Err(e) => return Err(DomainError::Input(e.to_string())),
        };
        if let Some(item) = options
            .iter()
            .position(|o| *o == choice)
            .map(|i| &catalog[i])
        {
            self.session.toggle_playback(&item.id);
        }
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let choice = match Select::new("Main menu", MenuItem::ALL.to_vec()).prompt() {
                Ok(choice) => choice,
                Err(e) if is_cancel(&e) => MenuItem::Quit,
                Err(e) => return Err(DomainError::Input(e.to_string())),
            };
            match choice {
                MenuItem::VoiceConsole => {
                    if !self.session.is_supported() {
                        println!("Voice commands are not supported on this host.");
                        continue;
                    }
                    self.run_voice_console().await?;
                }
                MenuItem::Dashboard => self.show_dashboard(),
                MenuItem::StudyInsights => self.show_study_insights()?,
                MenuItem::Listen => self.listen_to_content()?,
                MenuItem::Quit => {
                    self.session.stop_speaking();
                    self.session.stop_listening();
                    info!("bye");
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_labels() {
        let labels: Vec<String> = MenuItem::ALL.iter().map(|m| m.to_string()).collect();
        assert_eq!(labels.first().map(String::as_str), Some("Voice commands"));
        assert_eq!(labels.last().map(String::as_str), Some("Quit"));
    }

    #[test]
    fn test_cancel_detection() {
        assert!(is_cancel(&InquireError::OperationCanceled));
        assert!(is_cancel(&InquireError::OperationInterrupted));
        assert!(!is_cancel(&InquireError::NotTTY));
    }
}
