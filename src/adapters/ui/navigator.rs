//! Implements SectionNavigator for the terminal host: remembers the active
//! section and prints a marker when it changes.

use crate::domain::Section;
use crate::ports::SectionNavigator;
use crossterm::ExecutableCommand;
use crossterm::style::{Attribute, Print, SetAttribute};
use std::io::stdout;
use std::sync::Mutex;
use tracing::info;

#[derive(Default)]
pub struct TerminalNavigator {
    active: Mutex<Option<Section>>,
}

impl TerminalNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_section(&self) -> Option<Section> {
        *self
            .active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SectionNavigator for TerminalNavigator {
    fn on_section_change(&self, section: Section) {
        *self
            .active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(section);
        info!(section = %section, "section changed");
        let mut out = stdout();
        let _ = out.execute(SetAttribute(Attribute::Bold));
        let _ = out.execute(Print(format!("\r\n[section: {}]\r\n", section)));
        let _ = out.execute(SetAttribute(Attribute::Reset));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_active_section() {
        let navigator = TerminalNavigator::new();
        assert_eq!(navigator.active_section(), None);
        navigator.on_section_change(Section::Faculty);
        navigator.on_section_change(Section::Reminders);
        assert_eq!(navigator.active_section(), Some(Section::Reminders));
    }
}
