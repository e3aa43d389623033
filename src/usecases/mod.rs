//! Application use cases. Orchestrate domain logic via ports.

pub mod briefing;
pub mod command_interpreter;
pub mod performance_analyzer;
pub mod portal_stats;
pub mod voice_session;

pub use command_interpreter::{CommandInterpreter, CommandOutcome, Intent};
pub use performance_analyzer::PerformanceAnalyzer;
pub use portal_stats::PortalStats;
pub use voice_session::{SessionCapabilities, VoiceSession};
