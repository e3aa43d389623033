//! Speech capability adapters. Console stand-ins for the host's
//! text-to-speech and speech-to-text engines, plus the timer used for
//! follow-up responses.

pub mod console;
pub mod scheduler;

pub use console::{ConsoleRecognizer, ConsoleSynthesizer};
pub use scheduler::TokioScheduler;
