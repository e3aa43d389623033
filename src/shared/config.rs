//! Application configuration. Record source, recommendation target, timing.

use serde::Deserialize;

/// Delay before a command's follow-up response is spoken.
pub const DEFAULT_FOLLOW_UP_DELAY_MS: u64 = 1000;

/// Student the "recommend" command reports on when none is configured.
pub const DEFAULT_STUDENT_ID: &str = "2";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// JSON record file. Bundled demo records are used when unset. Read from CAMPUS_VOICE_RECORDS_PATH.
    #[serde(default)]
    pub records_path: Option<String>,

    /// Student the "recommend" voice command reports on. Read from CAMPUS_VOICE_DEFAULT_STUDENT_ID.
    /// The voice assistant does not know who is signed in, so this is a single fixed binding.
    #[serde(default)]
    pub default_student_id: Option<String>,

    /// Delay in ms before a follow-up response (section summary, recommended titles).
    /// Read from CAMPUS_VOICE_FOLLOW_UP_DELAY_MS.
    #[serde(default)]
    pub follow_up_delay_ms: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("CAMPUS_VOICE"));
        if let Ok(path) = std::env::var("CAMPUS_VOICE_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // Environment values arrive as strings; parse the numeric one explicitly.
        if let Ok(s) = std::env::var("CAMPUS_VOICE_FOLLOW_UP_DELAY_MS") {
            if let Ok(ms) = s.parse::<u64>() {
                cfg.follow_up_delay_ms = Some(ms);
            }
        }
        Ok(cfg)
    }

    /// Returns the follow-up delay in milliseconds. Defaults to 1000 if unset.
    pub fn follow_up_delay_ms_or_default(&self) -> u64 {
        self.follow_up_delay_ms
            .unwrap_or(DEFAULT_FOLLOW_UP_DELAY_MS)
    }

    /// Returns the recommendation target. Defaults to DEFAULT_STUDENT_ID.
    pub fn default_student_id_or_default(&self) -> String {
        self.default_student_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STUDENT_ID.to_string())
    }
}
