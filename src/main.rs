//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here; commands are interpreted by the voice session.

use campus_voice::adapters::records::{InMemoryRecords, load_records};
use campus_voice::adapters::speech::{ConsoleRecognizer, ConsoleSynthesizer, TokioScheduler};
use campus_voice::adapters::ui::navigator::TerminalNavigator;
use campus_voice::adapters::ui::tui::TuiInputPort;
use campus_voice::ports::{
    InputPort, RecordProvider, Scheduler, SectionNavigator, SpeechRecognizer, SpeechSynthesizer,
};
use campus_voice::shared::config::AppConfig;
use campus_voice::usecases::{
    CommandInterpreter, PerformanceAnalyzer, PortalStats, SessionCapabilities, VoiceSession,
};
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    campus_voice::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config could not be loaded; using defaults");
        AppConfig::default()
    });

    // --- Records (read-only) ---
    let records: Arc<dyn RecordProvider> = match cfg.records_path.as_deref() {
        Some(path) => Arc::new(
            load_records(path)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?,
        ),
        None => {
            info!("CAMPUS_VOICE_RECORDS_PATH not set, using bundled demo records");
            Arc::new(InMemoryRecords::demo().map_err(|e| anyhow::anyhow!("{}", e))?)
        }
    };

    // --- Speech capabilities: events flow back over unbounded channels ---
    let (speech_tx, speech_rx) = mpsc::unbounded_channel();
    let (recognition_tx, recognition_rx) = mpsc::unbounded_channel();
    let synthesizer: Arc<dyn SpeechSynthesizer> = Arc::new(ConsoleSynthesizer::new(speech_tx));
    let console_recognizer = Arc::new(ConsoleRecognizer::new(recognition_tx));
    let recognizer: Arc<dyn SpeechRecognizer> =
        Arc::clone(&console_recognizer) as Arc<dyn SpeechRecognizer>;
    let terminal_navigator = Arc::new(TerminalNavigator::new());
    let navigator: Arc<dyn SectionNavigator> =
        Arc::clone(&terminal_navigator) as Arc<dyn SectionNavigator>;
    let scheduler: Arc<dyn Scheduler> = Arc::new(TokioScheduler::current());

    // --- Services ---
    let default_student_id = cfg.default_student_id_or_default();
    let follow_up_delay_ms = cfg.follow_up_delay_ms_or_default();
    info!(
        default_student_id = %default_student_id,
        follow_up_delay_ms,
        "voice session configured"
    );

    let analyzer = Arc::new(PerformanceAnalyzer::new(Arc::clone(&records)));
    let stats = Arc::new(PortalStats::new(Arc::clone(&records)));
    let interpreter = CommandInterpreter::new(
        Arc::clone(&records),
        Arc::clone(&analyzer),
        default_student_id,
    );
    let session = Arc::new(VoiceSession::new(
        interpreter,
        Arc::clone(&records),
        SessionCapabilities {
            synthesizer,
            recognizer: Some(recognizer),
            navigator,
            scheduler,
        },
        Duration::from_millis(follow_up_delay_ms),
    ));

    tokio::spawn(Arc::clone(&session).pump_recognition(recognition_rx));
    tokio::spawn(Arc::clone(&session).pump_speech(speech_rx));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        Arc::clone(&session),
        console_recognizer,
        terminal_navigator,
        analyzer,
        stats,
        records,
    ));

    // --- Run (main menu -> Voice commands / Dashboard / Insights / Listen) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
