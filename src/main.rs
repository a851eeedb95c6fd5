//! HeartGuard: heart-disease risk assessment form
//!
//! Main entry point for the terminal application.

use anyhow::Result;
use std::fs::File;
use std::io::IsTerminal;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use heartguard::adapters::redact::RedactingMakeWriter;
use heartguard::tui::App;
use heartguard::{AppConfig, MISSING_MODEL_MESSAGE};

/// Where log lines end up.
#[derive(Debug)]
enum LogSink {
    File(File),
    Stdout,
    Stderr,
    /// Log file unusable while the TUI owns the terminal.
    Discard,
}

fn open_log_sink(config: &AppConfig, interactive: bool) -> LogSink {
    // Writing logs to the terminal would corrupt the TUI (alternate screen).
    if !config.log_mode.use_file(interactive) {
        return LogSink::Stdout;
    }

    if let Some(parent) = config.log_file.parent() {
        // Best-effort: the open below reports the real failure.
        let _ = std::fs::create_dir_all(parent);
    }

    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
    {
        Ok(file) => LogSink::File(file),
        Err(e) => {
            eprintln!(
                "Warning: cannot open log file {}: {e}",
                config.log_file.display()
            );
            if interactive {
                LogSink::Discard
            } else {
                LogSink::Stderr
            }
        }
    }
}

fn init_logging(config: &AppConfig) -> WorkerGuard {
    let (writer, guard) = match open_log_sink(config, std::io::stdout().is_terminal()) {
        LogSink::File(file) => tracing_appender::non_blocking(file),
        LogSink::Stdout => tracing_appender::non_blocking(std::io::stdout()),
        LogSink::Stderr => tracing_appender::non_blocking(std::io::stderr()),
        LogSink::Discard => tracing_appender::non_blocking(std::io::sink()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(RedactingMakeWriter::new(writer)),
        )
        .init();

    guard
}

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    let guard = init_logging(&config);

    tracing::info!("Starting HeartGuard...");

    let mut app = match App::new(&config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("Startup failed: {}", e);
            eprintln!("{MISSING_MODEL_MESSAGE}");
            drop(guard);
            std::process::exit(1);
        }
    };

    app.run()?;

    tracing::info!("HeartGuard shutdown complete.");
    Ok(())
}
