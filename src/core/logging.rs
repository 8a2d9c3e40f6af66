//! Logging Module
//!
//! Sets up `tracing` output for the viewer:
//! - stdout (pretty, or JSON lines)
//! - optional daily-rolling JSON file log (tracing-appender)
//! - `log` crate records redirected into `tracing`
//! - miette report hook for load errors

use std::fs;
use std::io;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

/// File name used for the rolling file log.
pub const LOG_FILE_NAME: &str = "sheetview.log";

/// Filter from `RUST_LOG`, falling back to the configured directive.
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter))
}

/// Initialize the logging system.
///
/// Returns a `WorkerGuard` when a file log is configured; it must be kept
/// alive so buffered lines are flushed on shutdown. Calling this more than
/// once leaves the first subscriber in place.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let stdout_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stdout)
            .json()
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stdout)
            .pretty()
            .boxed()
    };

    let mut guard = None;
    let file_layer = config.log_dir.as_ref().and_then(|log_dir| {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create logs directory {}: {}", log_dir.display(), e);
            return None;
        }
        let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
        let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(worker_guard);

        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .json()
                .with_file(true)
                .with_line_number(true)
                .with_target(true),
        )
    });

    if let Err(e) = tracing_subscriber::registry()
        .with(build_filter(config))
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
    {
        eprintln!("Logging already initialized: {}", e);
        return guard;
    }

    // Redirect `log` macros; already done if the subscriber installed it.
    let _ = tracing_log::LogTracer::init();

    init_miette();

    tracing::info!(
        json = config.json,
        log_dir = ?config.log_dir,
        "Logging initialized"
    );

    guard
}

fn init_miette() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .build(),
        )
    }))
    .ok(); // Ignore if already set
}
