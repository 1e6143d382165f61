//! Logging initialization.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::Result;

/// Initialize the logging system with the given configuration.
///
/// Always logs to stdout; when a log file is configured the same output is
/// mirrored there.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let Some(file) = &config.file else {
        init_console_only(&config.level);
        return Ok(());
    };

    // Ensure log directory exists
    if let Some(parent) = Path::new(file).parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let log_file = Arc::new(File::create(file)?);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout.and(log_file))
                .with_ansi(false)
                .with_target(true),
        )
        .with(env_filter(&config.level))
        .init();

    Ok(())
}

/// Console-only initialization; also the fallback when file setup fails.
pub fn init_console_only(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_target(true),
        )
        .with(env_filter(level))
        .init();
}

fn env_filter(level: &str) -> EnvFilter {
    let level: Level = level.parse().unwrap_or(Level::INFO);
    EnvFilter::from_default_env().add_directive(level.into())
}
