//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the COCONUT client.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{CoconutError, Result};

/// File name prefix of the rolling log files inside `logging.log_dir`
pub const LOG_FILE_PREFIX: &str = "coconut.log";

/// Initialize logging based on configuration.
///
/// Console output goes to stderr so command output on stdout stays clean.
/// The returned guard must be kept alive for the file writer to flush.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| CoconutError::Config(format!("Invalid log filter '{}': {}", config.level, e)))?;

    let console = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| CoconutError::Config(format!("Logging already initialized: {}", e)))?;

    debug!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log admin actions
pub fn log_admin_action(action: &str, category: &str, target: Option<&str>) {
    warn!(
        action = action,
        category = category,
        target = target,
        "Admin action performed"
    );
}

/// Log a submitted registration
pub fn log_registration(category: &str, email: &str, event_id: Option<&str>) {
    info!(
        category = category,
        email = email,
        event_id = event_id,
        "Registration submitted"
    );
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}
