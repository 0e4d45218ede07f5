//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

use crate::utils::errors::CoconutError;

/// Environment variable prefix, nested keys are separated with `__`
/// (for example `COCONUT_API__BASE_URL`).
pub const ENV_PREFIX: &str = "COCONUT";

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub registration: RegistrationConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub uploads_path: String,
    pub user_agent: String,
    pub timeout_seconds: Option<u64>,
}

/// Admin session persistence
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    pub storage_path: String,
    pub ttl_hours: Option<u64>,
}

/// Public registration form limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistrationConfig {
    pub max_photo_bytes: u64,
    /// Also transmit the chosen event id with the form. The web form never did.
    pub send_event_id: bool,
}

/// CSV export configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    pub output_dir: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling `coconut.log` files
    pub log_dir: Option<String>,
    pub json: bool,
}

impl SessionConfig {
    /// Session lifetime, or `None` when sessions never expire.
    ///
    /// Rejects lifetimes that do not fit a timestamp.
    pub fn ttl(&self) -> Result<Option<chrono::Duration>, CoconutError> {
        let Some(hours) = self.ttl_hours else {
            return Ok(None);
        };
        i64::try_from(hours)
            .ok()
            .and_then(chrono::Duration::try_hours)
            .filter(|ttl| chrono::Utc::now().checked_add_signed(*ttl).is_some())
            .map(Some)
            .ok_or_else(|| CoconutError::Config(format!("Session TTL of {} hours is out of range", hours)))
    }
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load_from("coconut")
    }

    /// Load settings from a named configuration file (extension optional)
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        let defaults = Settings::default();

        let settings = config::Config::builder()
            .set_default("api.base_url", defaults.api.base_url)?
            .set_default("api.uploads_path", defaults.api.uploads_path)?
            .set_default("api.user_agent", defaults.api.user_agent)?
            .set_default("session.storage_path", defaults.session.storage_path)?
            .set_default("registration.max_photo_bytes", defaults.registration.max_photo_bytes)?
            .set_default("registration.send_event_id", defaults.registration.send_event_id)?
            .set_default("export.output_dir", defaults.export.output_dir)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.json", defaults.logging.json)?
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), CoconutError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: String::new(),
                uploads_path: "uploads".to_string(),
                user_agent: format!("coconut-club/{}", env!("CARGO_PKG_VERSION")),
                timeout_seconds: None,
            },
            session: SessionConfig {
                storage_path: ".coconut/session.json".to_string(),
                ttl_hours: None,
            },
            registration: RegistrationConfig {
                max_photo_bytes: 10 * 1024 * 1024,
                send_event_id: false,
            },
            export: ExportConfig {
                output_dir: ".".to_string(),
            },
            logging: LoggingConfig {
                level: "warn".to_string(),
                log_dir: None,
                json: false,
            },
        }
    }
}
