//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{CoconutError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_session_config(&settings.session)?;
    validate_registration_config(&settings.registration)?;
    validate_export_config(&settings.export)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate backend API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.trim().is_empty() {
        return Err(CoconutError::Config(
            "API base URL is required (set COCONUT_API__BASE_URL)".to_string()
        ));
    }

    let url = url::Url::parse(&config.base_url)
        .map_err(|e| CoconutError::Config(format!("Invalid API base URL '{}': {}", config.base_url, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CoconutError::Config(
            format!("API base URL must use http or https, got '{}'", url.scheme())
        ));
    }

    if config.timeout_seconds == Some(0) {
        return Err(CoconutError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate session configuration
fn validate_session_config(config: &super::SessionConfig) -> Result<()> {
    if config.storage_path.trim().is_empty() {
        return Err(CoconutError::Config(
            "Session storage path is required".to_string()
        ));
    }

    if config.ttl_hours == Some(0) {
        return Err(CoconutError::Config(
            "Session TTL must be greater than 0".to_string()
        ));
    }
    config.ttl()?;

    Ok(())
}

/// Validate registration limits
fn validate_registration_config(config: &super::RegistrationConfig) -> Result<()> {
    if config.max_photo_bytes == 0 {
        return Err(CoconutError::Config(
            "Maximum photo size must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate export configuration
fn validate_export_config(config: &super::ExportConfig) -> Result<()> {
    if config.output_dir.trim().is_empty() {
        return Err(CoconutError::Config(
            "Export output directory is required".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(CoconutError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(CoconutError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
