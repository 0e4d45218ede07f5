//! Error handling for the COCONUT client
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the COCONUT client
#[derive(Error, Debug)]
pub enum CoconutError {
    #[error("HTTP Error {status}: {reason}{}", .message.as_ref().map(|m| format!(" - {}", m)).unwrap_or_default())]
    Http {
        status: u16,
        reason: String,
        message: Option<String>,
    },

    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not logged in, run `coconut admin login` first")]
    NotAuthenticated,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Event not found: {category} #{id}")]
    EventNotFound { category: String, id: String },
}

/// Result type alias for COCONUT operations
pub type Result<T> = std::result::Result<T, CoconutError>;

impl CoconutError {
    /// Build an HTTP error from a status code and an optional server message
    pub fn http(status: reqwest::StatusCode, message: Option<String>) -> Self {
        CoconutError::Http {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message,
        }
    }

    /// HTTP status code carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            CoconutError::Http { status, .. } => Some(*status),
            CoconutError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message the user should see for this error.
    ///
    /// Server supplied messages win over the generic rendering.
    pub fn user_message(&self) -> String {
        match self {
            CoconutError::Http { message: Some(m), .. } => m.clone(),
            other => other.to_string(),
        }
    }

    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            CoconutError::Http { status, .. } => *status >= 500 || *status == 429,
            CoconutError::Transport(_) => true,
            CoconutError::Serialization(_) => false,
            CoconutError::Io(_) => true,
            CoconutError::UrlParse(_) => false,
            CoconutError::Config(_) => false,
            CoconutError::ConfigLoad(_) => false,
            CoconutError::Validation(_) => true,
            CoconutError::NotAuthenticated => true,
            CoconutError::InvalidInput(_) => true,
            CoconutError::InvalidStateTransition { .. } => false,
            CoconutError::EventNotFound { .. } => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoconutError::Config(_) => ErrorSeverity::Critical,
            CoconutError::ConfigLoad(_) => ErrorSeverity::Critical,
            CoconutError::NotAuthenticated => ErrorSeverity::Warning,
            CoconutError::Http { status: 401 | 403, .. } => ErrorSeverity::Warning,
            CoconutError::Validation(_) => ErrorSeverity::Info,
            CoconutError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
