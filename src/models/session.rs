//! Admin session model

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Route the auth gate sends unauthenticated visitors to
pub const LOGIN_ROUTE: &str = "/admin/login";

/// A stored admin credential.
///
/// The backend issues no expiry; `expires_at` is only set when a local TTL
/// is configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(token: impl Into<String>, user: Option<serde_json::Value>, ttl: Option<Duration>) -> Self {
        let created_at = Utc::now();
        Self {
            token: token.into(),
            user,
            created_at,
            expires_at: ttl.and_then(|ttl| created_at.checked_add_signed(ttl)),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|exp| now >= exp).unwrap_or(false)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Display name from the user blob, when the backend sent one
    pub fn username(&self) -> Option<&str> {
        let user = self.user.as_ref()?;
        ["username", "name", "email"]
            .iter()
            .find_map(|key| user.get(*key).and_then(|v| v.as_str()))
    }
}

/// `LoggedOut -> LoggedIn -> LoggedOut`; nothing else is modelled.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn(Session),
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, SessionState::LoggedIn(_))
    }
}

/// Body for `POST /admin/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `data` part of the login response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: String,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}
