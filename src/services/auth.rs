//! Authentication service implementation
//!
//! This service owns the admin session: it is the only writer of the
//! session store and publishes every login and logout on a watch channel.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::settings::SessionConfig;
use crate::models::{ApiEnvelope, LoginData, LoginRequest, Session, SessionState};
use crate::services::api_client::{ApiClient, LOGIN_PATH};
use crate::state::storage::SessionStore;
use crate::utils::errors::{CoconutError, Result};

/// Login, logout and session lookup for administrators
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
    store: Arc<dyn SessionStore>,
    ttl: Option<chrono::Duration>,
    state_tx: Arc<watch::Sender<SessionState>>,
}

impl AuthService {
    /// Create a new AuthService, seeding the published state from the store
    pub fn new(api: ApiClient, store: Arc<dyn SessionStore>, config: &SessionConfig) -> Result<Self> {
        let initial = match store.load()? {
            Some(session) => SessionState::LoggedIn(session),
            None => SessionState::LoggedOut,
        };
        let (state_tx, _) = watch::channel(initial);

        Ok(Self {
            api,
            store,
            ttl: config.ttl()?,
            state_tx: Arc::new(state_tx),
        })
    }

    /// Exchange credentials for a token and persist the session.
    ///
    /// On any failure the stored state is left untouched.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(CoconutError::Validation("Username dan password wajib diisi".to_string()));
        }

        debug!(username = username, "Logging in");

        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        let response: ApiEnvelope<LoginData> = self.api.post(LOGIN_PATH, &request).await.map_err(|e| {
            warn!(username = username, error = %e, "Login rejected");
            e
        })?;

        let data = response
            .data
            .filter(|d| !d.token.is_empty())
            .ok_or_else(|| CoconutError::Validation("Respons login tidak berisi token".to_string()))?;

        let session = Session::new(data.token, data.user, self.ttl);
        self.store.save(&session)?;
        self.state_tx.send_replace(SessionState::LoggedIn(session.clone()));

        info!(username = username, expires_at = ?session.expires_at, "Admin logged in");
        Ok(session)
    }

    /// Forget the stored session. The backend is not told.
    pub fn logout(&self) -> Result<()> {
        self.store.clear()?;
        self.state_tx.send_replace(SessionState::LoggedOut);
        info!("Admin logged out");
        Ok(())
    }

    /// Current state as recorded in the store
    pub fn state(&self) -> Result<SessionState> {
        Ok(match self.store.load()? {
            Some(session) => SessionState::LoggedIn(session),
            None => SessionState::LoggedOut,
        })
    }

    /// Session or [`CoconutError::NotAuthenticated`]
    pub fn require_session(&self) -> Result<Session> {
        self.store.load()?.ok_or(CoconutError::NotAuthenticated)
    }

    /// Observe login and logout as they happen
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }
}
