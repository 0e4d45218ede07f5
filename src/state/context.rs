//! Application context
//!
//! Everything a command handler needs, built once at startup.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::settings::Settings;
use crate::middleware::auth::AuthGate;
use crate::services::ServiceFactory;
use crate::state::scenarios::RegistrationWizard;
use crate::state::storage::{FileSessionStore, SessionStore};
use crate::utils::errors::Result;

/// Application-wide context containing services and settings
#[derive(Debug, Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub services: Arc<ServiceFactory>,
    pub gate: AuthGate,
    pub session_store: Arc<dyn SessionStore>,
}

impl AppContext {
    /// Create a context around an existing session store
    pub fn new(settings: Settings, session_store: Arc<dyn SessionStore>) -> Result<Self> {
        let services = Arc::new(ServiceFactory::new(&settings, session_store.clone())?);
        let gate = AuthGate::new(session_store.clone());

        Ok(Self {
            settings,
            services,
            gate,
            session_store,
        })
    }

    /// Create a context whose session lives in the configured file
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&settings.session.storage_path));
        Self::new(settings, store)
    }

    /// A fresh registration form with the configured photo limit
    pub fn registration_wizard(&self) -> RegistrationWizard {
        RegistrationWizard::new(self.settings.registration.max_photo_bytes)
    }

    pub fn export_dir(&self) -> PathBuf {
        PathBuf::from(&self.settings.export.output_dir)
    }
}
