//! Services module
//!
//! This module contains the backend client and the business logic built on it

pub mod api_client;
pub mod auth;
pub mod catalog;
pub mod events;
pub mod export;
pub mod registrations;

// Re-export commonly used services
pub use api_client::{ApiClient, build_url, requires_auth, ADMIN_PREFIX, LOGIN_PATH};
pub use auth::AuthService;
pub use catalog::{DashboardSummary, Tab};
pub use events::EventService;
pub use registrations::RegistrationService;

use std::sync::Arc;

use crate::config::settings::Settings;
use crate::state::storage::SessionStore;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub api: ApiClient,
    pub auth_service: AuthService,
    pub event_service: EventService,
    pub registration_service: RegistrationService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services sharing one client and
    /// one session store
    pub fn new(settings: &Settings, store: Arc<dyn SessionStore>) -> Result<Self> {
        let api = ApiClient::new(&settings.api, store.clone())?;
        let auth_service = AuthService::new(api.clone(), store, &settings.session)?;
        let event_service = EventService::new(api.clone());
        let registration_service = RegistrationService::new(api.clone(), settings.registration.send_event_id);

        Ok(Self {
            api,
            auth_service,
            event_service,
            registration_service,
        })
    }
}
