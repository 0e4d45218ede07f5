//! Data models module
//!
//! This module contains all data structures exchanged with the backend API

pub mod event;
pub mod registration;
pub mod session;

use serde::Deserialize;

// Re-export commonly used models
pub use event::{Event, EventCategory, CategoryConfig, RecordId, TaggedEvent, EventPayload, EventForm, EventStatus, UpdateEventRequest, DeleteEventRequest};
pub use registration::{Registration, DeleteRegistrationRequest, ProofImage, PersonalInfo, RegistrationSubmission, RegistrationReceipt};
pub use session::{Session, SessionState, LoginRequest, LoginData, LOGIN_ROUTE};

/// Response envelope used by every endpoint: `{ "data": ..., "message": ... }`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Take the payload, treating a missing or null `data` as the default
    /// (an empty list for the list endpoints).
    pub fn into_data_or_default(self) -> T
    where
        T: Default,
    {
        self.data.unwrap_or_default()
    }
}
