//! State management module
//!
//! This module handles the admin session store, the registration wizard
//! and the application context

pub mod context;
pub mod scenarios;
pub mod storage;

// Re-export commonly used state components
pub use context::AppContext;
pub use scenarios::{RegistrationWizard, WizardStep};
pub use storage::{FileSessionStore, MemorySessionStore, SessionStore};
