//! COCONUT Computer Club event client
//!
//! Client library for the COCONUT Computer Club backend. Visitors browse
//! upcoming Open Class, Seminar and Webinar events and register for them;
//! administrators log in to manage events and review registrants.

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod state;
pub mod utils;
pub mod middleware;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{CoconutError, Result};

// Re-export main components for easy access
pub use services::ServiceFactory;
pub use state::{AppContext, SessionStore, FileSessionStore, MemorySessionStore};
pub use middleware::AuthGate;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

