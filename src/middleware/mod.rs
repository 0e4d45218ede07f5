//! Middleware module
//!
//! This module contains the guard in front of admin views

pub mod auth;

// Re-export commonly used middleware
pub use auth::{AuthGate, GateDecision, GateOutcome};
