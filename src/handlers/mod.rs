//! CLI handlers module
//!
//! This module contains the command handlers: each turns a parsed command
//! into service calls and renders the result as text.

pub mod commands;

// Re-export commonly used handler functions
pub use commands::{handle_command, AdminCommand, Command, RegisterArgs};
