//! Command handlers module
//!
//! This module contains handlers for every command of the `coconut` CLI.
//! Handlers return the text to print; `main` does the printing.

pub mod admin;
pub mod events;
pub mod register;
pub mod registrations;

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use clap::Subcommand;
use tracing::warn;

use crate::middleware::GateOutcome;
use crate::models::{EventCategory, RecordId};
use crate::state::AppContext;
use crate::utils::errors::{CoconutError, Result};

pub use admin::AdminCommand;
pub use register::RegisterArgs;

/// All available commands
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List upcoming events
    Events {
        /// Only show one category
        #[arg(long)]
        category: Option<EventCategory>,
    },
    /// Show one event
    Event { category: EventCategory, id: String },
    /// Register for an event
    Register(RegisterArgs),
    /// Administrator commands
    #[command(subcommand)]
    Admin(AdminCommand),
}

/// Main command dispatcher
pub async fn handle_command(ctx: &AppContext, cmd: Command, today: NaiveDate) -> Result<String> {
    match cmd {
        Command::Events { category } => events::handle_events_list(ctx, category, today).await,
        Command::Event { category, id } => events::handle_event_detail(ctx, category, &RecordId::new(id)).await,
        Command::Register(args) => register::handle_register(ctx, args).await,
        Command::Admin(cmd) => admin::handle_admin_command(ctx, cmd, today).await,
    }
}

/// Turn a gate redirect into [`CoconutError::NotAuthenticated`]
pub(crate) fn into_rendered(outcome: GateOutcome<String>) -> Result<String> {
    match outcome {
        GateOutcome::Rendered(text) => Ok(text),
        GateOutcome::Redirect { to } => {
            warn!(redirect = to, "Admin command refused without session");
            Err(CoconutError::NotAuthenticated)
        }
    }
}

/// Ask a yes/no question on the terminal unless `assume_yes` is set
pub(crate) fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    let mut stderr = io::stderr();
    write!(stderr, "{} [y/N] ", prompt)?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "ya" | "yes")
}
