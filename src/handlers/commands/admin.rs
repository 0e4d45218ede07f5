//! Admin command handlers
//!
//! Everything except `login`, `logout` and `status` goes through the
//! [`AuthGate`](crate::middleware::AuthGate).

use std::fmt::Write as _;

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use tracing::{debug, info};

use crate::handlers::commands::{confirm, into_rendered};
use crate::models::{Event, EventCategory, EventForm, RecordId, SessionState};
use crate::services::catalog::{search_events, DashboardSummary};
use crate::state::AppContext;
use crate::utils::errors::{CoconutError, Result};
use crate::utils::helpers::{format_date_id, format_datetime_id, format_time_hm};

use super::registrations::{handle_registrations_command, RegistrationsCommand};

/// `admin ...`
#[derive(Debug, Clone, Subcommand)]
pub enum AdminCommand {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show whether a session is stored
    Status,
    /// Event counts and the latest additions
    Dashboard,
    /// Manage events of one category
    #[command(subcommand)]
    Events(EventsCommand),
    /// Review registrants of one category
    #[command(subcommand)]
    Registrations(RegistrationsCommand),
}

/// `admin events ...`
#[derive(Debug, Clone, Subcommand)]
pub enum EventsCommand {
    List {
        category: EventCategory,
        /// Filter by title, instructor or location
        #[arg(long)]
        search: Option<String>,
    },
    Create {
        category: EventCategory,
        #[command(flatten)]
        form: EventFormArgs,
    },
    /// Change an event; fields not given keep their current value
    Update {
        category: EventCategory,
        id: String,
        #[command(flatten)]
        form: EventFormArgs,
    },
    Delete {
        category: EventCategory,
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Event form fields as typed on the command line
#[derive(Debug, Clone, Default, Args)]
pub struct EventFormArgs {
    #[arg(long)]
    pub title: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,
    /// Start time, e.g. "14:00" or "14:00 - 16:00"
    #[arg(long)]
    pub time: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub quota: Option<String>,
    #[arg(long)]
    pub instructor: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

impl EventFormArgs {
    /// Overlay the given fields onto `form`
    pub fn apply_to(self, mut form: EventForm) -> EventForm {
        let fields = [
            (self.title, &mut form.title),
            (self.date, &mut form.date),
            (self.time, &mut form.time),
            (self.location, &mut form.location),
            (self.quota, &mut form.quota),
            (self.instructor, &mut form.instructor),
            (self.description, &mut form.description),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        form
    }
}

/// Dispatch `admin ...`
pub async fn handle_admin_command(ctx: &AppContext, cmd: AdminCommand, today: NaiveDate) -> Result<String> {
    match cmd {
        AdminCommand::Login { username, password } => handle_login(ctx, &username, &password).await,
        AdminCommand::Logout => handle_logout(ctx),
        AdminCommand::Status => handle_status(ctx),
        AdminCommand::Dashboard => handle_dashboard(ctx, today).await,
        AdminCommand::Events(cmd) => handle_events_command(ctx, cmd, today).await,
        AdminCommand::Registrations(cmd) => handle_registrations_command(ctx, cmd).await,
    }
}

pub async fn handle_login(ctx: &AppContext, username: &str, password: &str) -> Result<String> {
    let session = ctx.services.auth_service.login(username, password).await?;
    let name = session.username().unwrap_or(username);
    Ok(format!("Login berhasil. Selamat datang, {}.", name))
}

pub fn handle_logout(ctx: &AppContext) -> Result<String> {
    ctx.services.auth_service.logout()?;
    Ok("Logout berhasil.".to_string())
}

pub fn handle_status(ctx: &AppContext) -> Result<String> {
    Ok(match ctx.services.auth_service.state()? {
        SessionState::LoggedOut => "Belum login.".to_string(),
        SessionState::LoggedIn(session) => {
            let mut out = format!(
                "Login sebagai {} sejak {}",
                session.username().unwrap_or("admin"),
                format_datetime_id(&session.created_at)
            );
            if let Some(expires_at) = session.expires_at {
                let _ = write!(out, ", berlaku sampai {}", format_datetime_id(&expires_at));
            }
            out
        }
    })
}

pub async fn handle_dashboard(ctx: &AppContext, today: NaiveDate) -> Result<String> {
    let outcome = ctx
        .gate
        .guard_async(|_session| async move {
            let events = ctx.services.event_service.list_all_admin().await?;
            Ok(render_dashboard(&DashboardSummary::build(&events, today)))
        })
        .await?;
    into_rendered(outcome)
}

pub async fn handle_events_command(ctx: &AppContext, cmd: EventsCommand, today: NaiveDate) -> Result<String> {
    let outcome = ctx
        .gate
        .guard_async(|_session| async move {
            match cmd {
                EventsCommand::List { category, search } => list_events(ctx, category, search.as_deref(), today).await,
                EventsCommand::Create { category, form } => create_event(ctx, category, form, today).await,
                EventsCommand::Update { category, id, form } => {
                    update_event(ctx, category, &RecordId::new(id), form, today).await
                }
                EventsCommand::Delete { category, id, yes } => {
                    delete_event(ctx, category, &RecordId::new(id), yes, today).await
                }
            }
        })
        .await?;
    into_rendered(outcome)
}

async fn list_events(ctx: &AppContext, category: EventCategory, search: Option<&str>, today: NaiveDate) -> Result<String> {
    let events = ctx.services.event_service.list_admin(category).await?;
    let shown = search_events(&events, search.unwrap_or(""));
    Ok(render_event_table(category, &shown, today))
}

async fn create_event(ctx: &AppContext, category: EventCategory, form: EventFormArgs, today: NaiveDate) -> Result<String> {
    let payload = form.apply_to(EventForm::default()).into_payload()?;
    let message = ctx.services.event_service.create(category, &payload).await?;

    let mut out = message.unwrap_or_else(|| format!("{} berhasil ditambahkan.", category));
    out.push_str("\n\n");
    out.push_str(&list_events(ctx, category, None, today).await?);
    Ok(out)
}

async fn update_event(
    ctx: &AppContext,
    category: EventCategory,
    id: &RecordId,
    form: EventFormArgs,
    today: NaiveDate,
) -> Result<String> {
    let current = find_admin_event(ctx, category, id).await?;
    let payload = form.apply_to(EventForm::from_event(&current)).into_payload()?;
    let message = ctx.services.event_service.update(category, id, payload).await?;

    let mut out = message.unwrap_or_else(|| format!("{} berhasil diperbarui.", category));
    out.push_str("\n\n");
    out.push_str(&list_events(ctx, category, None, today).await?);
    Ok(out)
}

async fn delete_event(
    ctx: &AppContext,
    category: EventCategory,
    id: &RecordId,
    assume_yes: bool,
    today: NaiveDate,
) -> Result<String> {
    let event = find_admin_event(ctx, category, id).await?;
    let prompt = format!("Hapus {} \"{}\"?", category, event.title);
    if !confirm(&prompt, assume_yes)? {
        debug!(category = %category, id = %id, "Delete cancelled");
        return Ok("Dibatalkan.".to_string());
    }

    let message = ctx.services.event_service.delete(category, id).await?;
    info!(category = %category, id = %id, "Event deleted");

    let mut out = message.unwrap_or_else(|| format!("{} berhasil dihapus.", category));
    out.push_str("\n\n");
    out.push_str(&list_events(ctx, category, None, today).await?);
    Ok(out)
}

async fn find_admin_event(ctx: &AppContext, category: EventCategory, id: &RecordId) -> Result<Event> {
    ctx.services
        .event_service
        .list_admin(category)
        .await?
        .into_iter()
        .find(|e| &e.id == id)
        .ok_or_else(|| CoconutError::EventNotFound {
            category: category.label().to_string(),
            id: id.to_string(),
        })
}

pub fn render_event_table(category: EventCategory, events: &[Event], today: NaiveDate) -> String {
    if events.is_empty() {
        return format!("Belum ada {}.", category);
    }
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", category, events.len());
    for event in events {
        let _ = writeln!(
            out,
            "#{} {} | {} | {} | {} | {}/{} | {}",
            event.id,
            event.title,
            event.date.map(format_date_id).unwrap_or_else(|| "-".to_string()),
            event.time.map(format_time_hm).unwrap_or_else(|| "-".to_string()),
            event.location,
            event.registered_or_zero(),
            event.quota,
            event.status(today)
        );
    }
    out.trim_end().to_string()
}

pub fn render_dashboard(summary: &DashboardSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total kegiatan : {}", summary.total_events);
    let _ = writeln!(out, "Kegiatan aktif : {}", summary.active_events);
    for count in &summary.per_category {
        let _ = writeln!(out, "  {}: {} ({} aktif)", count.category, count.total, count.active);
    }
    if !summary.recent.is_empty() {
        let _ = writeln!(out, "\nBaru ditambahkan:");
        for tagged in &summary.recent {
            let _ = writeln!(
                out,
                "  [{}] {} ({})",
                tagged.category,
                tagged.event.title,
                tagged.event.date.map(format_date_id).unwrap_or_else(|| "-".to_string())
            );
        }
    }
    out.trim_end().to_string()
}
