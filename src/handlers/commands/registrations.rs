//! Admin registration review handlers

use std::fmt::Write as _;
use std::path::PathBuf;

use chrono::Local;
use clap::Subcommand;
use tracing::{debug, info};

use crate::handlers::commands::{confirm, into_rendered};
use crate::models::{EventCategory, RecordId, Registration};
use crate::services::{export, registrations};
use crate::state::AppContext;
use crate::utils::errors::{CoconutError, Result};
use crate::utils::helpers::format_datetime_id;

/// `admin registrations ...`
#[derive(Debug, Clone, Subcommand)]
pub enum RegistrationsCommand {
    List {
        category: EventCategory,
        /// Filter by name, email, phone or university
        #[arg(long)]
        search: Option<String>,
    },
    Delete {
        category: EventCategory,
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Write the (filtered) list to a CSV file
    Export {
        category: EventCategory,
        #[arg(long)]
        search: Option<String>,
        /// Defaults to `export.output_dir`
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

pub async fn handle_registrations_command(ctx: &AppContext, cmd: RegistrationsCommand) -> Result<String> {
    let outcome = ctx
        .gate
        .guard_async(|_session| async move {
            match cmd {
                RegistrationsCommand::List { category, search } => {
                    let rows = fetch_filtered(ctx, category, search.as_deref()).await?;
                    Ok(render_registrations(ctx, category, &rows))
                }
                RegistrationsCommand::Delete { category, id, yes } => {
                    delete_registration(ctx, category, &RecordId::new(id), yes).await
                }
                RegistrationsCommand::Export { category, search, output_dir } => {
                    let rows = fetch_filtered(ctx, category, search.as_deref()).await?;
                    let dir = output_dir.unwrap_or_else(|| ctx.export_dir());
                    let path = export::write_export(&dir, category, &rows, &Local::now()).await?;
                    Ok(format!("Data berhasil diexport ke CSV: {} ({} baris)", path.display(), rows.len()))
                }
            }
        })
        .await?;
    into_rendered(outcome)
}

async fn fetch_filtered(ctx: &AppContext, category: EventCategory, search: Option<&str>) -> Result<Vec<Registration>> {
    let rows = ctx.services.registration_service.list(category).await?;
    Ok(match search {
        Some(query) => registrations::search(&rows, query),
        None => rows,
    })
}

async fn delete_registration(ctx: &AppContext, category: EventCategory, id: &RecordId, assume_yes: bool) -> Result<String> {
    let rows = ctx.services.registration_service.list(category).await?;
    let row = rows.iter().find(|r| &r.id == id).ok_or_else(|| {
        CoconutError::InvalidInput(format!("Pendaftar #{} tidak ditemukan di {}", id, category))
    })?;

    let prompt = format!("Hapus pendaftaran {} ({})?", row.name, row.email);
    if !confirm(&prompt, assume_yes)? {
        debug!(category = %category, id = %id, "Delete cancelled");
        return Ok("Dibatalkan.".to_string());
    }

    let message = ctx.services.registration_service.delete(category, id).await?;
    info!(category = %category, id = %id, "Registration deleted");

    let mut out = message.unwrap_or_else(|| "Pendaftaran berhasil dihapus.".to_string());
    out.push_str("\n\n");
    let rows = ctx.services.registration_service.list(category).await?;
    out.push_str(&render_registrations(ctx, category, &rows));
    Ok(out)
}

pub fn render_registrations(ctx: &AppContext, category: EventCategory, rows: &[Registration]) -> String {
    if rows.is_empty() {
        return format!("Belum ada pendaftar {}.", category);
    }
    let api = &ctx.settings.api;
    let mut out = String::new();
    let _ = writeln!(out, "Pendaftar {} ({})", category, rows.len());
    for row in rows {
        let _ = writeln!(
            out,
            "#{} {} | {} | {} | {} | {}",
            row.id,
            row.name,
            row.email,
            row.phone,
            row.university,
            row.registered_at
                .map(|ts| format_datetime_id(&ts.with_timezone(&Local)))
                .unwrap_or_else(|| "-".to_string())
        );
        if let Some(url) = row.proof_image_url(&api.base_url, &api.uploads_path) {
            let _ = writeln!(out, "    Bukti: {}", url);
        }
    }
    out.trim_end().to_string()
}
