//! Public event command handlers

use std::fmt::Write as _;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{Event, EventCategory, RecordId, TaggedEvent};
use crate::services::catalog::{self, Tab};
use crate::state::AppContext;
use crate::utils::errors::Result;
use crate::utils::helpers::{format_date_id, schedule_label, truncate_text};

const DESCRIPTION_PREVIEW: usize = 120;

/// Handle `events` - upcoming events of all categories, or of one tab
pub async fn handle_events_list(ctx: &AppContext, category: Option<EventCategory>, today: NaiveDate) -> Result<String> {
    debug!(category = ?category, "Listing upcoming events");

    let all = ctx.services.event_service.list_all_public().await?;
    let shown = catalog::filter(&catalog::upcoming(&all, today), Tab::from(category));

    if shown.is_empty() {
        return Ok(match category {
            Some(category) => format!("Belum ada {} yang akan datang.", category),
            None => "Belum ada kegiatan yang akan datang.".to_string(),
        });
    }

    let mut out = String::new();
    let _ = writeln!(out, "Kegiatan mendatang ({})", shown.len());
    for tagged in &shown {
        out.push('\n');
        out.push_str(&render_event_card(tagged));
    }
    Ok(out.trim_end().to_string())
}

/// Handle `event <category> <id>` - one event with its quota figures
pub async fn handle_event_detail(ctx: &AppContext, category: EventCategory, id: &RecordId) -> Result<String> {
    let event = ctx.services.event_service.find_public(category, id).await?;
    Ok(render_event_detail(category, &event))
}

fn date_label(event: &Event) -> String {
    event.date.map(format_date_id).unwrap_or_else(|| "-".to_string())
}

fn quota_line(event: &Event) -> String {
    format!(
        "Kuota: {}/{} ({:.0}%)",
        event.registered_or_zero(),
        event.quota,
        event.progress_percent()
    )
}

/// Card as shown on the events page
pub fn render_event_card(tagged: &TaggedEvent) -> String {
    let event = &tagged.event;
    let mut out = String::new();
    let _ = writeln!(out, "[{}] #{} {}", tagged.category, event.id, event.title);
    let _ = writeln!(
        out,
        "  {} | {} | {}",
        date_label(event),
        schedule_label(event.time),
        event.location
    );
    if !event.instructor.is_empty() {
        let _ = writeln!(out, "  Pemateri: {}", event.instructor);
    }
    let _ = writeln!(out, "  {}", quota_line(event));
    out
}

pub fn render_event_detail(category: EventCategory, event: &Event) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} - {}", category, event.title);
    let _ = writeln!(out, "Tanggal : {}", date_label(event));
    let _ = writeln!(out, "Waktu   : {}", schedule_label(event.time));
    let _ = writeln!(out, "Lokasi  : {}", event.location);
    if !event.instructor.is_empty() {
        let _ = writeln!(out, "Pemateri: {}", event.instructor);
    }
    let _ = writeln!(out, "{}", quota_line(event));
    if event.is_open() {
        let _ = writeln!(out, "Sisa {} kursi, pendaftaran dibuka", event.available_spots());
    } else {
        let _ = writeln!(out, "Kuota penuh");
    }
    if !event.description.is_empty() {
        let _ = writeln!(out, "\n{}", truncate_text(&event.description, DESCRIPTION_PREVIEW));
    }
    out.trim_end().to_string()
}
