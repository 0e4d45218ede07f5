//! Derived views over fetched events
//!
//! Pure functions: everything here works on lists the event service already
//! fetched, so the same data can be filtered and re-sorted without another
//! round trip.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::models::{Event, EventCategory, EventStatus, TaggedEvent};

/// Number of entries in the dashboard's "recently added" list
pub const RECENT_EVENTS_LIMIT: usize = 5;

/// Category tab on the public events page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    All,
    Category(EventCategory),
}

impl From<Option<EventCategory>> for Tab {
    fn from(category: Option<EventCategory>) -> Self {
        category.map(Tab::Category).unwrap_or(Tab::All)
    }
}

fn schedule_order(a: &Event, b: &Event) -> Ordering {
    a.starts_at().cmp(&b.starts_at())
}

/// Events happening today or later, soonest first.
///
/// Only the date is compared with `today`, so an event earlier today still
/// counts. Events without a readable date are dropped. Ties keep their
/// input order.
pub fn upcoming(events: &[TaggedEvent], today: NaiveDate) -> Vec<TaggedEvent> {
    let mut upcoming: Vec<TaggedEvent> = events
        .iter()
        .filter(|t| t.event.date.map(|d| d >= today).unwrap_or(false))
        .cloned()
        .collect();
    upcoming.sort_by(|a, b| schedule_order(&a.event, &b.event));
    upcoming
}

/// Events shown under a tab
pub fn filter(events: &[TaggedEvent], tab: Tab) -> Vec<TaggedEvent> {
    match tab {
        Tab::All => events.to_vec(),
        Tab::Category(category) => events.iter().filter(|t| t.category == category).cloned().collect(),
    }
}

/// Admin table search: case-insensitive match on title, instructor and
/// location.
pub fn search_events(events: &[Event], query: &str) -> Vec<Event> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return events.to_vec();
    }
    events
        .iter()
        .filter(|e| {
            e.title.to_lowercase().contains(&needle)
                || e.instructor.to_lowercase().contains(&needle)
                || e.location.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Per-category figures on the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: EventCategory,
    pub total: usize,
    pub active: usize,
}

/// Admin dashboard figures
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_events: usize,
    pub active_events: usize,
    pub per_category: Vec<CategoryCount>,
    /// Newest first by creation time
    pub recent: Vec<TaggedEvent>,
}

impl DashboardSummary {
    pub fn build(events: &[TaggedEvent], today: NaiveDate) -> Self {
        let is_active = |t: &TaggedEvent| t.event.status(today) == EventStatus::Active;

        let per_category = EventCategory::ALL
            .iter()
            .map(|&category| {
                let in_category: Vec<&TaggedEvent> = events.iter().filter(|t| t.category == category).collect();
                CategoryCount {
                    category,
                    total: in_category.len(),
                    active: in_category.iter().filter(|t| is_active(**t)).count(),
                }
            })
            .collect();

        let mut recent: Vec<TaggedEvent> = events.to_vec();
        recent.sort_by(|a, b| b.event.created_at.cmp(&a.event.created_at));
        recent.truncate(RECENT_EVENTS_LIMIT);

        Self {
            total_events: events.len(),
            active_events: events.iter().filter(|t| is_active(*t)).count(),
            per_category,
            recent,
        }
    }
}
