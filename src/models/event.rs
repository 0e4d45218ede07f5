//! Event model
//!
//! Open Class, Seminar and Webinar events share one shape; the category
//! only decides which endpoints an event lives behind.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::utils::errors::{CoconutError, Result};
use crate::utils::helpers::{normalize_date, normalize_time, parse_date, parse_time, parse_timestamp};

/// Routing and labelling for one event category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryConfig {
    pub label: &'static str,
    pub slug: &'static str,
    pub jenis: &'static str,
    pub public_path: &'static str,
    pub admin_path: &'static str,
    pub register_path: &'static str,
}

const OPEN_CLASS: CategoryConfig = CategoryConfig {
    label: "Open Class",
    slug: "open-class",
    jenis: "open_class",
    public_path: "/open-classes",
    admin_path: "/admin/open-classes",
    register_path: "/open-class/register",
};

const SEMINAR: CategoryConfig = CategoryConfig {
    label: "Seminar",
    slug: "seminar",
    jenis: "seminar",
    public_path: "/seminars",
    admin_path: "/admin/seminars",
    register_path: "/seminar/register",
};

const WEBINAR: CategoryConfig = CategoryConfig {
    label: "Webinar",
    slug: "webinar",
    jenis: "webinar",
    public_path: "/webinars",
    admin_path: "/admin/webinars",
    register_path: "/webinar/register",
};

/// The three mutually exclusive activity categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventCategory {
    OpenClass,
    Seminar,
    Webinar,
}

impl EventCategory {
    pub const ALL: [EventCategory; 3] = [
        EventCategory::OpenClass,
        EventCategory::Seminar,
        EventCategory::Webinar,
    ];

    pub fn config(&self) -> &'static CategoryConfig {
        match self {
            EventCategory::OpenClass => &OPEN_CLASS,
            EventCategory::Seminar => &SEMINAR,
            EventCategory::Webinar => &WEBINAR,
        }
    }

    pub fn label(&self) -> &'static str {
        self.config().label
    }

    pub fn slug(&self) -> &'static str {
        self.config().slug
    }

    pub fn jenis(&self) -> &'static str {
        self.config().jenis
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EventCategory {
    type Err = CoconutError;

    /// Accepts the slug, the registration `jenis` or the display label.
    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_lowercase();
        EventCategory::ALL
            .into_iter()
            .find(|c| {
                let cfg = c.config();
                needle == cfg.slug || needle == cfg.jenis || needle == cfg.label.to_lowercase()
            })
            .ok_or_else(|| {
                CoconutError::InvalidInput(format!(
                    "Unknown category '{}', expected one of open-class, seminar, webinar",
                    s
                ))
            })
    }
}

impl Serialize for EventCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.jenis())
    }
}

impl<'de> Deserialize<'de> for EventCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Opaque identifier, unique within one category.
///
/// The backend hands out numbers, but nothing guarantees it, so both JSON
/// numbers and strings are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.0.parse::<i64>() {
            Ok(n) => serializer.serialize_i64(n),
            Err(_) => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => Ok(RecordId(s)),
            serde_json::Value::Number(n) => Ok(RecordId(n.to_string())),
            other => Err(serde::de::Error::custom(format!("invalid id: {}", other))),
        }
    }
}

fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

fn lenient_time<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<NaiveTime>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_time))
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

fn lenient_count(value: &serde_json::Value) -> Option<u32> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_quota<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u32, D::Error> {
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(lenient_count(&raw).unwrap_or(0))
}

fn lenient_registered<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<u32>, D::Error> {
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(lenient_count(&raw))
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// An event as returned by the list endpoints
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Event {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_time")]
    pub time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_quota")]
    pub quota: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub instructor: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Not every endpoint reports this; views fall back to 0.
    #[serde(default, deserialize_with = "lenient_registered")]
    pub registered: Option<u32>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Event {
    /// Start of the event; a missing time counts as midnight.
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        self.date
            .map(|d| d.and_time(self.time.unwrap_or(NaiveTime::MIN)))
    }

    pub fn registered_or_zero(&self) -> u32 {
        self.registered.unwrap_or(0)
    }

    /// `quota - registered`; negative when overbooked.
    pub fn available_spots(&self) -> i64 {
        i64::from(self.quota) - i64::from(self.registered_or_zero())
    }

    pub fn is_open(&self) -> bool {
        self.available_spots() > 0
    }

    /// Registered share of the quota in percent, unclamped.
    pub fn progress_percent(&self) -> f64 {
        progress_percent(self.registered_or_zero(), self.quota)
    }

    /// Status shown on the admin tables
    pub fn status(&self, today: NaiveDate) -> EventStatus {
        match self.date {
            Some(date) if date < today => EventStatus::Completed,
            _ => EventStatus::Active,
        }
    }
}

/// `registered / quota * 100`. Not clamped; a zero quota yields 0.
pub fn progress_percent(registered: u32, quota: u32) -> f64 {
    if quota == 0 {
        return 0.0;
    }
    f64::from(registered) / f64::from(quota) * 100.0
}

/// Admin table status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Active,
    Completed,
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventStatus::Active => write!(f, "Aktif"),
            EventStatus::Completed => write!(f, "Selesai"),
        }
    }
}

/// An event tagged with the collection it came from
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedEvent {
    pub category: EventCategory,
    pub event: Event,
}

/// Body for create and the `data` part of update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub quota: u32,
    pub instructor: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateEventRequest {
    pub id: RecordId,
    pub data: EventPayload,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteEventRequest {
    pub id: RecordId,
}

/// Free-text admin form input, as typed
#[derive(Debug, Clone, Default)]
pub struct EventForm {
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub quota: String,
    pub instructor: String,
    pub description: String,
}

impl EventForm {
    /// Prefill the edit form from an existing event
    pub fn from_event(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            date: event.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            time: event.time.map(|t| t.format("%H:%M:%S").to_string()).unwrap_or_default(),
            location: event.location.clone(),
            quota: event.quota.to_string(),
            instructor: event.instructor.clone(),
            description: event.description.clone(),
        }
    }

    /// Check required fields and normalise date and time for the backend.
    ///
    /// Title, date, time, location and quota are required. The time range is
    /// cut to its start; an unparsable date is sent as an empty string.
    pub fn into_payload(self) -> Result<EventPayload> {
        let required = [
            ("title", &self.title),
            ("date", &self.date),
            ("time", &self.time),
            ("location", &self.location),
            ("quota", &self.quota),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(CoconutError::Validation(format!(
                "Data tidak lengkap: {}",
                missing.join(", ")
            )));
        }

        let quota = self
            .quota
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| CoconutError::Validation(format!("Quota must be a positive number, got '{}'", self.quota)))?;

        let date = normalize_date(&self.date);
        if date.is_empty() {
            tracing::warn!(input = %self.date, "Event date could not be parsed, sending it empty");
        }

        Ok(EventPayload {
            title: self.title.trim().to_string(),
            date,
            time: normalize_time(&self.time),
            location: self.location.trim().to_string(),
            quota,
            instructor: self.instructor.trim().to_string(),
            description: self.description.trim().to_string(),
        })
    }
}
