//! Helper functions and utilities
//!
//! Date and time normalisation used when talking to the backend, plus the
//! Indonesian display formats the club site uses.

use std::sync::OnceLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use regex::Regex;

/// Literal shown in place of an end time; events only carry a start time.
pub const END_TIME_LABEL: &str = "selesai";

const MONTHS_ID: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

fn iso_date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date pattern"))
}

/// Parse a leading integer: optional whitespace, optional sign, then
/// digits. Anything after the
/// digits is ignored; no digits at all yields `None`.
fn parse_int_prefix(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

/// Reduce a free-text time or time range to a `HH:MM:00` start time.
///
/// `"14:00 - 16:00"` becomes `"14:00:00"` and `"9:5"` becomes `"09:05:00"`.
/// Empty input maps to midnight. Hours outside 0..=23 and minutes outside
/// 0..=59 fall back to `00`. The end of a range is dropped for good.
pub fn normalize_time(input: &str) -> String {
    if input.trim().is_empty() {
        return "00:00:00".to_string();
    }

    let start = input.split(" - ").next().unwrap_or("").trim();
    let parts: Vec<&str> = start.split(':').map(str::trim).collect();

    let hour = parts
        .first()
        .and_then(|p| parse_int_prefix(p))
        .filter(|h| (0..=23).contains(h))
        .unwrap_or(0);
    let minute = parts
        .get(1)
        .and_then(|p| parse_int_prefix(p))
        .filter(|m| (0..=59).contains(m))
        .unwrap_or(0);

    format!("{:02}:{:02}:00", hour, minute)
}

/// Normalise a date to `YYYY-MM-DD`.
///
/// Strings already shaped like `YYYY-MM-DD` are returned untouched.
/// Timestamps are reduced to their UTC calendar date. Anything that cannot
/// be parsed becomes an empty string.
pub fn normalize_date(input: &str) -> String {
    let input = input.trim();
    if input.is_empty() {
        return String::new();
    }
    if iso_date_pattern().is_match(input) {
        return input.to_string();
    }

    parse_timestamp(input)
        .map(|ts| ts.date_naive().format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Parse a backend date field into a calendar date.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&normalize_date(input), "%Y-%m-%d").ok()
}

/// Parse a backend time field (`HH:MM:SS` or `HH:MM`).
pub fn parse_time(input: &str) -> Option<NaiveTime> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M"))
        .ok()
}

/// Parse a backend timestamp. Accepts RFC 3339 as well as MySQL style
/// `YYYY-MM-DD HH:MM:SS`, which is read as UTC.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// `15 Jan 2025`
pub fn format_date_id(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTHS_ID[date.month0() as usize],
        date.year()
    )
}

/// `14:00`
pub fn format_time_hm(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Schedule label shown on cards: `14:00 - selesai`.
pub fn schedule_label(time: Option<NaiveTime>) -> String {
    match time {
        Some(t) => format!("{} - {}", format_time_hm(t), END_TIME_LABEL),
        None => END_TIME_LABEL.to_string(),
    }
}

/// `15/1/2025, 14.30.00`, the `id-ID` locale timestamp rendering.
pub fn format_datetime_id<Tz: TimeZone>(ts: &DateTime<Tz>) -> String {
    format!(
        "{}/{}/{}, {:02}.{:02}.{:02}",
        ts.day(),
        ts.month(),
        ts.year(),
        ts.hour(),
        ts.minute(),
        ts.second()
    )
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}
