//! Test data helpers
//!
//! JSON shaped the way the backend sends it.

use chrono::NaiveDate;
use serde_json::{json, Value};

/// Fixed "today" so event dates in the fixtures stay upcoming
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 10).expect("valid date")
}

pub fn event_json(id: u32, title: &str, date: &str, time: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "date": date,
        "time": time,
        "location": "Lab Komputer 1",
        "quota": 40,
        "instructor": "Andi",
        "description": format!("Deskripsi {}", title),
        "registered": 10,
        "created_at": format!("{}T01:00:00.000Z", date)
    })
}

/// One past event and two upcoming ones on the same day
pub fn open_class_events() -> Value {
    json!([
        event_json(1, "Kelas Lama", "2025-01-05", "10:00:00"),
        event_json(2, "Git Dasar", "2025-01-10", "09:00:00"),
        event_json(3, "Rust Pemula", "2025-01-10", "08:00:00"),
    ])
}

pub fn seminar_events() -> Value {
    json!([event_json(7, "Seminar AI", "2025-01-09", "23:00:00")])
}

pub fn webinar_events() -> Value {
    json!([event_json(4, "Webinar Cloud", "2025-02-01", "19:30:00")])
}

pub fn registration_json(id: u32, name: &str, email: &str, created_at: &str) -> Value {
    json!({
        "id": id,
        "nama": name,
        "email": email,
        "nomor_hp": "081234567890",
        "asal_universitas": "Universitas Coconut",
        "bukti_foto": format!("{}-bukti.jpg", id),
        "created_at": created_at
    })
}

pub fn registrations() -> Value {
    json!([
        registration_json(2, "Siti \"Ica\" Aminah", "siti@kampus.ac.id", "2025-01-15T09:00:00.000Z"),
        registration_json(1, "Budi Santoso", "budi@kampus.ac.id", "2025-01-14T07:30:00.000Z"),
        registration_json(3, "Rina Wati", "rina@lain.ac.id", "2025-01-16T10:00:00.000Z"),
    ])
}
