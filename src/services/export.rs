//! CSV export of registrants
//!
//! Only the rows currently shown (after search) are exported.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use tracing::info;

use crate::models::{EventCategory, Registration};
use crate::utils::errors::{CoconutError, Result};
use crate::utils::helpers::format_datetime_id;

pub const CSV_HEADER: [&str; 5] = ["Nama", "Email", "Nomor Telepon", "Universitas", "Tanggal Daftar"];

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

/// Render rows as CSV, timestamps shown in `tz`.
///
/// The header line is unquoted; every data cell is double-quoted with
/// embedded quotes doubled. Lines are joined with `\n`, no trailing newline.
pub fn registrations_to_csv_in<Tz: TimeZone>(rows: &[Registration], tz: &Tz) -> Result<String> {
    if rows.is_empty() {
        return Err(CoconutError::Validation("Tidak ada data untuk diexport".to_string()));
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(CSV_HEADER.join(","));
    for row in rows {
        let registered_at = row
            .registered_at
            .map(|ts| format_datetime_id(&ts.with_timezone(tz)))
            .unwrap_or_default();
        let cells = [
            row.name.as_str(),
            row.email.as_str(),
            row.phone.as_str(),
            row.university.as_str(),
            registered_at.as_str(),
        ];
        lines.push(cells.iter().map(|c| quote(c)).collect::<Vec<_>>().join(","));
    }
    Ok(lines.join("\n"))
}

/// `pendaftaran-seminar-15-1-2025.csv`
pub fn export_file_name(category: EventCategory, date: NaiveDate) -> String {
    format!(
        "pendaftaran-{}-{}-{}-{}.csv",
        category.slug(),
        date.day(),
        date.month(),
        date.year()
    )
}

/// Write the CSV for `category` into `output_dir`, named after `now`
pub async fn write_export<Tz: TimeZone>(
    output_dir: &Path,
    category: EventCategory,
    rows: &[Registration],
    now: &DateTime<Tz>,
) -> Result<PathBuf> {
    let content = registrations_to_csv_in(rows, &now.timezone())?;
    tokio::fs::create_dir_all(output_dir).await?;
    let path = output_dir.join(export_file_name(category, now.date_naive()));
    tokio::fs::write(&path, content).await?;

    info!(category = %category, rows = rows.len(), path = %path.display(), "Registrations exported");
    Ok(path)
}
