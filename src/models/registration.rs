//! Registration model

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::models::event::{EventCategory, RecordId};
use crate::utils::errors::{CoconutError, Result};
use crate::utils::helpers::{is_valid_email, parse_timestamp};

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

/// A registrant as listed by `GET /admin/registrations`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Registration {
    pub id: RecordId,
    #[serde(rename = "nama", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(rename = "nomor_hp", default, deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(rename = "asal_universitas", default, deserialize_with = "null_as_empty")]
    pub university: String,
    /// Stored file name of the uploaded proof photo
    #[serde(rename = "bukti_foto", default)]
    pub proof_image: Option<String>,
    #[serde(rename = "created_at", default, deserialize_with = "lenient_timestamp")]
    pub registered_at: Option<DateTime<Utc>>,
    /// Category the registrant signed up under. The backend leaves it out;
    /// `RegistrationService::list` fills it from the `jenis` it queried.
    #[serde(skip)]
    pub category: Option<EventCategory>,
}

impl Registration {
    /// Public URL of the proof photo: `{base}/{uploads_path}/{file}`.
    ///
    /// Mirrors the backend's current storage layout; there is no fallback
    /// if that layout changes.
    pub fn proof_image_url(&self, base_url: &str, uploads_path: &str) -> Option<String> {
        let file = self.proof_image.as_deref().filter(|f| !f.is_empty())?;
        Some(format!(
            "{}/{}/{}",
            base_url.trim_end_matches('/'),
            uploads_path.trim_matches('/'),
            file
        ))
    }

    /// Case-insensitive match on name, email and university; plain
    /// substring match on the phone number.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.email.to_lowercase().contains(&needle)
            || self.phone.contains(query)
            || self.university.to_lowercase().contains(&needle)
    }
}

/// Body for `DELETE /admin/registrations`
#[derive(Debug, Clone, serde::Serialize)]
pub struct DeleteRegistrationRequest {
    pub jenis: EventCategory,
    pub id: RecordId,
}

/// The uploaded proof photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofImage {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ProofImage {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a photo from disk, guessing the MIME type from the extension
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "bukti_foto".to_string());
        let mime_type = mime_from_extension(path).to_string();
        Ok(Self::new(file_name, mime_type, bytes))
    }

    /// Only images up to `max_bytes` are accepted.
    pub fn validate(&self, max_bytes: u64) -> Result<()> {
        if self.bytes.len() as u64 > max_bytes {
            return Err(CoconutError::Validation(format!(
                "File terlalu besar: maksimal {} MB",
                max_bytes / (1024 * 1024)
            )));
        }
        if !self.mime_type.starts_with("image/") {
            return Err(CoconutError::Validation(
                "Format file tidak valid: hanya file gambar yang diperbolehkan".to_string(),
            ));
        }
        Ok(())
    }
}

fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Personal data typed into the registration form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub university: String,
}

impl PersonalInfo {
    /// All four fields are required; the email must look like one.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("nama", &self.name),
            ("email", &self.email),
            ("nomor_hp", &self.phone),
            ("asal_universitas", &self.university),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(CoconutError::Validation(format!("Field '{}' wajib diisi", name)));
        }
        if !is_valid_email(&self.email) {
            return Err(CoconutError::Validation(format!("Email tidak valid: {}", self.email)));
        }
        Ok(())
    }

    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            university: self.university.trim().to_string(),
        }
    }
}

/// A validated form, ready to post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationSubmission {
    pub category: EventCategory,
    pub event_id: Option<RecordId>,
    pub info: PersonalInfo,
    pub photo: ProofImage,
}

/// What the backend answered to a registration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RegistrationReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}
