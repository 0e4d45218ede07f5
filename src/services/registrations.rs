//! Registration service
//!
//! Public submission of the registration form and the admin review of
//! registrants per category.

use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::models::{
    ApiEnvelope, DeleteRegistrationRequest, EventCategory, RecordId, Registration, RegistrationReceipt,
    RegistrationSubmission,
};
use crate::services::api_client::ApiClient;
use crate::services::events::response_message;
use crate::utils::errors::{CoconutError, Result};
use crate::utils::logging::{log_admin_action, log_api_error, log_registration};

/// Shown when the backend refuses a registration without saying why
pub const REGISTER_FAILED_MESSAGE: &str = "Gagal mendaftar";

pub const REGISTRATIONS_PATH: &str = "/admin/registrations";

#[derive(Debug, Clone)]
pub struct RegistrationService {
    api: ApiClient,
    send_event_id: bool,
}

impl RegistrationService {
    /// `send_event_id` adds the chosen event id to the form as `event_id`
    pub fn new(api: ApiClient, send_event_id: bool) -> Self {
        Self { api, send_event_id }
    }

    /// Build the multipart body. Without `send_event_id` the chosen event is
    /// not transmitted, so the backend only learns the category.
    pub fn build_form(&self, submission: &RegistrationSubmission) -> Result<Form> {
        let info = &submission.info;
        let photo = Part::bytes(submission.photo.bytes.clone())
            .file_name(submission.photo.file_name.clone())
            .mime_str(&submission.photo.mime_type)?;

        let mut form = Form::new()
            .text("nama", info.name.clone())
            .text("email", info.email.clone())
            .text("nomor_hp", info.phone.clone())
            .text("asal_universitas", info.university.clone());
        if self.send_event_id {
            if let Some(id) = &submission.event_id {
                form = form.text("event_id", id.to_string());
            }
        }
        Ok(form.part("bukti_foto", photo))
    }

    /// Post the registration form to the category's register endpoint.
    ///
    /// No duplicate or quota check happens here; the backend decides.
    pub async fn submit(&self, submission: &RegistrationSubmission) -> Result<RegistrationReceipt> {
        let category = submission.category;
        let endpoint = category.config().register_path;
        let form = self.build_form(submission)?;

        let receipt: Option<RegistrationReceipt> = self
            .api
            .post_multipart(endpoint, form)
            .await
            .map_err(|e| {
                log_api_error(endpoint, &e.to_string(), Some("submit registration"));
                with_fallback_message(e)
            })?;

        log_registration(
            category.slug(),
            &submission.info.email,
            submission.event_id.as_ref().map(RecordId::as_str),
        );
        Ok(receipt.unwrap_or_default())
    }

    /// Registrants of one category, oldest first
    pub async fn list(&self, category: EventCategory) -> Result<Vec<Registration>> {
        let response: ApiEnvelope<Vec<Registration>> = self
            .api
            .get(REGISTRATIONS_PATH, &[("jenis", category.jenis())])
            .await
            .map_err(|e| {
                log_api_error(REGISTRATIONS_PATH, &e.to_string(), Some("list registrations"));
                e
            })?;

        let mut registrations = response.into_data_or_default();
        for registration in &mut registrations {
            registration.category = Some(category);
        }
        sort_by_registration_time(&mut registrations);
        debug!(category = %category, count = registrations.len(), "Fetched registrations");
        Ok(registrations)
    }

    pub async fn delete(&self, category: EventCategory, id: &RecordId) -> Result<Option<String>> {
        let body = DeleteRegistrationRequest {
            jenis: category,
            id: id.clone(),
        };
        let response: serde_json::Value = self.api.delete(REGISTRATIONS_PATH, &body).await.map_err(|e| {
            log_api_error(REGISTRATIONS_PATH, &e.to_string(), Some("delete registration"));
            e
        })?;
        log_admin_action("delete_registration", category.slug(), Some(id.as_str()));
        Ok(response_message(&response))
    }
}

fn with_fallback_message(error: CoconutError) -> CoconutError {
    match error {
        CoconutError::Http { status, reason, message: None } => CoconutError::Http {
            status,
            reason,
            message: Some(REGISTER_FAILED_MESSAGE.to_string()),
        },
        other => other,
    }
}

/// Stable ascending sort; rows without a timestamp come first
pub fn sort_by_registration_time(registrations: &mut [Registration]) {
    registrations.sort_by(|a, b| a.registered_at.cmp(&b.registered_at));
}

/// Rows matching the search box, in their current order
pub fn search(registrations: &[Registration], query: &str) -> Vec<Registration> {
    let query = query.trim();
    registrations
        .iter()
        .filter(|r| r.matches(query))
        .cloned()
        .collect()
}
