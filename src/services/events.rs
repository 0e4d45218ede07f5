//! Event service
//!
//! One implementation serves all three categories; the category's
//! [`CategoryConfig`](crate::models::CategoryConfig) decides the endpoints.

use tracing::{debug, info};

use crate::models::{
    ApiEnvelope, DeleteEventRequest, Event, EventCategory, EventPayload, RecordId, TaggedEvent, UpdateEventRequest,
};
use crate::services::api_client::ApiClient;
use crate::utils::errors::{CoconutError, Result};
use crate::utils::logging::{log_admin_action, log_api_error};

/// Reads and writes events of any category
#[derive(Debug, Clone)]
pub struct EventService {
    api: ApiClient,
}

impl EventService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Public list of one category
    pub async fn list_public(&self, category: EventCategory) -> Result<Vec<Event>> {
        let endpoint = category.config().public_path;
        let response: ApiEnvelope<Vec<Event>> = self.api.get(endpoint, &[]).await.map_err(|e| {
            log_api_error(endpoint, &e.to_string(), Some("list public events"));
            e
        })?;
        let events = response.into_data_or_default();
        debug!(category = %category, count = events.len(), "Fetched public events");
        Ok(events)
    }

    /// All three public collections, fetched concurrently.
    ///
    /// Fails as a whole if any single collection fails.
    pub async fn list_all_public(&self) -> Result<Vec<TaggedEvent>> {
        let (open_classes, seminars, webinars) = futures::try_join!(
            self.list_public(EventCategory::OpenClass),
            self.list_public(EventCategory::Seminar),
            self.list_public(EventCategory::Webinar),
        )?;
        Ok(tag_all(open_classes, seminars, webinars))
    }

    /// Look up one event in the public list
    pub async fn find_public(&self, category: EventCategory, id: &RecordId) -> Result<Event> {
        self.list_public(category)
            .await?
            .into_iter()
            .find(|e| &e.id == id)
            .ok_or_else(|| CoconutError::EventNotFound {
                category: category.label().to_string(),
                id: id.to_string(),
            })
    }

    /// Admin list of one category
    pub async fn list_admin(&self, category: EventCategory) -> Result<Vec<Event>> {
        let endpoint = category.config().admin_path;
        let response: ApiEnvelope<Vec<Event>> = self.api.get(endpoint, &[]).await.map_err(|e| {
            log_api_error(endpoint, &e.to_string(), Some("list admin events"));
            e
        })?;
        Ok(response.into_data_or_default())
    }

    /// All three admin collections, fetched concurrently
    pub async fn list_all_admin(&self) -> Result<Vec<TaggedEvent>> {
        let (open_classes, seminars, webinars) = futures::try_join!(
            self.list_admin(EventCategory::OpenClass),
            self.list_admin(EventCategory::Seminar),
            self.list_admin(EventCategory::Webinar),
        )?;
        Ok(tag_all(open_classes, seminars, webinars))
    }

    pub async fn create(&self, category: EventCategory, payload: &EventPayload) -> Result<Option<String>> {
        let endpoint = category.config().admin_path;
        let response: serde_json::Value = self.api.post(endpoint, payload).await.map_err(|e| {
            log_api_error(endpoint, &e.to_string(), Some("create event"));
            e
        })?;
        log_admin_action("create_event", category.slug(), Some(payload.title.as_str()));
        info!(category = %category, title = %payload.title, "Event created");
        Ok(response_message(&response))
    }

    pub async fn update(&self, category: EventCategory, id: &RecordId, payload: EventPayload) -> Result<Option<String>> {
        let endpoint = category.config().admin_path;
        let body = UpdateEventRequest { id: id.clone(), data: payload };
        let response: serde_json::Value = self.api.put(endpoint, &body).await.map_err(|e| {
            log_api_error(endpoint, &e.to_string(), Some("update event"));
            e
        })?;
        log_admin_action("update_event", category.slug(), Some(id.as_str()));
        Ok(response_message(&response))
    }

    pub async fn delete(&self, category: EventCategory, id: &RecordId) -> Result<Option<String>> {
        let endpoint = category.config().admin_path;
        let body = DeleteEventRequest { id: id.clone() };
        let response: serde_json::Value = self.api.delete(endpoint, &body).await.map_err(|e| {
            log_api_error(endpoint, &e.to_string(), Some("delete event"));
            e
        })?;
        log_admin_action("delete_event", category.slug(), Some(id.as_str()));
        Ok(response_message(&response))
    }
}

fn tag_all(open_classes: Vec<Event>, seminars: Vec<Event>, webinars: Vec<Event>) -> Vec<TaggedEvent> {
    let tag = |category: EventCategory, events: Vec<Event>| {
        events.into_iter().map(move |event| TaggedEvent { category, event })
    };
    tag(EventCategory::OpenClass, open_classes)
        .chain(tag(EventCategory::Seminar, seminars))
        .chain(tag(EventCategory::Webinar, webinars))
        .collect()
}

/// `message` of a mutation response, if the backend sent one
pub(crate) fn response_message(response: &serde_json::Value) -> Option<String> {
    response
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}
