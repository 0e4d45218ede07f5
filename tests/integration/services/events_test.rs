//! Event service against the mock backend

use assert_matches::assert_matches;
use serde_json::json;

use coconut_club::models::{EventCategory, EventForm, RecordId};
use coconut_club::CoconutError;

use crate::helpers::{
    open_class_events, seminar_events, webinar_events, MockResponseConfig, TestContext,
};

#[tokio::test]
async fn test_list_all_public_tags_categories() {
    let ctx = TestContext::new().await;
    ctx.api_mock.mock_public_events(EventCategory::OpenClass, open_class_events()).await;
    ctx.api_mock.mock_public_events(EventCategory::Seminar, seminar_events()).await;
    ctx.api_mock.mock_public_events(EventCategory::Webinar, webinar_events()).await;

    let all = ctx.app.services.event_service.list_all_public().await.unwrap();
    assert_eq!(all.len(), 5);
    assert_eq!(all.iter().filter(|t| t.category == EventCategory::OpenClass).count(), 3);
    assert_eq!(all.iter().filter(|t| t.category == EventCategory::Seminar).count(), 1);
    assert_eq!(all.iter().filter(|t| t.category == EventCategory::Webinar).count(), 1);
}

#[tokio::test]
async fn test_one_failing_category_fails_the_whole_list() {
    let ctx = TestContext::new().await;
    ctx.api_mock.mock_public_events(EventCategory::OpenClass, open_class_events()).await;
    ctx.api_mock
        .mock_public_events_with(EventCategory::Seminar, MockResponseConfig::error(500, None), json!([]))
        .await;
    ctx.api_mock.mock_public_events(EventCategory::Webinar, webinar_events()).await;

    let result = ctx.app.services.event_service.list_all_public().await;
    assert_matches!(result, Err(CoconutError::Http { status: 500, .. }));
}

#[tokio::test]
async fn test_find_public_unknown_id() {
    let ctx = TestContext::new().await;
    ctx.api_mock.mock_public_events(EventCategory::Webinar, webinar_events()).await;

    let found = ctx
        .app
        .services
        .event_service
        .find_public(EventCategory::Webinar, &RecordId::new("4"))
        .await
        .unwrap();
    assert_eq!(found.title, "Webinar Cloud");

    let missing = ctx
        .app
        .services
        .event_service
        .find_public(EventCategory::Webinar, &RecordId::new("99"))
        .await;
    assert_matches!(missing, Err(CoconutError::EventNotFound { .. }));
}

#[tokio::test]
async fn test_create_posts_flat_payload() {
    let ctx = TestContext::logged_in().await;
    ctx.api_mock
        .mock_event_mutation("POST", EventCategory::Seminar, MockResponseConfig::default())
        .await;

    let payload = EventForm {
        title: "Seminar Keamanan".into(),
        date: "2025-03-01".into(),
        time: "13:00".into(),
        location: "Aula".into(),
        quota: "100".into(),
        instructor: "Dewi".into(),
        description: "Dasar keamanan siber".into(),
    }
    .into_payload()
    .unwrap();

    let message = ctx.app.services.event_service.create(EventCategory::Seminar, &payload).await.unwrap();
    assert_eq!(message.as_deref(), Some("OK"));

    let requests = ctx.api_mock.requests_to("POST", "/admin/seminars").await;
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["title"], "Seminar Keamanan");
    assert_eq!(body["date"], "2025-03-01");
    assert_eq!(body["quota"], 100);
    assert!(body.get("id").is_none());
}

#[tokio::test]
async fn test_update_wraps_payload_with_id() {
    let ctx = TestContext::logged_in().await;
    ctx.api_mock
        .mock_event_mutation("PUT", EventCategory::OpenClass, MockResponseConfig::default())
        .await;

    let payload = EventForm {
        title: "Git Lanjutan".into(),
        date: "2025-01-20".into(),
        time: "09:00 - 11:00".into(),
        location: "Lab Komputer 2".into(),
        quota: "30".into(),
        ..Default::default()
    }
    .into_payload()
    .unwrap();

    ctx.app
        .services
        .event_service
        .update(EventCategory::OpenClass, &RecordId::new("2"), payload)
        .await
        .unwrap();

    let requests = ctx.api_mock.requests_to("PUT", "/admin/open-classes").await;
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["id"], 2);
    assert_eq!(body["data"]["title"], "Git Lanjutan");
    assert_eq!(body["data"]["quota"], 30);
}

#[tokio::test]
async fn test_delete_sends_id_body() {
    let ctx = TestContext::logged_in().await;
    ctx.api_mock
        .mock_event_mutation("DELETE", EventCategory::Webinar, MockResponseConfig::default())
        .await;

    ctx.app
        .services
        .event_service
        .delete(EventCategory::Webinar, &RecordId::new("4"))
        .await
        .unwrap();

    let requests = ctx.api_mock.requests_to("DELETE", "/admin/webinars").await;
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({ "id": 4 }));
}
