//! Integration tests for the `admin` commands

use assert_matches::assert_matches;
use serde_json::json;

use coconut_club::handlers::commands::admin::{EventFormArgs, EventsCommand};
use coconut_club::handlers::{AdminCommand, Command};
use coconut_club::models::EventCategory;
use coconut_club::CoconutError;

use crate::helpers::{
    event_json, open_class_events, seminar_events, webinar_events, MockResponseConfig, TestContext,
};

fn admin(cmd: AdminCommand) -> Command {
    Command::Admin(cmd)
}

fn events(cmd: EventsCommand) -> Command {
    Command::Admin(AdminCommand::Events(cmd))
}

#[tokio::test]
async fn test_gated_commands_refused_without_session() {
    let ctx = TestContext::new().await;
    ctx.api_mock.mock_admin_events(EventCategory::OpenClass, open_class_events()).await;

    let result = ctx.run(admin(AdminCommand::Dashboard)).await;
    assert_matches!(result, Err(CoconutError::NotAuthenticated));

    let result = ctx
        .run(events(EventsCommand::List {
            category: EventCategory::OpenClass,
            search: None,
        }))
        .await;
    assert_matches!(result, Err(CoconutError::NotAuthenticated));

    assert!(ctx.api_mock.requests().await.is_empty());
}

#[tokio::test]
async fn test_login_then_status() {
    let ctx = TestContext::new().await;
    ctx.api_mock.mock_login(MockResponseConfig::default()).await;

    let output = ctx
        .run(admin(AdminCommand::Login {
            username: "admin".into(),
            password: "rahasia".into(),
        }))
        .await
        .unwrap();
    assert_eq!(output, "Login berhasil. Selamat datang, admin.");

    let status = ctx.run(admin(AdminCommand::Status)).await.unwrap();
    assert!(status.starts_with("Login sebagai admin sejak"));

    let output = ctx.run(admin(AdminCommand::Logout)).await.unwrap();
    assert_eq!(output, "Logout berhasil.");
    assert_eq!(ctx.run(admin(AdminCommand::Status)).await.unwrap(), "Belum login.");
}

#[tokio::test]
async fn test_dashboard_counts() {
    let ctx = TestContext::logged_in().await;
    ctx.api_mock.mock_admin_events(EventCategory::OpenClass, open_class_events()).await;
    ctx.api_mock.mock_admin_events(EventCategory::Seminar, seminar_events()).await;
    ctx.api_mock.mock_admin_events(EventCategory::Webinar, webinar_events()).await;

    let output = ctx.run(admin(AdminCommand::Dashboard)).await.unwrap();
    assert!(output.contains("Total kegiatan : 5"));
    assert!(output.contains("Kegiatan aktif : 3"));
    assert!(output.contains("Open Class: 3 (2 aktif)"));
    assert!(output.contains("Baru ditambahkan:"));
}

#[tokio::test]
async fn test_events_list_with_search() {
    let ctx = TestContext::logged_in().await;
    ctx.api_mock.mock_admin_events(EventCategory::OpenClass, open_class_events()).await;

    let output = ctx
        .run(events(EventsCommand::List {
            category: EventCategory::OpenClass,
            search: Some("git".into()),
        }))
        .await
        .unwrap();
    assert!(output.starts_with("Open Class (1)"));
    assert!(output.contains("#2 Git Dasar"));
}

#[tokio::test]
async fn test_create_event_refreshes_list() {
    let ctx = TestContext::logged_in().await;
    ctx.api_mock.mock_admin_events(EventCategory::Seminar, seminar_events()).await;
    ctx.api_mock
        .mock_event_mutation(
            "POST",
            EventCategory::Seminar,
            MockResponseConfig {
                custom_response: Some(json!({ "message": "Seminar berhasil dibuat" })),
                ..Default::default()
            },
        )
        .await;

    let output = ctx
        .run(events(EventsCommand::Create {
            category: EventCategory::Seminar,
            form: EventFormArgs {
                title: Some("Seminar Baru".into()),
                date: Some("2025-04-01".into()),
                time: Some("10:00 - 12:00".into()),
                location: Some("Aula".into()),
                quota: Some("50".into()),
                ..Default::default()
            },
        }))
        .await
        .unwrap();
    assert!(output.starts_with("Seminar berhasil dibuat"));
    assert!(output.contains("Seminar (1)"));

    ctx.api_mock.verify_endpoint_called("/admin/seminars", 2).await;
    let posted = ctx.api_mock.requests_to("POST", "/admin/seminars").await;
    let body: serde_json::Value = serde_json::from_slice(&posted[0].body).unwrap();
    assert_eq!(body["time"], "10:00:00");
}

#[tokio::test]
async fn test_create_event_missing_fields() {
    let ctx = TestContext::logged_in().await;

    let result = ctx
        .run(events(EventsCommand::Create {
            category: EventCategory::Webinar,
            form: EventFormArgs {
                title: Some("Tanpa tanggal".into()),
                ..Default::default()
            },
        }))
        .await;
    assert_matches!(result, Err(CoconutError::Validation(msg)) if msg.contains("date"));
    assert!(ctx.api_mock.requests().await.is_empty());
}

#[tokio::test]
async fn test_update_keeps_unchanged_fields() {
    let ctx = TestContext::logged_in().await;
    ctx.api_mock
        .mock_admin_events(EventCategory::Webinar, json!([event_json(4, "Webinar Cloud", "2025-02-01", "19:30:00")]))
        .await;
    ctx.api_mock
        .mock_event_mutation("PUT", EventCategory::Webinar, MockResponseConfig::default())
        .await;

    ctx.run(events(EventsCommand::Update {
        category: EventCategory::Webinar,
        id: "4".into(),
        form: EventFormArgs {
            quota: Some("80".into()),
            ..Default::default()
        },
    }))
    .await
    .unwrap();

    let put = ctx.api_mock.requests_to("PUT", "/admin/webinars").await;
    let body: serde_json::Value = serde_json::from_slice(&put[0].body).unwrap();
    assert_eq!(body["id"], 4);
    assert_eq!(body["data"]["title"], "Webinar Cloud");
    assert_eq!(body["data"]["date"], "2025-02-01");
    assert_eq!(body["data"]["time"], "19:30:00");
    assert_eq!(body["data"]["quota"], 80);
}

#[tokio::test]
async fn test_delete_event_with_yes() {
    let ctx = TestContext::logged_in().await;
    ctx.api_mock.mock_admin_events(EventCategory::OpenClass, open_class_events()).await;
    ctx.api_mock
        .mock_event_mutation("DELETE", EventCategory::OpenClass, MockResponseConfig::default())
        .await;

    let output = ctx
        .run(events(EventsCommand::Delete {
            category: EventCategory::OpenClass,
            id: "1".into(),
            yes: true,
        }))
        .await
        .unwrap();
    assert!(output.starts_with("OK"));

    let deleted = ctx.api_mock.requests_to("DELETE", "/admin/open-classes").await;
    assert_eq!(deleted.len(), 1);
}

#[tokio::test]
async fn test_delete_unknown_event() {
    let ctx = TestContext::logged_in().await;
    ctx.api_mock.mock_admin_events(EventCategory::OpenClass, open_class_events()).await;

    let result = ctx
        .run(events(EventsCommand::Delete {
            category: EventCategory::OpenClass,
            id: "77".into(),
            yes: true,
        }))
        .await;
    assert_matches!(result, Err(CoconutError::EventNotFound { .. }));
    assert!(ctx.api_mock.requests_to("DELETE", "/admin/open-classes").await.is_empty());
}
