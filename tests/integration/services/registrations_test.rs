//! Registration service against the mock backend

use assert_matches::assert_matches;

use coconut_club::models::{EventCategory, PersonalInfo, ProofImage, RecordId, RegistrationSubmission};
use coconut_club::services::registrations::REGISTER_FAILED_MESSAGE;
use coconut_club::CoconutError;
use serde_json::json;

use crate::helpers::{authorization, registrations, MockResponseConfig, TestConfig, TestContext};

fn submission() -> RegistrationSubmission {
    RegistrationSubmission {
        category: EventCategory::Seminar,
        event_id: Some(RecordId::new("7")),
        info: PersonalInfo {
            name: "Budi Santoso".into(),
            email: "budi@kampus.ac.id".into(),
            phone: "081234567890".into(),
            university: "Universitas Coconut".into(),
        },
        photo: ProofImage::new("bukti.png", "image/png", vec![1, 2, 3, 4]),
    }
}

fn body_text(req: &wiremock::Request) -> String {
    String::from_utf8_lossy(&req.body).into_owned()
}

#[tokio::test]
async fn test_submit_posts_multipart_without_event_id() {
    let ctx = TestContext::logged_in().await;
    ctx.api_mock.mock_register(EventCategory::Seminar, MockResponseConfig::default()).await;

    let receipt = ctx.app.services.registration_service.submit(&submission()).await.unwrap();
    assert_eq!(receipt.message.as_deref(), Some("Pendaftaran berhasil"));

    let requests = ctx.api_mock.requests_to("POST", "/seminar/register").await;
    assert_eq!(requests.len(), 1);
    assert_eq!(authorization(&requests[0]), None);

    let content_type = requests[0].headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = body_text(&requests[0]);
    for field in ["nama", "email", "nomor_hp", "asal_universitas"] {
        assert!(body.contains(&format!("name=\"{}\"", field)), "missing {}", field);
    }
    assert!(body.contains("name=\"bukti_foto\"; filename=\"bukti.png\""));
    assert!(body.contains("Budi Santoso"));
    assert!(!body.contains("name=\"event_id\""));
}

#[tokio::test]
async fn test_submit_includes_event_id_when_enabled() {
    let ctx = TestContext::new_with_config(TestConfig {
        send_event_id: true,
        ..Default::default()
    })
    .await;
    ctx.api_mock.mock_register(EventCategory::Seminar, MockResponseConfig::default()).await;

    ctx.app.services.registration_service.submit(&submission()).await.unwrap();

    let requests = ctx.api_mock.requests_to("POST", "/seminar/register").await;
    assert!(body_text(&requests[0]).contains("name=\"event_id\""));
}

#[tokio::test]
async fn test_submit_failure_uses_server_message() {
    let ctx = TestContext::new().await;
    ctx.api_mock
        .mock_register(EventCategory::Seminar, MockResponseConfig::error(409, Some("Email sudah terdaftar")))
        .await;

    let err = ctx.app.services.registration_service.submit(&submission()).await.unwrap_err();
    assert_eq!(err.user_message(), "Email sudah terdaftar");
}

#[tokio::test]
async fn test_submit_failure_without_message_falls_back() {
    let ctx = TestContext::new().await;
    ctx.api_mock
        .mock_register(EventCategory::Seminar, MockResponseConfig::error(500, None))
        .await;

    let err = ctx.app.services.registration_service.submit(&submission()).await.unwrap_err();
    assert_matches!(&err, CoconutError::Http { status: 500, .. });
    assert_eq!(err.user_message(), REGISTER_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_list_sends_jenis_and_sorts_oldest_first() {
    let ctx = TestContext::logged_in().await;
    ctx.api_mock.mock_registrations(EventCategory::OpenClass, registrations()).await;

    let rows = ctx.app.services.registration_service.list(EventCategory::OpenClass).await.unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Budi Santoso", "Siti \"Ica\" Aminah", "Rina Wati"]);
    assert!(rows.iter().all(|r| r.category == Some(EventCategory::OpenClass)));

    let requests = ctx.api_mock.requests_to("GET", "/admin/registrations").await;
    assert_eq!(requests[0].url.query(), Some("jenis=open_class"));
    assert!(authorization(&requests[0]).is_some());
}

#[tokio::test]
async fn test_delete_sends_jenis_and_id() {
    let ctx = TestContext::logged_in().await;
    ctx.api_mock.mock_delete_registration().await;

    let message = ctx
        .app
        .services
        .registration_service
        .delete(EventCategory::Webinar, &RecordId::new("12"))
        .await
        .unwrap();
    assert_eq!(message.as_deref(), Some("Pendaftaran dihapus"));

    let requests = ctx.api_mock.requests_to("DELETE", "/admin/registrations").await;
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({ "jenis": "webinar", "id": 12 }));
}
