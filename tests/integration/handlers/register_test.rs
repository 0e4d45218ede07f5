//! Integration tests for the `register` command

use std::path::PathBuf;

use assert_matches::assert_matches;

use coconut_club::handlers::commands::RegisterArgs;
use coconut_club::handlers::Command;
use coconut_club::models::EventCategory;
use coconut_club::CoconutError;

use crate::helpers::{open_class_events, MockResponseConfig, TestContext};

fn args(event_id: &str, photo: PathBuf) -> RegisterArgs {
    RegisterArgs {
        category: EventCategory::OpenClass,
        event_id: event_id.to_string(),
        name: "  Siti Aminah ".to_string(),
        email: "siti@kampus.ac.id".to_string(),
        phone: "0812000111".to_string(),
        university: "Universitas Coconut".to_string(),
        photo,
    }
}

#[tokio::test]
async fn test_register_success() {
    let ctx = TestContext::new().await;
    ctx.api_mock.mock_public_events(EventCategory::OpenClass, open_class_events()).await;
    ctx.api_mock.mock_register(EventCategory::OpenClass, MockResponseConfig::default()).await;
    let photo = ctx.write_photo("bukti.png", 64);

    let output = ctx.run(Command::Register(args("2", photo))).await.unwrap();
    assert!(output.starts_with("Pendaftaran Berhasil!"));
    assert!(output.contains("Server: Pendaftaran berhasil"));

    let requests = ctx.api_mock.requests_to("POST", "/open-class/register").await;
    assert_eq!(requests.len(), 1);
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("\r\n\r\nSiti Aminah\r\n"));
}

#[tokio::test]
async fn test_register_unknown_event_does_not_submit() {
    let ctx = TestContext::new().await;
    ctx.api_mock.mock_public_events(EventCategory::OpenClass, open_class_events()).await;
    ctx.api_mock.mock_register(EventCategory::OpenClass, MockResponseConfig::default()).await;
    let photo = ctx.write_photo("bukti.png", 64);

    let result = ctx.run(Command::Register(args("99", photo))).await;
    assert_matches!(result, Err(CoconutError::EventNotFound { .. }));
    ctx.api_mock.verify_endpoint_called("/open-class/register", 0).await;
}

#[tokio::test]
async fn test_register_rejects_non_image() {
    let ctx = TestContext::new().await;
    ctx.api_mock.mock_public_events(EventCategory::OpenClass, open_class_events()).await;
    let photo = ctx.write_photo("ktm.pdf", 64);

    let result = ctx.run(Command::Register(args("2", photo))).await;
    assert_matches!(result, Err(CoconutError::Validation(_)));
    ctx.api_mock.verify_endpoint_called("/open-class/register", 0).await;
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let ctx = TestContext::new().await;
    ctx.api_mock.mock_public_events(EventCategory::OpenClass, open_class_events()).await;
    let photo = ctx.write_photo("bukti.png", 64);

    let mut bad = args("2", photo);
    bad.email = "bukan-email".to_string();
    let result = ctx.run(Command::Register(bad)).await;
    assert_matches!(result, Err(CoconutError::Validation(_)));
}

#[tokio::test]
async fn test_register_server_refusal() {
    let ctx = TestContext::new().await;
    ctx.api_mock.mock_public_events(EventCategory::OpenClass, open_class_events()).await;
    ctx.api_mock
        .mock_register(EventCategory::OpenClass, MockResponseConfig::error(400, Some("Kuota sudah penuh")))
        .await;
    let photo = ctx.write_photo("bukti.jpg", 64);

    let err = ctx.run(Command::Register(args("2", photo))).await.unwrap_err();
    assert_eq!(err.user_message(), "Kuota sudah penuh");
}
