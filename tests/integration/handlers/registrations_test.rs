//! Integration tests for `admin registrations ...`

use assert_matches::assert_matches;
use serde_json::json;

use coconut_club::handlers::commands::registrations::RegistrationsCommand;
use coconut_club::handlers::{AdminCommand, Command};
use coconut_club::models::EventCategory;
use coconut_club::CoconutError;

use crate::helpers::{registrations, TestContext};

fn registrations_cmd(cmd: RegistrationsCommand) -> Command {
    Command::Admin(AdminCommand::Registrations(cmd))
}

#[tokio::test]
async fn test_list_shows_proof_url() {
    let ctx = TestContext::logged_in().await;
    ctx.api_mock.mock_registrations(EventCategory::Seminar, registrations()).await;

    let output = ctx
        .run(registrations_cmd(RegistrationsCommand::List {
            category: EventCategory::Seminar,
            search: None,
        }))
        .await
        .unwrap();
    assert!(output.starts_with("Pendaftar Seminar (3)"));
    assert!(output.contains(&format!("Bukti: {}/uploads/1-bukti.jpg", ctx.api_mock.base_url())));
}

#[tokio::test]
async fn test_list_search_and_empty() {
    let ctx = TestContext::logged_in().await;
    ctx.api_mock.mock_registrations(EventCategory::Seminar, registrations()).await;
    ctx.api_mock.mock_registrations(EventCategory::Webinar, json!([])).await;

    let output = ctx
        .run(registrations_cmd(RegistrationsCommand::List {
            category: EventCategory::Seminar,
            search: Some("  RINA ".into()),
        }))
        .await
        .unwrap();
    assert!(output.starts_with("Pendaftar Seminar (1)"));
    assert!(output.contains("Rina Wati"));

    let empty = ctx
        .run(registrations_cmd(RegistrationsCommand::List {
            category: EventCategory::Webinar,
            search: None,
        }))
        .await
        .unwrap();
    assert_eq!(empty, "Belum ada pendaftar Webinar.");
}

#[tokio::test]
async fn test_export_writes_filtered_rows() {
    let ctx = TestContext::logged_in().await;
    ctx.api_mock.mock_registrations(EventCategory::Seminar, registrations()).await;
    let out_dir = ctx.temp_dir.path().join("export");

    let output = ctx
        .run(registrations_cmd(RegistrationsCommand::Export {
            category: EventCategory::Seminar,
            search: Some("kampus".into()),
            output_dir: Some(out_dir.clone()),
        }))
        .await
        .unwrap();
    assert!(output.ends_with("(2 baris)"));

    let files: Vec<_> = std::fs::read_dir(&out_dir).unwrap().map(|e| e.unwrap().path()).collect();
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("pendaftaran-seminar-") && name.ends_with(".csv"));

    let content = std::fs::read_to_string(&files[0]).unwrap();
    let lines: Vec<&str> = content.split('\n').collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Nama,Email,Nomor Telepon,Universitas,Tanggal Daftar");
    assert!(lines[1].starts_with("\"Budi Santoso\",\"budi@kampus.ac.id\",\"081234567890\""));
    assert!(lines[2].starts_with("\"Siti \"\"Ica\"\" Aminah\","));
}

#[tokio::test]
async fn test_export_nothing_to_write() {
    let ctx = TestContext::logged_in().await;
    ctx.api_mock.mock_registrations(EventCategory::Seminar, registrations()).await;

    let result = ctx
        .run(registrations_cmd(RegistrationsCommand::Export {
            category: EventCategory::Seminar,
            search: Some("tidak ada".into()),
            output_dir: None,
        }))
        .await;
    assert_matches!(result, Err(CoconutError::Validation(_)));
}

#[tokio::test]
async fn test_delete_registration() {
    let ctx = TestContext::logged_in().await;
    ctx.api_mock.mock_registrations(EventCategory::OpenClass, registrations()).await;
    ctx.api_mock.mock_delete_registration().await;

    let output = ctx
        .run(registrations_cmd(RegistrationsCommand::Delete {
            category: EventCategory::OpenClass,
            id: "2".into(),
            yes: true,
        }))
        .await
        .unwrap();
    assert!(output.starts_with("Pendaftaran dihapus\n\n"));
    assert!(output.contains("Pendaftar Open Class (3)"));
    ctx.api_mock.verify_endpoint_called("/admin/registrations", 3).await;

    let deleted = ctx.api_mock.requests_to("DELETE", "/admin/registrations").await;
    let body: serde_json::Value = serde_json::from_slice(&deleted[0].body).unwrap();
    assert_eq!(body, json!({ "jenis": "open_class", "id": 2 }));
}

#[tokio::test]
async fn test_delete_unknown_registration() {
    let ctx = TestContext::logged_in().await;
    ctx.api_mock.mock_registrations(EventCategory::OpenClass, registrations()).await;

    let result = ctx
        .run(registrations_cmd(RegistrationsCommand::Delete {
            category: EventCategory::OpenClass,
            id: "42".into(),
            yes: true,
        }))
        .await;
    assert_matches!(result, Err(CoconutError::InvalidInput(_)));
    assert!(ctx.api_mock.requests_to("DELETE", "/admin/registrations").await.is_empty());
}

#[tokio::test]
async fn test_requires_session() {
    let ctx = TestContext::new().await;

    let result = ctx
        .run(registrations_cmd(RegistrationsCommand::List {
            category: EventCategory::Seminar,
            search: None,
        }))
        .await;
    assert_matches!(result, Err(CoconutError::NotAuthenticated));
}
