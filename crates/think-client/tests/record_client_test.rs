//! Integration tests for the records client against a mock server.

use serde_json::json;
use think_client::{ClientConfig, RecordClient};
use think_core::{Error, RecordStore, RecordToBeSaved};
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ID: &str = "686d15bd-9f78-4e9a-ad3e-a517384302e9";

fn client(server: &MockServer) -> RecordClient {
    RecordClient::new(ClientConfig::with_base_url(server.uri())).expect("Failed to create client")
}

fn record_json(id: &str, mime_type: &str) -> serde_json::Value {
    json!({
        "id": id,
        "mime_type": mime_type,
        "body": {"root": {"type": "root", "children": []}},
        "updated_at": "2024-03-01T10:00:00Z"
    })
}

#[tokio::test]
async fn test_get_record_parses_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/records/{}", ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(record_json(ID, "note")))
        .expect(1)
        .mount(&server)
        .await;

    let record = client(&server).get_record(ID).await.unwrap();
    assert_eq!(record.id.to_string(), ID);
    assert!(record.is_note());
    assert_eq!(record.updated_at.to_rfc3339(), "2024-03-01T10:00:00+00:00");
}

#[tokio::test]
async fn test_invalid_ids_make_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    for id in [
        "",
        "not-a-uuid",
        "686d15bd-9f78-1e9a-ad3e-a517384302e9",
        "686d15bd9f784e9aad3ea517384302e9",
    ] {
        assert!(matches!(client.get_record(id).await, Err(Error::RecordNotFound(got)) if got == id));
        assert!(matches!(client.delete_record(id).await, Err(Error::RecordNotFound(_))));
        assert!(!client.is_exist_record(id).await.unwrap());
    }
}

#[tokio::test]
async fn test_get_record_404_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/records/{}", ID)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "id": ID,
            "err": format!("Not Found Record by id:{}", ID)
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client.get_record(ID).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(!client.is_exist_record(ID).await.unwrap());
}

#[tokio::test]
async fn test_get_record_server_error_is_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/records/{}", ID)))
        .respond_with(ResponseTemplate::new(500).set_body_string("database locked"))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server);
    match client.get_record(ID).await {
        Err(Error::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "database locked");
        }
        other => panic!("Expected status error, got {:?}", other),
    }
    assert!(client.is_exist_record(ID).await.is_err());
}

#[tokio::test]
async fn test_get_record_bad_json_is_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/records/{}", ID)))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"id\": 1"))
        .mount(&server)
        .await;

    let err = client(&server).get_record(ID).await.unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
}

#[tokio::test]
async fn test_list_records() {
    let server = MockServer::start().await;
    let other = Uuid::new_v4().to_string();
    Mock::given(method("GET"))
        .and(path("/api/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            record_json(ID, "note"),
            record_json(&other, "text/plain")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let records = client(&server).list_records().await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].is_note());
    assert!(!records[1].is_note());
}

#[tokio::test]
async fn test_list_records_non_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/records"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server).list_records().await.unwrap_err();
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_save_record_posts_json() {
    let server = MockServer::start().await;
    let id = Uuid::parse_str(ID).unwrap();
    let payload = RecordToBeSaved::note(id, json!({"root": {"type": "root", "children": []}}));

    Mock::given(method("POST"))
        .and(path(format!("/api/records/{}", ID)))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "id": ID,
            "mime_type": "note",
            "body": {"root": {"type": "root", "children": []}}
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client(&server).save_record(&payload).await.unwrap());
}

#[tokio::test]
async fn test_save_record_status_table() {
    for (status, expected) in [(201, true), (200, false), (400, false), (500, false)] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&server)
            .await;

        let payload = RecordToBeSaved::note(Uuid::new_v4(), json!({}));
        let saved = client(&server).save_record(&payload).await.unwrap();
        assert_eq!(saved, expected, "status {}", status);
    }
}

#[tokio::test]
async fn test_save_record_with_configured_statuses() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = ClientConfig {
        save_success_statuses: vec![200, 201],
        ..ClientConfig::with_base_url(server.uri())
    };
    let client = RecordClient::new(config).unwrap();
    let payload = RecordToBeSaved::note(Uuid::new_v4(), json!({}));
    assert!(client.save_record(&payload).await.unwrap());
}

#[tokio::test]
async fn test_delete_record_status_table() {
    for (status, expected) in [(200, true), (204, false), (404, false), (500, false)] {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(format!("/api/records/{}", ID)))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&server)
            .await;

        let deleted = client(&server).delete_record(ID).await.unwrap();
        assert_eq!(deleted, expected, "status {}", status);
    }
}

#[tokio::test]
async fn test_create_then_fetch_flow() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    let body = json!({"root": {"type": "root", "children": [
        {"type": "paragraph", "children": [{"type": "text", "text": "hello", "format": 0}]}
    ]}});

    Mock::given(method("POST"))
        .and(path(format!("/api/records/{}", id)))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/records/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": id,
            "mime_type": "note",
            "body": body,
            "updated_at": "2024-03-01T10:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(client
        .save_record(&RecordToBeSaved::note(id, body.clone()))
        .await
        .unwrap());
    assert!(client.is_exist_record(&id.to_string()).await.unwrap());
}

#[tokio::test]
async fn test_transport_failure_is_request_error() {
    // Nothing listens on this port.
    let client = RecordClient::new(ClientConfig::with_base_url("http://127.0.0.1:1")).unwrap();
    let err = client.list_records().await.unwrap_err();
    assert!(matches!(err, Error::Request(_)));
}
