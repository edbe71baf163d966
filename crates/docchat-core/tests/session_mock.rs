use std::time::Duration;

use docchat_core::backend::BackendClient;
use docchat_core::documents::OutgoingDocument;
use docchat_core::session::state::{FALLBACK_REPLY, Pending, Role};
use docchat_core::session::{SendStatus, Session, UploadStatus};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_for(server: &MockServer) -> Session {
    let client = BackendClient::new(server.uri(), Some(Duration::from_secs(2))).unwrap();
    Session::new(client)
}

fn pdf_document() -> OutgoingDocument {
    OutgoingDocument {
        file_name: "notes.pdf".to_string(),
        mime_type: Some("application/pdf"),
        bytes: b"%PDF-1.4".to_vec(),
    }
}

#[tokio::test]
async fn send_message_appends_user_and_bot_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_partial_json(serde_json::json!({"message": "hello"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"response": "hi there"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let status = session.send_message("hello").await;

    assert_eq!(status, SendStatus::Replied);
    let transcript = &session.state().transcript;
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].role, Role::User);
    assert_eq!(transcript[0].text, "hello");
    assert_eq!(transcript[1].role, Role::Bot);
    assert_eq!(transcript[1].text, "hi there");
    assert_eq!(session.state().pending, Pending::Idle);
}

#[tokio::test]
async fn whitespace_input_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let status = session.send_message("   \t ").await;

    assert_eq!(status, SendStatus::Ignored);
    assert!(session.state().transcript.is_empty());
    assert_eq!(session.state().pending, Pending::Idle);
}

#[tokio::test]
async fn server_error_appends_fallback_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({"detail": "Chat failed: boom"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let status = session.send_message("hello").await;

    assert_eq!(status, SendStatus::Failed);
    let transcript = &session.state().transcript;
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[1].text, FALLBACK_REPLY);
    assert_eq!(session.state().pending, Pending::Idle);
}

#[tokio::test]
async fn unreachable_backend_appends_fallback_reply() {
    // Nothing listens on port 1; the connection is refused outright.
    let client =
        BackendClient::new("http://127.0.0.1:1", Some(Duration::from_secs(2))).unwrap();
    let mut session = Session::new(client);

    let status = session.send_message("hello").await;

    assert_eq!(status, SendStatus::Failed);
    assert_eq!(session.state().transcript[1].text, FALLBACK_REPLY);
    assert_eq!(session.state().pending, Pending::Idle);
}

#[tokio::test]
async fn slow_backend_times_out_and_settles() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"response": "too late"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client =
        BackendClient::new(server.uri(), Some(Duration::from_millis(200))).unwrap();
    let mut session = Session::new(client);

    let status = session.send_message("hello").await;

    assert_eq!(status, SendStatus::Failed);
    assert_eq!(session.state().transcript[1].text, FALLBACK_REPLY);
    assert_eq!(session.state().pending, Pending::Idle);
}

#[tokio::test]
async fn malformed_reply_body_appends_fallback_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let status = session.send_message("hello").await;

    assert_eq!(status, SendStatus::Failed);
    assert_eq!(session.state().transcript[1].text, FALLBACK_REPLY);
}

#[tokio::test]
async fn upload_rejects_disallowed_type_without_a_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let status = session
        .upload_document(OutgoingDocument {
            file_name: "tool.exe".to_string(),
            mime_type: None,
            bytes: vec![0x4d, 0x5a],
        })
        .await;

    assert_eq!(status, UploadStatus::Rejected);
    assert!(session.state().uploads.is_empty());
    assert_eq!(session.state().selected_file, None);
}

#[tokio::test]
async fn upload_refreshes_listing_with_display_names() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Successfully uploaded 1 files. Processing in background...",
            "files_processed": 1,
            "files": ["7_notes.pdf"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/documents/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"files": ["7_notes.pdf"]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let status = session.upload_document(pdf_document()).await;

    assert_eq!(status, UploadStatus::Uploaded);
    assert_eq!(session.state().selected_file.as_deref(), Some("notes.pdf"));
    let names: Vec<&str> = session
        .state()
        .uploads
        .iter()
        .map(|record| record.display_name())
        .collect();
    assert_eq!(names, vec!["notes.pdf"]);
}

#[tokio::test]
async fn upload_failure_skips_the_listing_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/documents/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let status = session.upload_document(pdf_document()).await;

    assert_eq!(status, UploadStatus::Failed);
    assert!(session.state().uploads.is_empty());
}

#[tokio::test]
async fn upload_survives_a_failed_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/documents/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let status = session.upload_document(pdf_document()).await;

    // The upload itself succeeded; the stale (empty) set is kept.
    assert_eq!(status, UploadStatus::Uploaded);
    assert!(session.state().uploads.is_empty());
}

#[tokio::test]
async fn listing_replaces_and_keeps_stale_on_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/documents/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"files": ["1_a.pdf", "2_b.csv"]})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/documents/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut session = session_for(&server);

    assert!(session.list_documents().await);
    assert_eq!(session.state().uploads.len(), 2);

    // Second fetch fails; the previous set stays.
    assert!(!session.list_documents().await);
    assert_eq!(session.state().uploads.len(), 2);
}

#[tokio::test]
async fn delete_refreshes_the_listing() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/documents/7_notes.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"message": "deleted"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/documents/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"files": []})))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    assert!(session.delete_document("7_notes.pdf").await);
    assert!(session.state().uploads.is_empty());
}

#[tokio::test]
async fn chat_requests_carry_the_session_id() {
    let server = MockServer::start().await;

    let mut session = {
        let client = BackendClient::new(server.uri(), Some(Duration::from_secs(2))).unwrap();
        Session::new(client)
    };

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_partial_json(
            serde_json::json!({"session_id": session.session_id()}),
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"response": "ok"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(session.send_message("hello").await, SendStatus::Replied);
}
