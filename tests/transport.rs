//! HTTP transport and chat widget against a mocked backend

use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use orbitx_chat::error::TransportError;
use orbitx_chat::events::Sender;
use orbitx_chat::session::{SessionManager, UserInfo};
use orbitx_chat::storage::{FileStore, KeyValueStore};
use orbitx_chat::transport::{ChatTransport, HttpTransport, MessageRequest};
use orbitx_chat::ui::chat::ChatController;

fn transport(server: &Server) -> HttpTransport {
    HttpTransport::new(&server.url(), Duration::from_secs(5)).unwrap()
}

fn request(message: &str) -> MessageRequest {
    MessageRequest {
        message: message.to_string(),
        conversation_id: "conv_1700000000000_abc123def".to_string(),
        user_info: UserInfo {
            session_id: "conv_1700000000000_abc123def".to_string(),
            ..UserInfo::default()
        },
    }
}

#[tokio::test]
async fn test_send_message_posts_json_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chatbot/message")
        .match_header("content-type", Matcher::Regex("application/json".into()))
        .match_body(Matcher::PartialJson(json!({
            "message": "Hello",
            "conversation_id": "conv_1700000000000_abc123def",
            "user_info": {
                "name": null,
                "email": null,
                "phone": null,
                "session_id": "conv_1700000000000_abc123def"
            }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "bot_response": "Hi there!", "quote_created": false}"#)
        .create_async()
        .await;

    let response = transport(&server).send_message(request("Hello")).await.unwrap();

    mock.assert_async().await;
    assert!(response.success);
    assert_eq!(response.bot_response.as_deref(), Some("Hi there!"));
    assert!(!response.quote_created);
}

#[tokio::test]
async fn test_error_status_body_is_still_read() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/chatbot/message")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": false, "bot_response": "Something broke on our side"}"#)
        .create_async()
        .await;

    let response = transport(&server).send_message(request("Hello")).await.unwrap();

    assert!(!response.success);
    assert_eq!(response.bot_response.as_deref(), Some("Something broke on our side"));
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/chatbot/message")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let err = transport(&server).send_message(request("Hello")).await.unwrap_err();
    assert!(matches!(err, TransportError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let transport = HttpTransport::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
    let err = transport.send_message(request("Hello")).await.unwrap_err();
    assert!(matches!(err, TransportError::Network(_)));
}

#[tokio::test]
async fn test_fetch_history() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/chatbot/history/conv_1_abc")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "success": true,
                "messages": [
                    {"message": "I need a logo", "sender": "user"},
                    {"message": "Happy to help!", "sender": "bot"},
                    {"sender": "bot"}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let history = transport(&server).fetch_history("conv_1_abc").await.unwrap();

    mock.assert_async().await;
    assert!(history.success);
    assert_eq!(history.messages.len(), 2);
    assert_eq!(history.messages[0].sender, Sender::User);
    assert_eq!(history.messages[1].message, "Happy to help!");
}

#[tokio::test]
async fn test_base_url_with_path_prefix() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/site/api/chatbot/history/conv_9")
        .with_status(200)
        .with_body(r#"{"success": true, "messages": []}"#)
        .create_async()
        .await;

    let transport =
        HttpTransport::new(&format!("{}/site/", server.url()), Duration::from_secs(5)).unwrap();
    let history = transport.fetch_history("conv_9").await.unwrap();

    mock.assert_async().await;
    assert!(history.messages.is_empty());
}

#[tokio::test]
async fn test_widget_round_trip_persists_contact_details() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chatbot/message")
        .match_body(Matcher::PartialJson(json!({
            "user_info": { "email": "asha@example.com" }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "bot_response": "Quote on its way", "quote_created": true}"#)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");

    let session = SessionManager::new(Box::new(FileStore::open(&path).unwrap())).unwrap();
    let conversation_id = session.conversation_id().to_string();
    let mut chat = ChatController::new(session, Arc::new(transport(&server)));

    chat.composer_mut().set_text("Please quote me, reach me at asha@example.com");
    assert!(chat.send_message());
    chat.wait_idle().await;

    mock.assert_async().await;
    let texts: Vec<_> = chat.log().messages().map(|m| m.text.as_str()).collect();
    assert_eq!(texts.len(), 3);
    assert_eq!(texts[1], "Quote on its way");
    assert!(!chat.is_typing());

    // A fresh store over the same file sees the same session
    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(
        reopened.get("orbitx_conversation_id").as_deref(),
        Some(conversation_id.as_str())
    );
    assert_eq!(
        reopened.get("orbitx_user_email").as_deref(),
        Some("asha@example.com")
    );
}
