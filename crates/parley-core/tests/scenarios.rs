//! End-to-end turns: session -> worker -> HTTP client -> mock inference server.

use parley_core::client::{Generator, OllamaClient};
use parley_core::format::TERMINAL_LINE_BREAK;
use parley_core::session::{
    ChatSession, Speaker, Status, EMPTY_PROMPT_NOTICE, NO_REPLY_PLACEHOLDER,
};
use parley_core::settings::Settings;
use parley_core::worker::dispatch;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn run_turn(endpoint: String, input: &str) -> ChatSession {
    let settings = Settings {
        endpoint,
        ..Settings::default()
    };
    let client: Arc<dyn Generator> = Arc::new(OllamaClient::new(&settings).unwrap());
    let mut session = ChatSession::new(TERMINAL_LINE_BREAK);
    let (tx, mut rx) = mpsc::unbounded_channel();

    if let Ok(ticket) = session.submit(input) {
        dispatch(client, ticket, tx);
        let completion = rx.recv().await.expect("worker always reports back");
        assert!(session.complete(completion.id, completion.outcome));
    }
    session
}

fn last_reply(session: &ChatSession) -> &str {
    let entry = session.transcript().last().expect("transcript has a reply");
    assert_eq!(entry.speaker, Speaker::Assistant);
    &entry.text
}

async fn server_replying(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_json(json!({
            "model": Settings::default().model,
            "prompt": "hello",
            "stream": false
        })))
        .respond_with(template)
        .expect(1)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn plain_reply_is_displayed() {
    let server = server_replying(
        ResponseTemplate::new(200)
            .set_body_json(json!({ "response": "Hi there", "status_code": 200 })),
    )
    .await;

    let session = run_turn(server.uri(), "hello").await;
    assert_eq!(last_reply(&session), "Hi there");
    assert_eq!(session.status(), Status::Finished);
    assert!(!session.is_busy());
}

#[tokio::test]
async fn thinking_block_is_hidden() {
    let server = server_replying(
        ResponseTemplate::new(200)
            .set_body_json(json!({ "response": "<think>reasoning</think>Hi there" })),
    )
    .await;

    let session = run_turn(server.uri(), "hello").await;
    assert_eq!(last_reply(&session), "Hi there");
}

#[tokio::test]
async fn server_error_shows_placeholder() {
    let server = server_replying(ResponseTemplate::new(500)).await;

    let session = run_turn(server.uri(), "hello").await;
    assert_eq!(last_reply(&session), NO_REPLY_PLACEHOLDER);
    assert!(!session.transcript().last().unwrap().is_error);
    assert!(!session.is_busy());
}

#[tokio::test]
async fn refused_connection_shows_error_text() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let session = run_turn(format!("127.0.0.1:{port}"), "hello").await;
    let entry = session.transcript().last().unwrap();
    assert!(entry.is_error);
    assert!(entry.text.starts_with("Request error: "), "{}", entry.text);
    assert!(entry.text.contains(&format!("127.0.0.1:{port}")), "{}", entry.text);
    // The OS-level cause is part of the message, not just the top-level error.
    assert!(entry.text.contains("Connection refused"), "{}", entry.text);
    assert!(!session.is_busy());
}

#[tokio::test]
async fn blank_input_never_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "x" })))
        .expect(0)
        .mount(&server)
        .await;

    for input in ["", "   "] {
        let session = run_turn(server.uri(), input).await;
        assert!(session.transcript().is_empty());
        assert_eq!(session.notice(), Some(EMPTY_PROMPT_NOTICE));
    }

    let received = server.received_requests().await.unwrap();
    assert!(received.is_empty());
}
