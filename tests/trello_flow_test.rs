//! End-to-end command flow against a mock Trello API
//! Run with: cargo test --test trello_flow_test

use serde_json::json;
use std::sync::{Arc, Once};
use tokio::sync::mpsc;
use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trello_bot::infrastructure::adapters::{ConsoleAdapter, WebhookAdapter};
use trello_bot::infrastructure::config::TrelloConfig;
use trello_bot::{Dispatch, MessageDispatcher, PluginManager, TrelloPlugin};

static INIT: Once = Once::new();

fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

async fn mount_members(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/1/boards/board-1/members"))
        .and(query_param("key", "test-key"))
        .and(query_param("token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "u1", "username": "bob", "fullName": "Bob Smith"}
        ])))
        .mount(server)
        .await;
}

fn trello_config(server: &MockServer) -> TrelloConfig {
    TrelloConfig::new("test-key", "test-token", "board-1", "list-1")
        .with_create_in("list-2")
        .with_api_base(server.uri())
}

/// Dispatcher printing to the console and forwarding reply texts to a channel
fn console_dispatcher(server: &MockServer) -> (MessageDispatcher, mpsc::Receiver<String>) {
    let (tx, rx) = mpsc::channel(16);
    let mut plugins = PluginManager::new();
    plugins
        .register(TrelloPlugin::new(&trello_config(server)).unwrap())
        .unwrap();

    let bot = Arc::new(ConsoleAdapter::new("trellobot").with_sender(tx));
    (MessageDispatcher::new(Arc::new(plugins), bot, "trellobot"), rx)
}

#[tokio::test]
async fn test_card_command_creates_card() {
    ensure_init();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/1/cards"))
        .and(body_json(json!({"name": "Buy milk", "idList": "list-2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "c1",
            "name": "Buy milk",
            "url": "https://trello.com/c/Xy12/3-buy-milk"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (dispatcher, mut replies) = console_dispatcher(&server);
    let outcome = dispatcher.process("#dev", "trello card Buy milk").await;

    assert_eq!(outcome, Dispatch { handled: true, delivered: 1 });
    assert_eq!(
        replies.recv().await.as_deref(),
        Some("Card created at https://trello.com/c/Xy12/3-buy-milk")
    );
}

#[tokio::test]
async fn test_show_for_user_filters_cards() {
    ensure_init();
    let server = MockServer::start().await;
    mount_members(&server).await;

    Mock::given(method("GET"))
        .and(path("/1/lists/list-1"))
        .and(query_param("cards", "open"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "list-1",
            "name": "Backlog",
            "cards": [
                {"id": "a", "name": "Ship it", "idMembers": ["u1"]},
                {"id": "b", "name": "Review", "idMembers": ["u9"]}
            ]
        })))
        .mount(&server)
        .await;

    let (dispatcher, mut replies) = console_dispatcher(&server);

    dispatcher.process("#dev", "trello show bob").await;
    assert_eq!(
        replies.recv().await.as_deref(),
        Some("Cards for bob in Backlog:\n- Ship it\n")
    );

    dispatcher.process("#dev", "trello show alice").await;
    assert_eq!(
        replies.recv().await.as_deref(),
        Some("Trello doesn't know who alice is.")
    );
}

#[tokio::test]
async fn test_join_and_leave_use_member_id() {
    ensure_init();
    let server = MockServer::start().await;
    mount_members(&server).await;

    Mock::given(method("POST"))
        .and(path("/1/cards/abc123/idMembers"))
        .and(body_json(json!({"value": "u1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/1/cards/abc123/idMembers/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (dispatcher, mut replies) = console_dispatcher(&server);

    dispatcher.process("#dev", "trello join abc123 bob").await;
    assert_eq!(
        replies.recv().await.as_deref(),
        Some("Bob Smith has joined card https://trello.com/c/abc123")
    );

    dispatcher.process("#dev", "trello leave abc123 bob").await;
    assert_eq!(
        replies.recv().await.as_deref(),
        Some("Bob Smith has left card https://trello.com/c/abc123")
    );
}

#[tokio::test]
async fn test_remote_failure_becomes_reply() {
    ensure_init();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/1/cards"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid value for idList"))
        .mount(&server)
        .await;

    let (dispatcher, mut replies) = console_dispatcher(&server);
    dispatcher.process("#dev", "trello card Oops").await;

    assert_eq!(
        replies.recv().await.as_deref(),
        Some("There was an error creating the card: Trello API error (400): invalid value for idList")
    );
}

#[tokio::test]
async fn test_non_trello_text_is_ignored() {
    ensure_init();
    let server = MockServer::start().await;

    let (dispatcher, mut replies) = console_dispatcher(&server);
    let outcome = dispatcher.process("#dev", "good morning").await;

    assert_eq!(outcome, Dispatch { handled: false, delivered: 0 });
    assert!(replies.try_recv().is_err());
}

#[tokio::test]
async fn test_replies_reach_webhook() {
    ensure_init();
    let trello = MockServer::start().await;
    let hook = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/T000/B000"))
        .and(body_partial_json(json!({
            "channel": "#cards",
            "username": "trellobot",
            "link_names": 1,
            "parse": "full",
            "unfurl_links": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&hook)
        .await;

    let mut plugins = PluginManager::new();
    plugins
        .register(TrelloPlugin::new(&trello_config(&trello)).unwrap())
        .unwrap();
    let bot = Arc::new(
        WebhookAdapter::new(format!("{}/services/T000/B000", hook.uri()), "trellobot").unwrap(),
    );
    let dispatcher = MessageDispatcher::new(Arc::new(plugins), bot, "trellobot");

    let outcome = dispatcher.process("#cards", "trello what").await;

    assert_eq!(outcome, Dispatch { handled: true, delivered: 1 });
}
